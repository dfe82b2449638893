//! # Backend client for the hosted task-tracker service
//!
//! This crate is the IO half of the effect shell: a thin HTTP client for the
//! backend-as-a-service the app delegates all persistence to. It owns no
//! durability or auth logic of its own — every guarantee comes from the
//! remote service.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Sign-up, sign-in, token refresh, sign-out against the auth endpoints, plus the auth-state-change subscription |
//! | [`table`] | CRUD on the remote `tasks` table, always filtered to the session's user |
//! | [`storage`] | Object uploads into the `uploads` bucket and public URL resolution |
//! | [`config`] | [`BackendConfig`] — base URL and anon key from the environment |
//! | [`error`] | [`Error`] and extraction of the service's own error messages |
//!
//! [`Client`] is cheap to clone (shared `reqwest` pool and session cell) and
//! holds the current [`Session`] so that token refresh and sign-out can act
//! on it. Every change to that session — sign-in, refresh, sign-out — is
//! pushed to [`Client::subscribe`] receivers, which is how the UI observes
//! auth-state changes from one ordered source.

use std::sync::{Arc, Mutex};

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use state::Session;

pub mod auth;
pub mod config;
pub mod error;
pub mod storage;
pub mod table;

pub use config::BackendConfig;
pub use error::Error;

/// Handle to the hosted backend. Clone freely; all clones share the
/// connection pool, the current session, and the subscriber list.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    config: BackendConfig,
    session: Arc<Mutex<Option<Session>>>,
    subscribers: Arc<Mutex<Vec<UnboundedSender<Option<Session>>>>>,
}

impl Client {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session: Arc::new(Mutex::new(None)),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn from_env() -> Result<Self, Error> {
        Ok(Self::new(BackendConfig::from_env()?))
    }

    /// The session the client currently holds, if any.
    pub fn current_session(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }

    /// Receive a push for every auth-state change: `Some` on sign-in and
    /// token refresh, `None` on sign-out. Pushes arrive in the order the
    /// changes happened.
    pub fn subscribe(&self) -> UnboundedReceiver<Option<Session>> {
        let (tx, rx) = mpsc::unbounded();
        self.subscribers.lock().unwrap().push(tx);
        rx
    }

    pub(crate) fn set_session(&self, session: Option<Session>) {
        *self.session.lock().unwrap() = session.clone();
        self.subscribers
            .lock()
            .unwrap()
            .retain(|tx| tx.unbounded_send(session.clone()).is_ok());
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.config.url)
    }

    pub(crate) fn config(&self) -> &BackendConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use state::SessionUser;

    fn client() -> Client {
        Client::new(BackendConfig::new("https://xyz.supabase.co", "anon"))
    }

    fn session(id: &str) -> Session {
        Session {
            access_token: format!("at-{id}"),
            refresh_token: format!("rt-{id}"),
            user: SessionUser {
                id: id.to_string(),
                email: None,
            },
        }
    }

    #[test]
    fn test_endpoint_joins_base_and_path() {
        assert_eq!(
            client().endpoint("/auth/v1/logout"),
            "https://xyz.supabase.co/auth/v1/logout"
        );
    }

    #[test]
    fn test_subscribers_see_changes_in_order() {
        let client = client();
        let mut rx = client.subscribe();

        client.set_session(Some(session("u1")));
        client.set_session(Some(session("u2")));
        client.set_session(None);

        assert_eq!(rx.try_next().unwrap(), Some(Some(session("u1"))));
        assert_eq!(rx.try_next().unwrap(), Some(Some(session("u2"))));
        assert_eq!(rx.try_next().unwrap(), Some(None));
        // No further pushes pending.
        assert!(rx.try_next().is_err());
    }

    #[test]
    fn test_clones_share_the_session() {
        let client = client();
        let clone = client.clone();

        client.set_session(Some(session("u1")));

        assert_eq!(clone.current_session(), Some(session("u1")));
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let client = client();
        let rx = client.subscribe();
        drop(rx);

        client.set_session(None);

        assert!(client.subscribers.lock().unwrap().is_empty());
    }
}
