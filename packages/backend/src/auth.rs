//! # Auth endpoints — sign-up, sign-in, refresh, sign-out
//!
//! Email + password authentication against the hosted auth API. Sign-up only
//! registers the account; the service sends a verification email and no
//! session exists until the user signs in. Sign-in and refresh both answer
//! with a token response that decodes into a [`Session`]; every successful
//! call stores the new session on the [`Client`] and pushes it to
//! subscribers, so the UI's auth state follows this module passively.

use serde::Serialize;
use state::Session;
use tracing::debug;

use crate::error::{check, Error};
use crate::Client;

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

impl Client {
    /// Register a new account. Success means verification is pending — the
    /// user has no session until they confirm their email and sign in.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<(), Error> {
        let response = self
            .http
            .post(self.endpoint("/auth/v1/signup"))
            .header("apikey", &self.config().anon_key)
            .json(&Credentials { email, password })
            .send()
            .await?;
        check(response).await?;
        debug!("sign-up accepted for {email}");
        Ok(())
    }

    /// Exchange credentials for a session. The new session becomes current
    /// and is pushed to subscribers.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, Error> {
        let response = self
            .http
            .post(self.endpoint("/auth/v1/token?grant_type=password"))
            .header("apikey", &self.config().anon_key)
            .json(&Credentials { email, password })
            .send()
            .await?;
        let body = check(response).await?.text().await?;
        let session: Session = serde_json::from_str(&body)?;
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    /// Trade the current refresh token for a fresh session. This is the
    /// externally driven session change: subscribers see the replacement
    /// the same way they see a sign-in.
    pub async fn refresh(&self) -> Result<Session, Error> {
        let current = self.current_session().ok_or(Error::NoSession)?;
        let response = self
            .http
            .post(self.endpoint("/auth/v1/token?grant_type=refresh_token"))
            .header("apikey", &self.config().anon_key)
            .json(&RefreshRequest {
                refresh_token: &current.refresh_token,
            })
            .send()
            .await?;
        let body = check(response).await?.text().await?;
        let session: Session = serde_json::from_str(&body)?;
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    /// Request remote invalidation, then clear the local session no matter
    /// what the server said. Subscribers get a `None` push either way.
    pub async fn sign_out(&self) -> Result<(), Error> {
        let result = match self.current_session() {
            Some(session) => {
                let outcome = self
                    .http
                    .post(self.endpoint("/auth/v1/logout"))
                    .header("apikey", &self.config().anon_key)
                    .bearer_auth(&session.access_token)
                    .send()
                    .await;
                match outcome {
                    Ok(response) => check(response).await.map(|_| ()),
                    Err(err) => Err(err.into()),
                }
            }
            None => Ok(()),
        };
        self.set_session(None);
        result
    }
}

#[cfg(test)]
mod tests {
    use state::Session;

    // Captured shape of the auth API's token response (password and
    // refresh grants answer identically).
    const TOKEN_RESPONSE: &str = r#"{
        "access_token": "eyJhbGciOi.header.sig",
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "v2.refresh",
        "user": {
            "id": "5f3e9a2b-0000-0000-0000-000000000000",
            "aud": "authenticated",
            "role": "authenticated",
            "email": "someone@example.com"
        }
    }"#;

    #[test]
    fn test_token_response_decodes_into_session() {
        let session: Session = serde_json::from_str(TOKEN_RESPONSE).unwrap();
        assert_eq!(session.access_token, "eyJhbGciOi.header.sig");
        assert_eq!(session.refresh_token, "v2.refresh");
        assert_eq!(session.user.id, "5f3e9a2b-0000-0000-0000-000000000000");
        assert_eq!(session.user.email.as_deref(), Some("someone@example.com"));
    }

    #[test]
    fn test_user_without_email_still_decodes() {
        let body = r#"{"access_token":"a","refresh_token":"r","user":{"id":"u"}}"#;
        let session: Session = serde_json::from_str(body).unwrap();
        assert!(session.user.email.is_none());
    }
}
