//! Application context and the event loop.
//!
//! [`AppProvider`] owns the [`AppState`] signal and a coroutine that is the
//! app's single ordered event channel: UI dispatches, effect completions,
//! and backend auth-state pushes all funnel through it and are applied to
//! the state one at a time, in arrival order. Effects run concurrently (an
//! upload never blocks the rest of the UI); only state transitions are
//! serialized, which makes last-writer-wins deterministic.

use std::collections::VecDeque;

use backend::Client;
use dioxus::prelude::*;
use futures::channel::mpsc::UnboundedReceiver;
use futures::stream::{FuturesUnordered, StreamExt};
use state::{AppState, Event};

use crate::effects::run_effect;

/// Get the application state.
/// Returns a signal that updates on every applied event.
pub fn use_app() -> Signal<AppState> {
    use_context::<Signal<AppState>>()
}

/// Get the dispatcher for sending events into the app's event queue.
pub fn use_dispatch() -> Coroutine<Event> {
    use_coroutine_handle::<Event>()
}

/// Provider component that owns the state and drives the event loop.
/// Wrap your app with this component.
#[component]
pub fn AppProvider(children: Element) -> Element {
    let mut app = use_signal(AppState::default);
    use_context_provider(|| app);

    let client = use_hook(|| Client::from_env().map_err(|err| err.to_string()));

    let client_for_loop = client.clone();
    use_coroutine(move |mut rx: UnboundedReceiver<Event>| {
        let client = client_for_loop.clone();
        async move {
            let Ok(client) = client else { return };
            let mut pushes = client.subscribe();
            let mut pending = FuturesUnordered::new();
            let mut backlog: VecDeque<Event> = VecDeque::new();
            loop {
                let event = if let Some(event) = backlog.pop_front() {
                    event
                } else {
                    futures::select! {
                        event = rx.next() => match event {
                            Some(event) => event,
                            None => break,
                        },
                        push = pushes.next() => match push {
                            Some(session) => Event::SessionChanged(session),
                            None => break,
                        },
                        done = pending.select_next_some() => {
                            backlog.extend(done);
                            continue;
                        }
                    }
                };
                for effect in app.write().apply(event) {
                    pending.push(run_effect(client.clone(), effect));
                }
            }
        }
    });

    // Periodic token refresh (every 30 min). The replacement session reaches
    // the reducer through the auth-state subscription like any other push.
    let refresh_client = client.clone();
    use_effect(move || {
        let client = refresh_client.clone();
        spawn(async move {
            let Ok(client) = client else { return };
            loop {
                #[cfg(target_arch = "wasm32")]
                gloo_timers::future::sleep(std::time::Duration::from_secs(30 * 60)).await;
                #[cfg(not(target_arch = "wasm32"))]
                tokio::time::sleep(std::time::Duration::from_secs(30 * 60)).await;

                if client.current_session().is_none() {
                    continue;
                }
                if let Err(err) = client.refresh().await {
                    tracing::warn!("session refresh failed: {err}");
                }
            }
        });
    });

    if let Err(message) = client {
        return rsx! {
            div {
                class: "config-error",
                "Backend not configured: {message}"
            }
        };
    }

    rsx! {
        {children}
    }
}

/// Button that signs the current user out.
#[component]
pub fn SignOutButton(
    #[props(default = "Sign Out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let dispatch = use_dispatch();

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| dispatch.send(Event::SubmitSignOut),
            "{label}"
        }
    }
}
