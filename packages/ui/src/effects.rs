//! Effect execution: the bridge from the pure core's [`Effect`]s to actual
//! backend calls. Each effect is one round trip; its outcome comes back as
//! the event(s) the reducer expects. No retries — a failure is reported and
//! the attempt is over.

use backend::Client;
use state::{Effect, Event};
use tracing::debug;

/// Execute one effect and return its completion event(s).
///
/// A successful sign-in returns nothing here: the new session reaches the
/// reducer through the client's auth-state subscription, the same path a
/// token refresh or cross-tab logout takes. Keeping a single source for
/// session changes is what makes their ordering well-defined.
pub async fn run_effect(client: Client, effect: Effect) -> Vec<Event> {
    match effect {
        Effect::SignUp { email, password } => match client.sign_up(&email, &password).await {
            Ok(()) => vec![Event::SignUpAccepted],
            Err(err) => vec![Event::AuthFailed(err.to_string())],
        },
        Effect::SignIn { email, password } => match client.sign_in(&email, &password).await {
            Ok(_) => Vec::new(),
            Err(err) => vec![Event::AuthFailed(err.to_string())],
        },
        Effect::SignOut => {
            // Local state is already cleared; the remote call is best-effort.
            if let Err(err) = client.sign_out().await {
                debug!("remote sign-out failed: {err}");
            }
            Vec::new()
        }
        Effect::FetchTasks { session } => match client.fetch_tasks(&session).await {
            Ok(tasks) => vec![Event::TasksLoaded(tasks)],
            Err(err) => vec![Event::FetchFailed(err.to_string())],
        },
        Effect::Insert { session, task } => match client.insert_task(&session, &task).await {
            Ok(row) => vec![Event::TaskAdded(row)],
            Err(err) => vec![Event::AddFailed(err.to_string())],
        },
        Effect::Update {
            session,
            id,
            title,
            description,
        } => match client.update_task(&session, id, &title, &description).await {
            Ok(()) => vec![Event::TaskUpdated {
                id,
                title,
                description,
            }],
            Err(err) => vec![Event::UpdateFailed(err.to_string())],
        },
        Effect::Delete { session, id } => match client.delete_task(&session, id).await {
            Ok(()) => vec![Event::TaskDeleted(id)],
            Err(err) => vec![Event::DeleteFailed(err.to_string())],
        },
        Effect::Upload {
            session,
            kind,
            filename,
            bytes,
            content_type,
        } => match client.upload(&session, &filename, bytes, &content_type).await {
            Ok(url) => vec![Event::MediaUploaded { kind, url }],
            Err(err) => vec![Event::UploadFailed(err.to_string())],
        },
    }
}
