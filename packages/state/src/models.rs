//! # Domain models for sessions and tasks
//!
//! Defines the data structures shared between the state machine
//! ([`crate::app`]), the backend client, and the UI. These types are
//! `Serialize + Deserialize` so they map directly onto the hosted backend's
//! wire formats (GoTrue token responses and PostgREST rows).
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Session`] | An authenticated identity: access/refresh tokens plus the owning [`SessionUser`]. Replaced wholesale on every auth-state change. |
//! | [`Task`] | A row of the remote `tasks` table. The local copy is a cache of the last successful server response. |
//! | [`NewTask`] | The insert payload for a task; optional media fields serialize as SQL nulls. |
//! | [`TaskDraft`] | The add-task form: title, description, and media URLs staged by uploads. Local-only. |
//! | [`EditDraft`] | The transient unsaved copy of a task being edited in place. Local-only, discarded on save or cancel. |
//! | [`Notice`] | A user-facing message (the alert-equivalent for auth and upload failures). |

use serde::{Deserialize, Serialize};

/// Authenticated session returned by the backend's token endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: SessionUser,
}

/// The identity a session belongs to. Scopes every task query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: Option<String>,
}

/// A task row from the remote `tasks` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub user_id: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

/// Insert payload for a new task.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub user_id: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

/// Which media slot of the add-task form an upload targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// Local-only state of the add-task form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

impl TaskDraft {
    /// A draft is submittable when both text fields are non-empty after trimming.
    pub fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }
}

/// Transient unsaved copy of the task currently being edited.
#[derive(Clone, Debug, PartialEq)]
pub struct EditDraft {
    pub id: i64,
    pub title: String,
    pub description: String,
}

/// Severity of a [`Notice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A message surfaced to the user, dismissed explicitly.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}
