//! Pure domain core for the task tracker: models, application state, and the
//! event reducer. No IO lives here — the backend client and the UI are the
//! effect shell around this crate.

pub mod app;
pub mod models;

pub use app::{AppState, Effect, Event};
pub use models::{
    EditDraft, MediaKind, NewTask, Notice, NoticeKind, Session, SessionUser, Task, TaskDraft,
};
