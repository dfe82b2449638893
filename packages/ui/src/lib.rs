//! This crate contains the shared UI for the workspace: the application
//! provider with its event loop, the effect runner, and the task-list
//! widgets.

mod app;
pub use app::{use_app, use_dispatch, AppProvider, SignOutButton};

mod effects;
pub use effects::run_effect;

mod media_picker;
pub use media_picker::{mime_for_filename, MediaPicker};

mod notice;
pub use notice::NoticeBanner;

mod task_card;
pub use task_card::TaskCard;
