//! # Application state machine
//!
//! The pure core of the tracker: [`AppState`] holds everything the UI
//! renders, [`Event`] is the single vocabulary of state transitions, and
//! [`AppState::apply`] is the reducer that maps an event to zero or more
//! [`Effect`]s for the shell to execute.
//!
//! User actions and backend push notifications (auth-state changes, request
//! completions) all arrive through the same ordered event queue, so when two
//! sources race the last event applied wins — deterministically, by queue
//! order. The reducer itself never performs IO: validation, list merging,
//! and session transitions are all decidable from the event and the current
//! state, which is what makes this module testable without a network.
//!
//! Local state only changes in response to server completions
//! ([`Event::TaskAdded`], [`Event::TaskUpdated`], ...), never optimistically.
//! Failures are terminal for their attempt: data errors are logged and leave
//! the list unchanged, auth and upload errors surface a [`Notice`], and the
//! user retries by re-submitting.

use tracing::error;

use crate::models::{
    EditDraft, MediaKind, NewTask, Notice, Session, Task, TaskDraft,
};

/// Everything the UI renders, in one place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    /// `None` is Unauthenticated; `Some` scopes all task operations.
    pub session: Option<Session>,
    /// Mirror of the last successful server response for the current user.
    pub tasks: Vec<Task>,
    /// Add-task form state.
    pub draft: TaskDraft,
    /// Present only while one task is in edit mode.
    pub edit: Option<EditDraft>,
    /// Pending user-facing message, if any.
    pub notice: Option<Notice>,
}

/// A state transition. Variants prefixed `Submit`/`Start`/`Cancel`/`Pick`
/// originate from the UI; the rest are completions or backend pushes.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    // Session controller
    SubmitSignUp { email: String, password: String },
    SubmitSignIn { email: String, password: String },
    SubmitSignOut,
    /// Externally driven: sign-in result, token refresh, cross-tab logout.
    SessionChanged(Option<Session>),
    SignUpAccepted,
    AuthFailed(String),

    // Add-task form
    DraftTitle(String),
    DraftDescription(String),
    SubmitAdd,
    TaskAdded(Task),
    AddFailed(String),

    // Fetch
    TasksLoaded(Vec<Task>),
    FetchFailed(String),

    // Edit in place
    StartEdit(i64),
    EditTitle(String),
    EditDescription(String),
    CancelEdit,
    SubmitUpdate,
    TaskUpdated { id: i64, title: String, description: String },
    UpdateFailed(String),

    // Delete
    SubmitDelete(i64),
    TaskDeleted(i64),
    DeleteFailed(String),

    // Media upload
    PickMedia { kind: MediaKind, filename: String, bytes: Vec<u8>, content_type: String },
    MediaUploaded { kind: MediaKind, url: String },
    UploadFailed(String),

    DismissNotice,
}

/// An IO request for the effect shell. Each effect is one request-response
/// round trip; its outcome comes back as an [`Event`].
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SignUp { email: String, password: String },
    SignIn { email: String, password: String },
    SignOut,
    FetchTasks { session: Session },
    Insert { session: Session, task: NewTask },
    Update { session: Session, id: i64, title: String, description: String },
    Delete { session: Session, id: i64 },
    Upload {
        session: Session,
        kind: MediaKind,
        filename: String,
        bytes: Vec<u8>,
        content_type: String,
    },
}

impl AppState {
    /// Apply one event, returning the effects it triggers.
    ///
    /// Task events are ignored while unauthenticated; they cannot be scoped
    /// to a user.
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::SubmitSignUp { email, password } => {
                vec![Effect::SignUp { email, password }]
            }
            Event::SubmitSignIn { email, password } => {
                vec![Effect::SignIn { email, password }]
            }
            Event::SubmitSignOut => {
                // Local clear is unconditional; remote invalidation is
                // fire-and-forget.
                self.clear_user_state();
                vec![Effect::SignOut]
            }
            Event::SessionChanged(session) => {
                self.session = session;
                match &self.session {
                    Some(session) => vec![Effect::FetchTasks {
                        session: session.clone(),
                    }],
                    None => {
                        self.clear_user_state();
                        Vec::new()
                    }
                }
            }
            Event::SignUpAccepted => {
                self.notice = Some(Notice::info("Check your email for verification link!"));
                Vec::new()
            }
            Event::AuthFailed(message) => {
                self.notice = Some(Notice::error(message));
                Vec::new()
            }

            Event::DraftTitle(title) => {
                self.draft.title = title;
                Vec::new()
            }
            Event::DraftDescription(description) => {
                self.draft.description = description;
                Vec::new()
            }
            Event::SubmitAdd => {
                let Some(session) = &self.session else {
                    return Vec::new();
                };
                if !self.draft.is_submittable() {
                    return Vec::new();
                }
                vec![Effect::Insert {
                    session: session.clone(),
                    task: NewTask {
                        title: self.draft.title.clone(),
                        description: self.draft.description.clone(),
                        user_id: session.user.id.clone(),
                        image_url: self.draft.image_url.clone(),
                        video_url: self.draft.video_url.clone(),
                    },
                }]
            }
            Event::TaskAdded(task) => {
                // Append exactly the server row; clear the form only now,
                // so a failed submission keeps the user's input.
                self.tasks.push(task);
                self.draft = TaskDraft::default();
                Vec::new()
            }
            Event::AddFailed(message) => {
                error!("Error adding task: {message}");
                Vec::new()
            }

            Event::TasksLoaded(tasks) => {
                self.tasks = tasks;
                Vec::new()
            }
            Event::FetchFailed(message) => {
                // Stale-but-available: keep whatever we had.
                error!("Error fetching tasks: {message}");
                Vec::new()
            }

            Event::StartEdit(id) => {
                if let Some(task) = self.tasks.iter().find(|t| t.id == id) {
                    self.edit = Some(EditDraft {
                        id,
                        title: task.title.clone(),
                        description: task.description.clone(),
                    });
                }
                Vec::new()
            }
            Event::EditTitle(title) => {
                if let Some(edit) = &mut self.edit {
                    edit.title = title;
                }
                Vec::new()
            }
            Event::EditDescription(description) => {
                if let Some(edit) = &mut self.edit {
                    edit.description = description;
                }
                Vec::new()
            }
            Event::CancelEdit => {
                self.edit = None;
                Vec::new()
            }
            Event::SubmitUpdate => {
                let (Some(session), Some(edit)) = (&self.session, &self.edit) else {
                    return Vec::new();
                };
                if edit.title.trim().is_empty() || edit.description.trim().is_empty() {
                    return Vec::new();
                }
                vec![Effect::Update {
                    session: session.clone(),
                    id: edit.id,
                    title: edit.title.clone(),
                    description: edit.description.clone(),
                }]
            }
            Event::TaskUpdated { id, title, description } => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                    task.title = title;
                    task.description = description;
                }
                self.edit = None;
                Vec::new()
            }
            Event::UpdateFailed(message) => {
                // Stay in edit mode so the user can retry or cancel.
                error!("Error updating task: {message}");
                Vec::new()
            }

            Event::SubmitDelete(id) => match &self.session {
                Some(session) => vec![Effect::Delete {
                    session: session.clone(),
                    id,
                }],
                None => Vec::new(),
            },
            Event::TaskDeleted(id) => {
                self.tasks.retain(|t| t.id != id);
                Vec::new()
            }
            Event::DeleteFailed(message) => {
                error!("Error deleting task: {message}");
                Vec::new()
            }

            Event::PickMedia { kind, filename, bytes, content_type } => {
                let Some(session) = &self.session else {
                    return Vec::new();
                };
                if filename.is_empty() {
                    return Vec::new();
                }
                vec![Effect::Upload {
                    session: session.clone(),
                    kind,
                    filename,
                    bytes,
                    content_type,
                }]
            }
            Event::MediaUploaded { kind, url } => {
                match kind {
                    MediaKind::Image => self.draft.image_url = Some(url),
                    MediaKind::Video => self.draft.video_url = Some(url),
                }
                Vec::new()
            }
            Event::UploadFailed(message) => {
                self.notice = Some(Notice::error(format!("Upload failed: {message}")));
                Vec::new()
            }

            Event::DismissNotice => {
                self.notice = None;
                Vec::new()
            }
        }
    }

    fn clear_user_state(&mut self) {
        self.session = None;
        self.tasks.clear();
        self.draft = TaskDraft::default();
        self.edit = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoticeKind;

    fn session() -> Session {
        Session {
            access_token: "token".into(),
            refresh_token: "refresh".into(),
            user: crate::models::SessionUser {
                id: "user-1".into(),
                email: Some("a@b.c".into()),
            },
        }
    }

    fn task(id: i64, title: &str, description: &str) -> Task {
        Task {
            id,
            title: title.into(),
            description: description.into(),
            user_id: "user-1".into(),
            image_url: None,
            video_url: None,
        }
    }

    fn signed_in() -> AppState {
        let mut state = AppState::default();
        let effects = state.apply(Event::SessionChanged(Some(session())));
        assert_eq!(
            effects,
            vec![Effect::FetchTasks { session: session() }]
        );
        state
    }

    #[test]
    fn test_add_with_empty_title_is_local_noop() {
        let mut state = signed_in();
        state.apply(Event::DraftTitle("   ".into()));
        state.apply(Event::DraftDescription("something".into()));

        let effects = state.apply(Event::SubmitAdd);

        assert!(effects.is_empty());
        assert!(state.tasks.is_empty());
        assert_eq!(state.draft.description, "something");
    }

    #[test]
    fn test_add_with_empty_description_is_local_noop() {
        let mut state = signed_in();
        state.apply(Event::DraftTitle("Buy milk".into()));
        state.apply(Event::DraftDescription("  ".into()));

        assert!(state.apply(Event::SubmitAdd).is_empty());
        assert!(state.tasks.is_empty());
    }

    #[test]
    fn test_submit_add_builds_insert_scoped_to_current_user() {
        let mut state = signed_in();
        state.apply(Event::DraftTitle("Buy milk".into()));
        state.apply(Event::DraftDescription("2 liters".into()));
        state.apply(Event::MediaUploaded {
            kind: MediaKind::Image,
            url: "https://cdn/img.png".into(),
        });

        let effects = state.apply(Event::SubmitAdd);

        assert_eq!(
            effects,
            vec![Effect::Insert {
                session: session(),
                task: NewTask {
                    title: "Buy milk".into(),
                    description: "2 liters".into(),
                    user_id: "user-1".into(),
                    image_url: Some("https://cdn/img.png".into()),
                    video_url: None,
                },
            }]
        );
        // Nothing local changes until the server row comes back.
        assert!(state.tasks.is_empty());
        assert_eq!(state.draft.title, "Buy milk");
    }

    #[test]
    fn test_task_added_appends_server_row_and_clears_draft() {
        let mut state = signed_in();
        state.apply(Event::DraftTitle("Buy milk".into()));
        state.apply(Event::DraftDescription("2 liters".into()));

        state.apply(Event::TaskAdded(task(1, "Buy milk", "2 liters")));

        assert_eq!(state.tasks, vec![task(1, "Buy milk", "2 liters")]);
        assert_eq!(state.draft, TaskDraft::default());
    }

    #[test]
    fn test_add_failure_preserves_draft() {
        let mut state = signed_in();
        state.apply(Event::DraftTitle("Buy milk".into()));
        state.apply(Event::DraftDescription("2 liters".into()));

        state.apply(Event::AddFailed("insert failed".into()));

        assert!(state.tasks.is_empty());
        assert_eq!(state.draft.title, "Buy milk");
        assert_eq!(state.draft.description, "2 liters");
    }

    #[test]
    fn test_delete_removes_only_target_and_keeps_order() {
        let mut state = signed_in();
        state.apply(Event::TasksLoaded(vec![
            task(1, "a", "a"),
            task(2, "b", "b"),
            task(3, "c", "c"),
        ]));

        state.apply(Event::TaskDeleted(2));

        assert_eq!(state.tasks, vec![task(1, "a", "a"), task(3, "c", "c")]);
    }

    #[test]
    fn test_delete_failure_leaves_list_unchanged() {
        let mut state = signed_in();
        state.apply(Event::TasksLoaded(vec![task(1, "a", "a")]));

        assert!(state.apply(Event::DeleteFailed("boom".into())).is_empty());
        assert_eq!(state.tasks, vec![task(1, "a", "a")]);
    }

    #[test]
    fn test_update_rewrites_in_place_and_exits_edit_mode() {
        let mut state = signed_in();
        state.apply(Event::TasksLoaded(vec![
            task(1, "a", "a"),
            task(2, "b", "b"),
        ]));
        state.apply(Event::StartEdit(2));
        state.apply(Event::EditTitle("B".into()));
        state.apply(Event::EditDescription("bee".into()));

        let effects = state.apply(Event::SubmitUpdate);
        assert_eq!(
            effects,
            vec![Effect::Update {
                session: session(),
                id: 2,
                title: "B".into(),
                description: "bee".into(),
            }]
        );

        state.apply(Event::TaskUpdated {
            id: 2,
            title: "B".into(),
            description: "bee".into(),
        });

        assert_eq!(state.tasks, vec![task(1, "a", "a"), task(2, "B", "bee")]);
        assert!(state.edit.is_none());
    }

    #[test]
    fn test_update_with_empty_field_stays_in_edit_mode() {
        let mut state = signed_in();
        state.apply(Event::TasksLoaded(vec![task(1, "a", "a")]));
        state.apply(Event::StartEdit(1));
        state.apply(Event::EditTitle("  ".into()));

        assert!(state.apply(Event::SubmitUpdate).is_empty());
        assert!(state.edit.is_some());
        assert_eq!(state.tasks[0].title, "a");
    }

    #[test]
    fn test_update_failure_keeps_edit_mode_and_list() {
        let mut state = signed_in();
        state.apply(Event::TasksLoaded(vec![task(1, "a", "a")]));
        state.apply(Event::StartEdit(1));

        state.apply(Event::UpdateFailed("boom".into()));

        assert!(state.edit.is_some());
        assert_eq!(state.tasks, vec![task(1, "a", "a")]);
    }

    #[test]
    fn test_cancel_edit_discards_draft() {
        let mut state = signed_in();
        state.apply(Event::TasksLoaded(vec![task(1, "a", "a")]));
        state.apply(Event::StartEdit(1));
        state.apply(Event::EditTitle("changed".into()));

        state.apply(Event::CancelEdit);

        assert!(state.edit.is_none());
        assert_eq!(state.tasks[0].title, "a");
    }

    #[test]
    fn test_sign_in_failure_leaves_unauthenticated_and_list_untouched() {
        let mut state = AppState::default();

        let effects = state.apply(Event::AuthFailed("Invalid login credentials".into()));

        assert!(effects.is_empty());
        assert!(state.session.is_none());
        assert!(state.tasks.is_empty());
        let notice = state.notice.expect("auth failure surfaces a notice");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Invalid login credentials");
    }

    #[test]
    fn test_sign_up_accepted_shows_verification_notice_without_session() {
        let mut state = AppState::default();

        state.apply(Event::SignUpAccepted);

        assert!(state.session.is_none());
        assert_eq!(state.notice.unwrap().kind, NoticeKind::Info);
    }

    #[test]
    fn test_session_push_triggers_fetch_and_logout_push_clears() {
        let mut state = AppState::default();

        let effects = state.apply(Event::SessionChanged(Some(session())));
        assert_eq!(effects, vec![Effect::FetchTasks { session: session() }]);

        state.apply(Event::TasksLoaded(vec![task(1, "a", "a")]));
        state.apply(Event::DraftTitle("wip".into()));

        // Cross-tab logout push.
        let effects = state.apply(Event::SessionChanged(None));
        assert!(effects.is_empty());
        assert!(state.session.is_none());
        assert!(state.tasks.is_empty());
        assert_eq!(state.draft, TaskDraft::default());
    }

    #[test]
    fn test_sign_out_clears_locally_and_requests_remote_invalidation() {
        let mut state = signed_in();
        state.apply(Event::TasksLoaded(vec![task(1, "a", "a")]));

        let effects = state.apply(Event::SubmitSignOut);

        assert_eq!(effects, vec![Effect::SignOut]);
        assert!(state.session.is_none());
        assert!(state.tasks.is_empty());
    }

    #[test]
    fn test_task_events_ignored_while_unauthenticated() {
        let mut state = AppState::default();
        state.apply(Event::DraftTitle("t".into()));
        state.apply(Event::DraftDescription("d".into()));

        assert!(state.apply(Event::SubmitAdd).is_empty());
        assert!(state.apply(Event::SubmitDelete(1)).is_empty());
        assert!(state
            .apply(Event::PickMedia {
                kind: MediaKind::Image,
                filename: "a.png".into(),
                bytes: vec![1],
                content_type: "image/png".into(),
            })
            .is_empty());
    }

    #[test]
    fn test_upload_success_stages_url_into_matching_draft_slot() {
        let mut state = signed_in();

        state.apply(Event::MediaUploaded {
            kind: MediaKind::Video,
            url: "https://cdn/v.mp4".into(),
        });

        assert_eq!(state.draft.video_url.as_deref(), Some("https://cdn/v.mp4"));
        assert!(state.draft.image_url.is_none());
    }

    #[test]
    fn test_upload_failure_alerts_and_keeps_pending_fields() {
        let mut state = signed_in();
        state.apply(Event::MediaUploaded {
            kind: MediaKind::Image,
            url: "https://cdn/i.png".into(),
        });

        state.apply(Event::UploadFailed("bucket missing".into()));

        assert_eq!(state.draft.image_url.as_deref(), Some("https://cdn/i.png"));
        let notice = state.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.contains("bucket missing"));
    }

    #[test]
    fn test_example_scenario_add_update_delete() {
        let mut state = signed_in();

        state.apply(Event::DraftTitle("Buy milk".into()));
        state.apply(Event::DraftDescription("2 liters".into()));
        assert_eq!(state.apply(Event::SubmitAdd).len(), 1);
        state.apply(Event::TaskAdded(task(1, "Buy milk", "2 liters")));
        assert_eq!(state.tasks, vec![task(1, "Buy milk", "2 liters")]);

        state.apply(Event::StartEdit(1));
        state.apply(Event::EditTitle("Buy oat milk".into()));
        assert_eq!(state.apply(Event::SubmitUpdate).len(), 1);
        state.apply(Event::TaskUpdated {
            id: 1,
            title: "Buy oat milk".into(),
            description: "2 liters".into(),
        });
        assert_eq!(state.tasks, vec![task(1, "Buy oat milk", "2 liters")]);

        assert_eq!(state.apply(Event::SubmitDelete(1)).len(), 1);
        state.apply(Event::TaskDeleted(1));
        assert!(state.tasks.is_empty());
    }
}
