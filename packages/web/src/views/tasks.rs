//! Task list screen: add-task form, media pickers, and the card list.

use dioxus::prelude::*;
use state::{Event, MediaKind};
use ui::{use_app, use_dispatch, MediaPicker, NoticeBanner, SignOutButton, TaskCard};

use crate::Route;

#[component]
pub fn Tasks() -> Element {
    let app = use_app();
    let dispatch = use_dispatch();
    let nav = use_navigator();

    // Auth guard: this screen only exists for a signed-in user.
    if app().session.is_none() {
        nav.replace(Route::Login {});
        return rsx! {};
    }

    let current = app();

    let handle_add = move |evt: FormEvent| {
        evt.prevent_default();
        dispatch.send(Event::SubmitAdd);
    };

    rsx! {
        div {
            class: "tasks-screen",

            div {
                class: "tasks-panel",

                div {
                    class: "tasks-header",
                    h1 { "My Task Tracker" }
                    SignOutButton { class: "btn btn-danger" }
                }

                NoticeBanner {}

                form {
                    class: "add-task-form",
                    onsubmit: handle_add,

                    input {
                        r#type: "text",
                        placeholder: "Task Title",
                        value: current.draft.title.clone(),
                        oninput: move |evt| dispatch.send(Event::DraftTitle(evt.value())),
                    }
                    textarea {
                        placeholder: "Task Description",
                        value: current.draft.description.clone(),
                        oninput: move |evt| dispatch.send(Event::DraftDescription(evt.value())),
                    }
                    MediaPicker { kind: MediaKind::Image, accept: "image/*" }
                    MediaPicker { kind: MediaKind::Video, accept: "video/*" }
                    button { class: "btn btn-success", r#type: "submit", "Add Task" }
                }

                if current.tasks.is_empty() {
                    p { class: "tasks-empty", "No tasks yet..." }
                } else {
                    ul {
                        class: "task-list",
                        for task in current.tasks.clone() {
                            TaskCard { key: "{task.id}", task }
                        }
                    }
                }
            }
        }
    }
}
