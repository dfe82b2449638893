//! A single task in the list, with edit-in-place.

use dioxus::prelude::*;
use state::{Event, Task};

use crate::{use_app, use_dispatch};

/// Renders a task card. While the task is the app's edit target, the body
/// swaps to title/description inputs with Save/Cancel.
#[component]
pub fn TaskCard(task: Task) -> Element {
    let app = use_app();
    let dispatch = use_dispatch();
    let editing = app().edit.filter(|edit| edit.id == task.id);

    rsx! {
        li {
            class: "task-card",
            if let Some(edit) = editing {
                input {
                    r#type: "text",
                    class: "task-edit-input",
                    value: "{edit.title}",
                    oninput: move |evt| dispatch.send(Event::EditTitle(evt.value())),
                }
                textarea {
                    class: "task-edit-input",
                    value: "{edit.description}",
                    oninput: move |evt| dispatch.send(Event::EditDescription(evt.value())),
                }
                div {
                    class: "task-actions",
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| dispatch.send(Event::SubmitUpdate),
                        "Save"
                    }
                    button {
                        class: "btn btn-muted",
                        onclick: move |_| dispatch.send(Event::CancelEdit),
                        "Cancel"
                    }
                }
            } else {
                h3 { class: "task-title", "{task.title}" }
                p { class: "task-description", "{task.description}" }
                if let Some(image_url) = task.image_url.clone() {
                    img { class: "task-media", src: "{image_url}", alt: "Task" }
                }
                if let Some(video_url) = task.video_url.clone() {
                    video { class: "task-media", controls: true, src: "{video_url}" }
                }
                div {
                    class: "task-actions",
                    button {
                        class: "btn btn-edit",
                        onclick: move |_| dispatch.send(Event::StartEdit(task.id)),
                        "Edit"
                    }
                    button {
                        class: "btn btn-danger",
                        onclick: move |_| dispatch.send(Event::SubmitDelete(task.id)),
                        "Delete"
                    }
                }
            }
        }
    }
}
