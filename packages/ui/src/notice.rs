//! Banner for the pending user-facing notice (auth and upload outcomes).

use dioxus::prelude::*;
use state::{Event, NoticeKind};

use crate::{use_app, use_dispatch};

/// Shows the app's current [`state::Notice`], if any, with a dismiss button.
#[component]
pub fn NoticeBanner() -> Element {
    let app = use_app();
    let dispatch = use_dispatch();

    let Some(notice) = app().notice else {
        return rsx! {};
    };
    let class = match notice.kind {
        NoticeKind::Info => "notice notice-info",
        NoticeKind::Error => "notice notice-error",
    };

    rsx! {
        div {
            class: "{class}",
            span { "{notice.message}" }
            button {
                class: "notice-dismiss",
                onclick: move |_| dispatch.send(Event::DismissNotice),
                "Dismiss"
            }
        }
    }
}
