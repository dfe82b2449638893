//! Auth screen with email/password form.

use dioxus::prelude::*;
use state::Event;
use ui::{use_app, use_dispatch, NoticeBanner};

use crate::Route;

/// Login page component. Sign In submits the form; Sign Up registers the
/// same credentials and leaves the user awaiting email verification.
#[component]
pub fn Login() -> Element {
    let app = use_app();
    let dispatch = use_dispatch();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let nav = use_navigator();

    // Already signed in: go straight to the task list.
    if app().session.is_some() {
        nav.replace(Route::Tasks {});
    }

    let handle_sign_in = move |evt: FormEvent| {
        evt.prevent_default();
        dispatch.send(Event::SubmitSignIn {
            email: email(),
            password: password(),
        });
    };

    let handle_sign_up = move |_| {
        dispatch.send(Event::SubmitSignUp {
            email: email(),
            password: password(),
        });
    };

    rsx! {
        div {
            class: "auth-screen",

            h1 { class: "auth-heading", "WELCOME!" }

            form {
                class: "auth-form",
                onsubmit: handle_sign_in,

                NoticeBanner {}

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt| email.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt| password.set(evt.value()),
                }
                button { class: "btn btn-primary", r#type: "submit", "Sign In" }
                button {
                    class: "btn btn-success",
                    r#type: "button",
                    onclick: handle_sign_up,
                    "Sign Up"
                }
            }
        }
    }
}
