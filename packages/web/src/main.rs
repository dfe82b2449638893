use dioxus::prelude::*;

use ui::AppProvider;
use views::{Login, Tasks};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/tasks")]
    Tasks {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AppProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to the task list; its auth guard bounces to login.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Tasks {});
    rsx! {}
}
