use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn LandingView() -> Element {
    let ctx = use_context::<AppContext>();
    let signed_in = ctx.auth().current().is_some();

    rsx! {
        div { class: "page landing",
            h2 { "Duomonggo" }
            p { "Learn a language one course at a time." }
            div { class: "landing__actions",
                if signed_in {
                    Link { class: "btn btn-primary", to: Route::Home {}, "Go to courses" }
                } else {
                    Link { class: "btn btn-primary", to: Route::Login {}, "Sign in" }
                    Link { class: "btn btn-secondary", to: Route::Register {}, "Create account" }
                }
            }
        }
    }
}
