use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;

#[component]
pub fn NotFoundView(segments: Vec<String>) -> Element {
    let path = segments.join("/");

    rsx! {
        div { class: "page not-found",
            h2 { "Page not found" }
            p { "There is nothing at /{path}." }
            Link { class: "btn btn-primary", to: Route::Landing {}, "Back to the start" }
        }
    }
}
