use dioxus::prelude::*;
use dioxus_router::use_navigator;

use duo_core::model::Session;

use crate::context::AppContext;
use crate::routes::Route;

/// Session gate for the pages behind the sidebar.
///
/// Returns the active session, or `None` after queueing a redirect to the
/// login page. Callers render a placeholder for the redirect frame.
#[must_use]
pub fn use_session(ctx: &AppContext) -> Option<Session> {
    let navigator = use_navigator();
    let session = ctx.auth().current();
    if session.is_none() {
        let _ = navigator.push(Route::Login {});
    }
    session
}

#[component]
pub fn SignedOutNotice() -> Element {
    rsx! {
        div { class: "page",
            p { "Please sign in to continue." }
        }
    }
}
