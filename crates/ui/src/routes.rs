use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};

use crate::context::AppContext;
use crate::views::{
    AdminView, CoursePlayerView, HomeView, LandingView, LeaderboardView, LoginView,
    MultiplayerView, NotFoundView, ProfileView, RegisterView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/", LandingView)] Landing {},
    #[route("/login", LoginView)] Login {},
    #[route("/register", RegisterView)] Register {},
    #[layout(Layout)]
        #[route("/courses", HomeView)] Home {},
        #[route("/courses/:course_id", CoursePlayerView)] CoursePlayer { course_id: u64 },
        #[route("/multiplayer", MultiplayerView)] Multiplayer {},
        #[route("/leaderboard", LeaderboardView)] Leaderboard {},
        #[route("/profile", ProfileView)] Profile {},
        #[route("/admin", AdminView)] Admin {},
    #[end_layout]
    #[route("/:..segments", NotFoundView)] NotFound { segments: Vec<String> },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let session = ctx.auth().current();
    let is_admin = session.as_ref().is_some_and(|session| session.is_admin());
    let username = session.map_or_else(String::new, |session| session.username);
    let auth = ctx.auth();

    rsx! {
        nav { class: "sidebar",
            h1 { "Duomonggo" }
            if !username.is_empty() {
                p { class: "sidebar__user", "{username}" }
            }
            ul {
                li { Link { to: Route::Home {}, "Courses" } }
                li { Link { to: Route::Multiplayer {}, "Multiplayer" } }
                li { Link { to: Route::Leaderboard {}, "Leaderboard" } }
                li { Link { to: Route::Profile {}, "Profile" } }
                if is_admin {
                    li { Link { to: Route::Admin {}, "Admin" } }
                }
            }
            button {
                class: "sidebar__logout",
                r#type: "button",
                onclick: move |_| {
                    if auth.logout().is_ok() {
                        let _ = navigator.push(Route::Landing {});
                    }
                },
                "Log out"
            }
        }
    }
}
