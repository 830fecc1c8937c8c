use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let on_submit = {
        let auth = ctx.auth();
        move |evt: FormEvent| {
            evt.prevent_default();
            if busy() {
                return;
            }
            let auth = auth.clone();
            spawn(async move {
                busy.set(true);
                let result = auth.login(&username(), &password()).await;
                busy.set(false);
                match result {
                    Ok(_) => {
                        error.set(None);
                        let _ = navigator.push(Route::Home {});
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        }
    };

    rsx! {
        div { class: "page auth-page",
            h2 { "Sign in" }
            form { class: "auth-form", onsubmit: on_submit,
                label { r#for: "login-username", "Username" }
                input {
                    id: "login-username",
                    value: "{username}",
                    oninput: move |evt| username.set(evt.value()),
                }
                label { r#for: "login-password", "Password" }
                input {
                    id: "login-password",
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }
                button { class: "btn btn-primary", r#type: "submit", disabled: busy(),
                    if busy() { "Signing in..." } else { "Sign in" }
                }
            }
            p {
                "New here? "
                Link { to: Route::Register {}, "Create an account" }
            }
        }
    }
}
