use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn RegisterView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
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
                let result = auth.register(&username(), &email(), &password()).await;
                busy.set(false);
                match result {
                    Ok(_) => {
                        // Registration does not sign in; the learner logs in next.
                        error.set(None);
                        let _ = navigator.push(Route::Login {});
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        }
    };

    rsx! {
        div { class: "page auth-page",
            h2 { "Create account" }
            form { class: "auth-form", onsubmit: on_submit,
                label { r#for: "register-username", "Username" }
                input {
                    id: "register-username",
                    value: "{username}",
                    oninput: move |evt| username.set(evt.value()),
                }
                label { r#for: "register-email", "Email" }
                input {
                    id: "register-email",
                    r#type: "email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { r#for: "register-password", "Password" }
                input {
                    id: "register-password",
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }
                button { class: "btn btn-primary", r#type: "submit", disabled: busy(),
                    if busy() { "Creating..." } else { "Create account" }
                }
            }
            p {
                "Already registered? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}
