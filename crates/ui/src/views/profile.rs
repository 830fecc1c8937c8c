use dioxus::prelude::*;

use api::gateway::ProfileUpdate;
use duo_core::model::Account;

use crate::context::AppContext;
use crate::views::{SignedOutNotice, ViewError, ViewState, use_session, view_state_from_resource};

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let Some(session) = use_session(&ctx) else {
        return rsx! { SignedOutNotice {} };
    };
    let account_id = session.account_id;

    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut seeded = use_signal(|| false);
    let mut notice = use_signal(|| None::<Result<(), String>>);
    let mut busy = use_signal(|| false);

    let resource = {
        let auth = ctx.auth();
        use_resource(move || {
            let auth = auth.clone();
            async move {
                auth.account(account_id)
                    .await
                    .map_err(|_| ViewError::Unknown)
            }
        })
    };

    let state = view_state_from_resource(&resource);

    // Seed the form once from the loaded account; later edits win.
    if let ViewState::Ready(account) = &state
        && !seeded()
    {
        seeded.set(true);
        username.set(account.username.clone());
        email.set(account.email.clone());
    }

    let on_submit = {
        let auth = ctx.auth();
        move |evt: FormEvent| {
            evt.prevent_default();
            if busy() {
                return;
            }
            let auth = auth.clone();
            let mut resource = resource;
            spawn(async move {
                busy.set(true);
                let update = ProfileUpdate {
                    username: username(),
                    email: email(),
                    password: {
                        let value = password();
                        (!value.is_empty()).then_some(value)
                    },
                };
                let result = auth.update_profile(account_id, update).await;
                busy.set(false);
                match result {
                    Ok(_) => {
                        notice.set(Some(Ok(())));
                        password.set(String::new());
                        resource.restart();
                    }
                    Err(err) => notice.set(Some(Err(err.to_string()))),
                }
            });
        }
    };

    rsx! {
        div { class: "page",
            h2 { "Profile" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(account) => rsx! {
                    ProfileSummary { account: account.clone() }
                    form { class: "profile-form", onsubmit: on_submit,
                        label { r#for: "profile-username", "Username" }
                        input {
                            id: "profile-username",
                            value: "{username}",
                            oninput: move |evt| username.set(evt.value()),
                        }
                        label { r#for: "profile-email", "Email" }
                        input {
                            id: "profile-email",
                            r#type: "email",
                            value: "{email}",
                            oninput: move |evt| email.set(evt.value()),
                        }
                        label { r#for: "profile-password", "New password (leave blank to keep)" }
                        input {
                            id: "profile-password",
                            r#type: "password",
                            value: "{password}",
                            oninput: move |evt| password.set(evt.value()),
                        }
                        match notice() {
                            Some(Ok(())) => rsx! {
                                p { class: "form-success", "Profile saved." }
                            },
                            Some(Err(message)) => rsx! {
                                p { class: "form-error", "{message}" }
                            },
                            None => rsx! {},
                        }
                        button { class: "btn btn-primary", r#type: "submit", disabled: busy(),
                            if busy() { "Saving..." } else { "Save changes" }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn ProfileSummary(account: Account) -> Element {
    rsx! {
        div { class: "profile-summary",
            if let Some(url) = &account.image_url {
                img { class: "profile-summary__avatar", src: "{url}" }
            }
            p { class: "profile-summary__name", "{account.username}" }
            p { class: "profile-summary__exp", "Experience: {account.exp} XP" }
        }
    }
}
