use dioxus::prelude::*;
use dioxus_router::use_navigator;

use duo_core::model::CourseId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{SignedOutNotice, ViewError, ViewState, use_session, view_state_from_resource};
use crate::vm::{CourseCardVm, map_course_cards};

#[derive(Clone, Debug, PartialEq)]
struct HomeCard {
    card: CourseCardVm,
    completed: bool,
}

#[derive(Clone, Debug, PartialEq)]
struct HomeData {
    cards: Vec<HomeCard>,
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let Some(session) = use_session(&ctx) else {
        return rsx! { SignedOutNotice {} };
    };
    let account_id = session.account_id;
    let catalog = ctx.catalog();

    let resource = {
        let catalog = catalog.clone();
        use_resource(move || {
            let catalog = catalog.clone();
            async move {
                let courses = catalog
                    .list_singleplayer()
                    .await
                    .map_err(|_| ViewError::Unknown)?;
                let mut completed = Vec::with_capacity(courses.len());
                for course in &courses {
                    completed.push(catalog.enrollment_completed(account_id, course.id).await);
                }
                let cards = map_course_cards(&courses, |course| catalog.startable(course))
                    .into_iter()
                    .zip(completed)
                    .map(|(card, completed)| HomeCard { card, completed })
                    .collect();
                Ok(HomeData { cards })
            }
        })
    };

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Courses" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.cards.is_empty() {
                        p { "No courses available yet." }
                    } else {
                        ul { class: "course-grid",
                            for item in data.cards {
                                CourseCard { item }
                            }
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
fn CourseCard(item: HomeCard) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let course_id = item.card.id;
    let account_id = ctx.auth().current().map(|session| session.account_id);

    let on_start = {
        let catalog = ctx.catalog();
        move |_| {
            let catalog = catalog.clone();
            spawn(async move {
                if let Some(account_id) = account_id {
                    catalog
                        .start_enrollment(account_id, CourseId::new(course_id))
                        .await;
                }
                let _ = navigator.push(Route::CoursePlayer { course_id });
            });
        }
    };

    rsx! {
        li { class: "course-card",
            div { class: "course-card__header",
                h3 { "{item.card.title}" }
                span { class: "{item.card.difficulty_class}", "{item.card.difficulty_label}" }
            }
            p { class: "course-card__description", "{item.card.description}" }
            if let Some(exp) = &item.card.exp_label {
                p { class: "course-card__exp", "{exp}" }
            }
            if item.completed {
                span { class: "course-card__done", "Completed" }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: on_start,
                if item.completed { "Review" } else { "Start" }
            }
        }
    }
}
