use dioxus::prelude::*;
use dioxus_router::use_navigator;

use duo_core::model::CourseId;
use duo_core::time::format_elapsed;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{SignedOutNotice, ViewError, ViewState, use_session, view_state_from_resource};
use crate::vm::{CourseCardVm, map_course_cards};

#[derive(Clone, Debug, PartialEq)]
struct MultiplayerCard {
    card: CourseCardVm,
    /// Recorded time from an earlier pass, pre-formatted.
    best_time: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
struct MultiplayerData {
    cards: Vec<MultiplayerCard>,
}

#[derive(Clone, Debug, PartialEq)]
struct RankingRow {
    rank: usize,
    username: String,
    time_label: String,
}

#[component]
pub fn MultiplayerView() -> Element {
    let ctx = use_context::<AppContext>();
    let Some(session) = use_session(&ctx) else {
        return rsx! { SignedOutNotice {} };
    };
    let account_id = session.account_id;
    let selected = use_signal(|| None::<u64>);

    let resource = {
        let catalog = ctx.catalog();
        let attempts = ctx.attempts();
        use_resource(move || {
            let catalog = catalog.clone();
            let attempts = attempts.clone();
            async move {
                let courses = catalog
                    .list_multiplayer()
                    .await
                    .map_err(|_| ViewError::Unknown)?;
                let mut best_times = Vec::with_capacity(courses.len());
                for course in &courses {
                    best_times.push(
                        attempts
                            .prior_completion(account_id, course.id)
                            .await
                            .map(format_elapsed),
                    );
                }
                let cards = map_course_cards(&courses, |course| catalog.startable(course))
                    .into_iter()
                    .zip(best_times)
                    .map(|(card, best_time)| MultiplayerCard { card, best_time })
                    .collect();
                Ok(MultiplayerData { cards })
            }
        })
    };

    let ranking_resource = {
        let catalog = ctx.catalog();
        use_resource(move || {
            let catalog = catalog.clone();
            let course_id = selected();
            async move {
                let Some(course_id) = course_id else {
                    return Ok(Vec::new());
                };
                let entries = catalog
                    .course_times(CourseId::new(course_id))
                    .await
                    .map_err(|_| ViewError::Unknown)?;
                Ok::<_, ViewError>(
                    entries
                        .iter()
                        .enumerate()
                        .map(|(index, entry)| RankingRow {
                            rank: index + 1,
                            username: entry.username.clone(),
                            time_label: format_elapsed(entry.completion_time),
                        })
                        .collect(),
                )
            }
        })
    };

    let state = view_state_from_resource(&resource);
    let ranking_state = view_state_from_resource(&ranking_resource);

    rsx! {
        div { class: "page",
            h2 { "Multiplayer" }
            p { class: "page-subtitle", "Race the clock before the deadline closes." }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.cards.is_empty() {
                        p { "No multiplayer courses right now." }
                    } else {
                        ul { class: "course-grid",
                            for item in data.cards {
                                MultiplayerCourseCard { item, selected }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }

            if selected().is_some() {
                section { class: "ranking",
                    h3 { "Fastest times" }
                    match ranking_state {
                        ViewState::Ready(rows) => rsx! {
                            if rows.is_empty() {
                                p { "No one has finished this course yet." }
                            } else {
                                ol { class: "ranking__list",
                                    for row in rows {
                                        li {
                                            span { class: "ranking__rank", "#{row.rank}" }
                                            span { class: "ranking__name", "{row.username}" }
                                            span { class: "ranking__time", "{row.time_label}" }
                                        }
                                    }
                                }
                            }
                        },
                        ViewState::Error(err) => rsx! {
                            p { "{err.message()}" }
                        },
                        _ => rsx! {
                            p { "Loading..." }
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn MultiplayerCourseCard(item: MultiplayerCard, selected: Signal<Option<u64>>) -> Element {
    let navigator = use_navigator();
    let course_id = item.card.id;
    let mut selected = selected;

    rsx! {
        li { class: "course-card course-card--multiplayer",
            div { class: "course-card__header",
                h3 { "{item.card.title}" }
                span { class: "{item.card.difficulty_class}", "{item.card.difficulty_label}" }
            }
            p { class: "course-card__description", "{item.card.description}" }
            if let Some(deadline) = &item.card.deadline_label {
                p { class: "course-card__deadline", "Closes {deadline}" }
            }
            if let Some(best) = &item.best_time {
                p { class: "course-card__retake", "You finished in {best}. Play again?" }
            }
            div { class: "course-card__actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: !item.card.startable,
                    onclick: move |_| {
                        let _ = navigator.push(Route::CoursePlayer { course_id });
                    },
                    if item.card.startable { "Start" } else { "Closed" }
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| selected.set(Some(course_id)),
                    "Times"
                }
            }
        }
    }
}
