use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{SignedOutNotice, ViewError, ViewState, use_session, view_state_from_resource};
use crate::vm::{LeaderboardRowVm, map_leaderboard_rows};

#[derive(Clone, Debug, PartialEq)]
struct LeaderboardData {
    rows: Vec<LeaderboardRowVm>,
}

#[component]
pub fn LeaderboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let Some(_session) = use_session(&ctx) else {
        return rsx! { SignedOutNotice {} };
    };
    let leaderboard = ctx.leaderboard();

    let resource = use_resource(move || {
        let leaderboard = leaderboard.clone();
        async move {
            let accounts = leaderboard
                .top_users()
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok(LeaderboardData {
                rows: map_leaderboard_rows(&accounts),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Leaderboard" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.rows.is_empty() {
                        p { "No learners ranked yet." }
                    } else {
                        ol { class: "leaderboard",
                            for row in data.rows {
                                li { class: "{row.row_class}",
                                    span { class: "rank__position", "#{row.rank}" }
                                    span { class: "rank__name", "{row.username}" }
                                    span { class: "rank__exp", "{row.exp_label}" }
                                }
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
