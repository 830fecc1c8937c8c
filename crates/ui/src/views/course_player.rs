use dioxus::prelude::*;
use dioxus_router::Link;

use duo_core::model::{AnswerId, CourseId, CourseType};
use duo_core::time::format_elapsed;
use services::{Attempt, AttemptError, AttemptOutcome};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{SignedOutNotice, ViewError, ViewState, use_session, view_state_from_resource};
use crate::vm::{AttemptIntent, AttemptSnapshot, snapshot_attempt};

#[component]
pub fn CoursePlayerView(course_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let Some(session) = use_session(&ctx) else {
        return rsx! { SignedOutNotice {} };
    };
    let account_id = session.account_id;
    let course_id = CourseId::new(course_id);
    let attempts = ctx.attempts();

    let attempt = use_signal(|| None::<Attempt>);
    let outcome = use_signal(|| None::<AttemptOutcome>);
    let error = use_signal(|| None::<ViewError>);

    let prior_resource = {
        let attempts = attempts.clone();
        use_resource(move || {
            let attempts = attempts.clone();
            async move {
                Ok::<_, ViewError>(attempts.prior_completion(account_id, course_id).await)
            }
        })
    };

    let attempts_for_resource = attempts.clone();
    let resource = use_resource(move || {
        let attempts = attempts_for_resource.clone();
        let mut attempt = attempt;
        let mut outcome = outcome;
        let mut error = error;
        async move {
            outcome.set(None);
            error.set(None);
            let started = attempts
                .start_attempt(account_id, course_id)
                .await
                .map_err(|err| match err {
                    AttemptError::EmptyCourse => ViewError::EmptyCourse,
                    _ => ViewError::Unknown,
                })?;
            attempt.set(Some(started));
            Ok::<_, ViewError>(())
        }
    });

    let dispatch = {
        let attempts = attempts.clone();
        use_callback(move |intent: AttemptIntent| {
            let mut attempt = attempt;
            let mut outcome = outcome;
            let mut error = error;

            match intent {
                AttemptIntent::Select(id) => {
                    if let Some(attempt) = attempt.write().as_mut() {
                        let _ = attempt.select_answer(AnswerId::new(id));
                    }
                }
                AttemptIntent::SetText(text) => {
                    if let Some(attempt) = attempt.write().as_mut() {
                        let _ = attempt.set_short_answer_text(text);
                    }
                }
                AttemptIntent::Submit => {
                    if let Some(attempt) = attempt.write().as_mut()
                        && let Err(err) = attempt.submit()
                    {
                        // An empty response keeps the question waiting; anything
                        // else should not happen from the rendered controls.
                        if !matches!(err, AttemptError::NoResponse) {
                            error.set(Some(ViewError::Unknown));
                        }
                    }
                }
                AttemptIntent::Continue => {
                    let finished = {
                        let mut guard = attempt.write();
                        match guard.as_mut() {
                            Some(attempt) => {
                                let _ = attempt.advance();
                                attempt.is_complete()
                            }
                            None => false,
                        }
                    };
                    if finished {
                        let attempts = attempts.clone();
                        spawn(async move {
                            let taken = attempt.write().take();
                            let Some(mut value) = taken else {
                                error.set(Some(ViewError::Unknown));
                                return;
                            };
                            let result = attempts.finalize(&mut value, account_id).await;
                            *attempt.write() = Some(value);
                            outcome.set(Some(result));
                        });
                    }
                }
                AttemptIntent::Retry => {
                    if let Some(attempt) = attempt.write().as_mut() {
                        attempt.reset();
                    }
                    outcome.set(None);
                }
            }
        })
    };

    let state = view_state_from_resource(&resource);
    let snapshot = attempt.read().as_ref().map(snapshot_attempt);
    let course_type = attempt
        .read()
        .as_ref()
        .map_or(CourseType::Singleplayer, Attempt::course_type);
    let outcome_state = outcome.read().clone();
    let prior_time = prior_resource
        .value()
        .read()
        .as_ref()
        .and_then(|value| value.as_ref().ok().copied())
        .flatten();
    let retake_note = (outcome_state.is_none())
        .then(|| prior_time.map(format_elapsed))
        .flatten();

    rsx! {
        div { class: "page player-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    Link { class: "btn btn-secondary", to: Route::Home {}, "Back to courses" }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(err) = *error.read() {
                        p { class: "form-error", "{err.message()}" }
                    }
                    if let Some(note) = &retake_note {
                        p { class: "player-retake", "You already finished this course in {note}." }
                    }
                    if let Some(result) = &outcome_state {
                        CompletionPanel {
                            outcome: result.clone(),
                            multiplayer: course_type == CourseType::Multiplayer,
                            on_intent: dispatch,
                        }
                    } else if let Some(snapshot) = snapshot {
                        QuestionPanel { snapshot, on_intent: dispatch }
                    } else {
                        p { "Loading..." }
                    }
                },
            }
        }
    }
}

#[component]
fn QuestionPanel(snapshot: AttemptSnapshot, on_intent: Callback<AttemptIntent>) -> Element {
    let progress_label = format!(
        "Question {} of {}",
        snapshot.index + 1,
        snapshot.total
    );
    let feedback = snapshot.feedback.clone();

    rsx! {
        header { class: "player-header",
            h2 { "{snapshot.title}" }
            span { class: "player-progress", "{progress_label}" }
        }
        if let Some(question) = &snapshot.question {
            div { class: "player-question",
                p { class: "player-question__content", "{question.content}" }
                if let Some(url) = &question.image_url {
                    img { class: "player-question__image", src: "{url}" }
                }
                if question.is_short_answer {
                    input {
                        class: "player-text-input",
                        id: "player-answer-input",
                        value: "{snapshot.typed}",
                        disabled: feedback.is_some(),
                        oninput: move |evt| on_intent.call(AttemptIntent::SetText(evt.value())),
                    }
                } else {
                    div { class: "player-options",
                        for (id, content) in question.options.clone() {
                            AnswerOption {
                                id,
                                content,
                                selected: snapshot.selected == Some(id),
                                frozen: feedback.is_some(),
                                on_intent,
                            }
                        }
                    }
                }
            }
            if let Some(feedback) = feedback {
                div {
                    class: if feedback.correct { "player-feedback player-feedback--correct" } else { "player-feedback player-feedback--wrong" },
                    p { class: "player-feedback__verdict",
                        if feedback.correct { "Correct!" } else { "Not quite. Try this one again." }
                    }
                    if let Some(expected) = &feedback.expected {
                        p { class: "player-feedback__expected", "Expected: {expected}" }
                    }
                    if !feedback.explanation.is_empty() {
                        p { class: "player-feedback__explanation", "{feedback.explanation}" }
                    }
                    button {
                        class: "btn btn-primary",
                        id: "player-continue",
                        r#type: "button",
                        onclick: move |_| on_intent.call(AttemptIntent::Continue),
                        "Continue"
                    }
                }
            } else {
                button {
                    class: "btn btn-primary",
                    id: "player-submit",
                    r#type: "button",
                    onclick: move |_| on_intent.call(AttemptIntent::Submit),
                    "Check"
                }
            }
        }
    }
}

#[component]
fn AnswerOption(
    id: u64,
    content: String,
    selected: bool,
    frozen: bool,
    on_intent: Callback<AttemptIntent>,
) -> Element {
    rsx! {
        button {
            class: if selected { "player-option player-option--selected" } else { "player-option" },
            r#type: "button",
            disabled: frozen,
            onclick: move |_| on_intent.call(AttemptIntent::Select(id)),
            "{content}"
        }
    }
}

#[component]
fn CompletionPanel(
    outcome: AttemptOutcome,
    multiplayer: bool,
    on_intent: Callback<AttemptIntent>,
) -> Element {
    let score_label = format!("{} / {}", outcome.score, outcome.total);
    let time_label = outcome.completion_time_seconds.map(format_elapsed);
    let back = if multiplayer {
        Route::Multiplayer {}
    } else {
        Route::Home {}
    };

    rsx! {
        div { class: "player-complete",
            if outcome.passed {
                h2 { "Course complete!" }
                p { class: "player-complete__score", "Score: {score_label}" }
                if multiplayer {
                    if let Some(time) = &time_label {
                        p { class: "player-complete__time", "Your time: {time}" }
                    } else {
                        p { class: "player-complete__time", "Your time will appear on the ranking shortly." }
                    }
                }
            } else {
                h2 { "Almost there" }
                p { class: "player-complete__score", "Score: {score_label}. You need 80% to pass." }
            }
            div { class: "player-complete__actions",
                button {
                    class: "btn btn-secondary",
                    id: "player-retry",
                    r#type: "button",
                    onclick: move |_| on_intent.call(AttemptIntent::Retry),
                    "Try again"
                }
                Link { class: "btn btn-primary", to: back.clone(), "Back" }
            }
        }
    }
}
