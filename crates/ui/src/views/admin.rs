use chrono::NaiveDateTime;
use dioxus::prelude::*;

use api::gateway::QuestionDraft;
use duo_core::model::{
    CourseDraft, CourseId, CourseType, Difficulty, QuestionId, QuestionType,
};

use crate::context::AppContext;
use crate::views::{SignedOutNotice, ViewError, ViewState, use_session, view_state_from_resource};

const DEADLINE_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Clone, Debug, PartialEq)]
struct CourseRow {
    id: u64,
    title: String,
    type_label: &'static str,
    difficulty: Difficulty,
    description: String,
    exp_reward: u32,
    course_type: CourseType,
    deadline: Option<NaiveDateTime>,
}

#[component]
pub fn AdminView() -> Element {
    let ctx = use_context::<AppContext>();
    let Some(session) = use_session(&ctx) else {
        return rsx! { SignedOutNotice {} };
    };
    if !session.is_admin() {
        return rsx! {
            div { class: "page",
                h2 { "Admin" }
                p { "This page is for administrators only." }
            }
        };
    }

    let refresh = use_signal(|| 0u32);
    let mut editing = use_signal(|| None::<u64>);
    let selected = use_signal(|| None::<u64>);

    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut difficulty = use_signal(|| Difficulty::Easy);
    let mut exp_reward = use_signal(|| "0".to_string());
    let mut course_type = use_signal(|| CourseType::Singleplayer);
    let mut deadline = use_signal(String::new);
    let mut form_error = use_signal(|| None::<String>);

    let resource = {
        let admin = ctx.admin();
        use_resource(move || {
            let admin = admin.clone();
            let _ = refresh();
            async move {
                let courses = admin.list_courses().await.map_err(|_| ViewError::Unknown)?;
                Ok::<_, ViewError>(
                    courses
                        .iter()
                        .map(|course| CourseRow {
                            id: course.id.value(),
                            title: course.title.clone(),
                            type_label: match course.course_type {
                                CourseType::Singleplayer => "Singleplayer",
                                CourseType::Multiplayer => "Multiplayer",
                            },
                            difficulty: course.difficulty,
                            description: course.description.clone(),
                            exp_reward: course.exp_reward,
                            course_type: course.course_type,
                            deadline: course.deadline,
                        })
                        .collect::<Vec<_>>(),
                )
            }
        })
    };

    let state = view_state_from_resource(&resource);

    let clear_form = move || {
        let mut editing = editing;
        let mut title = title;
        let mut description = description;
        let mut difficulty = difficulty;
        let mut exp_reward = exp_reward;
        let mut course_type = course_type;
        let mut deadline = deadline;
        let mut form_error = form_error;
        editing.set(None);
        title.set(String::new());
        description.set(String::new());
        difficulty.set(Difficulty::Easy);
        exp_reward.set("0".to_string());
        course_type.set(CourseType::Singleplayer);
        deadline.set(String::new());
        form_error.set(None);
    };

    let on_submit = {
        let admin = ctx.admin();
        move |evt: FormEvent| {
            evt.prevent_default();
            let parsed_deadline = {
                let raw = deadline();
                if raw.is_empty() {
                    None
                } else {
                    match NaiveDateTime::parse_from_str(&raw, DEADLINE_INPUT_FORMAT) {
                        Ok(value) => Some(value),
                        Err(_) => {
                            form_error.set(Some("Deadline must be a valid date".into()));
                            return;
                        }
                    }
                }
            };
            let Ok(exp) = exp_reward().parse::<u32>() else {
                form_error.set(Some("Reward must be a number".into()));
                return;
            };
            let draft = CourseDraft {
                title: title(),
                description: description(),
                difficulty: difficulty(),
                exp_reward: exp,
                course_type: course_type(),
                deadline: parsed_deadline,
            };

            let admin = admin.clone();
            let mut refresh = refresh;
            spawn(async move {
                let result = match editing() {
                    Some(id) => admin.update_course(CourseId::new(id), draft).await,
                    None => admin.create_course(draft).await,
                };
                match result {
                    Ok(_) => {
                        clear_form();
                        refresh += 1;
                    }
                    Err(err) => form_error.set(Some(err.to_string())),
                }
            });
        }
    };

    rsx! {
        div { class: "page admin-page",
            h2 { "Admin" }

            section { class: "admin-form",
                h3 { if editing().is_some() { "Edit course" } else { "New course" } }
                form { onsubmit: on_submit,
                    label { r#for: "admin-title", "Title" }
                    input {
                        id: "admin-title",
                        value: "{title}",
                        oninput: move |evt| title.set(evt.value()),
                    }
                    label { r#for: "admin-description", "Description" }
                    textarea {
                        id: "admin-description",
                        value: "{description}",
                        oninput: move |evt| description.set(evt.value()),
                    }
                    label { r#for: "admin-difficulty", "Difficulty" }
                    select {
                        id: "admin-difficulty",
                        onchange: move |evt| {
                            difficulty.set(match evt.value().as_str() {
                                "MEDIUM" => Difficulty::Medium,
                                "HARD" => Difficulty::Hard,
                                _ => Difficulty::Easy,
                            });
                        },
                        option { value: "EASY", selected: difficulty() == Difficulty::Easy, "Easy" }
                        option { value: "MEDIUM", selected: difficulty() == Difficulty::Medium, "Medium" }
                        option { value: "HARD", selected: difficulty() == Difficulty::Hard, "Hard" }
                    }
                    label { r#for: "admin-type", "Type" }
                    select {
                        id: "admin-type",
                        onchange: move |evt| {
                            course_type.set(if evt.value() == "MULTIPLAYER" {
                                CourseType::Multiplayer
                            } else {
                                CourseType::Singleplayer
                            });
                        },
                        option {
                            value: "SINGLEPLAYER",
                            selected: course_type() == CourseType::Singleplayer,
                            "Singleplayer"
                        }
                        option {
                            value: "MULTIPLAYER",
                            selected: course_type() == CourseType::Multiplayer,
                            "Multiplayer"
                        }
                    }
                    if course_type() == CourseType::Singleplayer {
                        label { r#for: "admin-exp", "XP reward" }
                        input {
                            id: "admin-exp",
                            value: "{exp_reward}",
                            oninput: move |evt| exp_reward.set(evt.value()),
                        }
                    } else {
                        label { r#for: "admin-deadline", "Deadline" }
                        input {
                            id: "admin-deadline",
                            r#type: "datetime-local",
                            value: "{deadline}",
                            oninput: move |evt| deadline.set(evt.value()),
                        }
                    }
                    if let Some(message) = form_error() {
                        p { class: "form-error", "{message}" }
                    }
                    div { class: "admin-form__actions",
                        button { class: "btn btn-primary", r#type: "submit",
                            if editing().is_some() { "Save course" } else { "Create course" }
                        }
                        if editing().is_some() {
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| clear_form(),
                                "Cancel"
                            }
                        }
                    }
                }
            }

            section { class: "admin-list",
                h3 { "Courses" }
                match state {
                    ViewState::Ready(rows) => rsx! {
                        if rows.is_empty() {
                            p { "No courses yet." }
                        } else {
                            ul {
                                for row in rows {
                                    AdminCourseRow {
                                        row,
                                        refresh,
                                        selected,
                                        on_edit: move |row: CourseRow| {
                                            editing.set(Some(row.id));
                                            title.set(row.title.clone());
                                            description.set(row.description.clone());
                                            difficulty.set(row.difficulty);
                                            exp_reward.set(row.exp_reward.to_string());
                                            course_type.set(row.course_type);
                                            deadline.set(
                                                row.deadline
                                                    .map(|value| value.format(DEADLINE_INPUT_FORMAT).to_string())
                                                    .unwrap_or_default(),
                                            );
                                        },
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

            if let Some(course_id) = selected() {
                QuestionEditor { course_id }
            }
        }
    }
}

#[component]
fn AdminCourseRow(
    row: CourseRow,
    refresh: Signal<u32>,
    selected: Signal<Option<u64>>,
    on_edit: EventHandler<CourseRow>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let course_id = row.id;
    let mut selected = selected;
    let row_for_edit = row.clone();

    let on_delete = {
        let admin = ctx.admin();
        move |_| {
            let admin = admin.clone();
            let mut refresh = refresh;
            spawn(async move {
                if admin.delete_course(CourseId::new(course_id)).await.is_ok() {
                    refresh += 1;
                }
            });
        }
    };

    rsx! {
        li { class: "admin-course",
            span { class: "admin-course__title", "{row.title}" }
            span { class: "admin-course__type", "{row.type_label}" }
            div { class: "admin-course__actions",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_edit.call(row_for_edit.clone()),
                    "Edit"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| selected.set(Some(course_id)),
                    "Questions"
                }
                button {
                    class: "btn btn-danger",
                    r#type: "button",
                    onclick: on_delete,
                    "Delete"
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct QuestionRow {
    id: u64,
    content: String,
    type_label: &'static str,
    answer_count: usize,
}

#[component]
fn QuestionEditor(course_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let course_id = CourseId::new(course_id);
    let refresh = use_signal(|| 0u32);

    let mut content = use_signal(String::new);
    let mut explanation = use_signal(String::new);
    let mut order_number = use_signal(|| "1".to_string());
    let mut question_type = use_signal(|| QuestionType::MultipleChoice);
    let mut options = use_signal(|| vec![String::new(), String::new(), String::new(), String::new()]);
    let mut correct_index = use_signal(|| 0usize);
    let mut expected = use_signal(String::new);
    let mut form_error = use_signal(|| None::<String>);

    let resource = {
        let admin = ctx.admin();
        use_resource(move || {
            let admin = admin.clone();
            let _ = refresh();
            async move {
                let questions = admin
                    .list_questions(course_id)
                    .await
                    .map_err(|_| ViewError::Unknown)?;
                Ok::<_, ViewError>(
                    questions
                        .iter()
                        .map(|question| QuestionRow {
                            id: question.id.value(),
                            content: question.content.clone(),
                            type_label: match question.question_type {
                                QuestionType::MultipleChoice => "Multiple choice",
                                QuestionType::ShortAnswer => "Short answer",
                            },
                            answer_count: question.answers.len(),
                        })
                        .collect::<Vec<_>>(),
                )
            }
        })
    };

    let state = view_state_from_resource(&resource);

    let on_submit = {
        let admin = ctx.admin();
        move |evt: FormEvent| {
            evt.prevent_default();
            let Ok(order) = order_number().parse::<u32>() else {
                form_error.set(Some("Order must be a number".into()));
                return;
            };
            let answers: Vec<(String, bool)> = match question_type() {
                QuestionType::MultipleChoice => {
                    let filled: Vec<(usize, String)> = options()
                        .into_iter()
                        .enumerate()
                        .filter(|(_, option)| !option.trim().is_empty())
                        .collect();
                    if filled.len() < 2 {
                        form_error.set(Some("Give at least two options".into()));
                        return;
                    }
                    let correct = correct_index();
                    if !filled.iter().any(|(index, _)| *index == correct) {
                        form_error.set(Some("Mark one filled option as correct".into()));
                        return;
                    }
                    filled
                        .into_iter()
                        .map(|(index, option)| (option, index == correct))
                        .collect()
                }
                QuestionType::ShortAnswer => {
                    let value = expected();
                    if value.trim().is_empty() {
                        form_error.set(Some("Give the expected answer".into()));
                        return;
                    }
                    vec![(value, true)]
                }
            };

            let draft = QuestionDraft {
                course_id,
                content: content(),
                image_url: None,
                question_type: question_type(),
                explanation: explanation(),
                order_number: order,
            };

            let admin = admin.clone();
            let mut refresh = refresh;
            spawn(async move {
                match admin.create_question_with_answers(draft, answers).await {
                    Ok(_) => {
                        content.set(String::new());
                        explanation.set(String::new());
                        expected.set(String::new());
                        options.set(vec![
                            String::new(),
                            String::new(),
                            String::new(),
                            String::new(),
                        ]);
                        form_error.set(None);
                        refresh += 1;
                    }
                    Err(err) => form_error.set(Some(err.to_string())),
                }
            });
        }
    };

    rsx! {
        section { class: "admin-questions",
            h3 { "Questions" }
            match state {
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { "No questions yet." }
                    } else {
                        ul {
                            for row in rows {
                                AdminQuestionRow { row, refresh }
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

            form { class: "admin-question-form", onsubmit: on_submit,
                label { r#for: "question-content", "Question" }
                input {
                    id: "question-content",
                    value: "{content}",
                    oninput: move |evt| content.set(evt.value()),
                }
                label { r#for: "question-order", "Order" }
                input {
                    id: "question-order",
                    value: "{order_number}",
                    oninput: move |evt| order_number.set(evt.value()),
                }
                label { r#for: "question-type", "Type" }
                select {
                    id: "question-type",
                    onchange: move |evt| {
                        question_type.set(if evt.value() == "SHORT_ANSWER" {
                            QuestionType::ShortAnswer
                        } else {
                            QuestionType::MultipleChoice
                        });
                    },
                    option {
                        value: "MULTIPLE_CHOICE",
                        selected: question_type() == QuestionType::MultipleChoice,
                        "Multiple choice"
                    }
                    option {
                        value: "SHORT_ANSWER",
                        selected: question_type() == QuestionType::ShortAnswer,
                        "Short answer"
                    }
                }
                if question_type() == QuestionType::MultipleChoice {
                    for (index, value) in options().into_iter().enumerate() {
                        div { class: "admin-option",
                            input {
                                value: "{value}",
                                placeholder: "Option",
                                oninput: move |evt| options.write()[index] = evt.value(),
                            }
                            input {
                                r#type: "radio",
                                name: "correct-option",
                                checked: correct_index() == index,
                                onchange: move |_| correct_index.set(index),
                            }
                        }
                    }
                } else {
                    label { r#for: "question-expected", "Expected answer" }
                    input {
                        id: "question-expected",
                        value: "{expected}",
                        oninput: move |evt| expected.set(evt.value()),
                    }
                }
                label { r#for: "question-explanation", "Explanation" }
                input {
                    id: "question-explanation",
                    value: "{explanation}",
                    oninput: move |evt| explanation.set(evt.value()),
                }
                if let Some(message) = form_error() {
                    p { class: "form-error", "{message}" }
                }
                button { class: "btn btn-primary", r#type: "submit", "Add question" }
            }
        }
    }
}

#[component]
fn AdminQuestionRow(row: QuestionRow, refresh: Signal<u32>) -> Element {
    let ctx = use_context::<AppContext>();
    let question_id = row.id;

    let on_delete = {
        let admin = ctx.admin();
        move |_| {
            let admin = admin.clone();
            let mut refresh = refresh;
            spawn(async move {
                if admin
                    .delete_question(QuestionId::new(question_id))
                    .await
                    .is_ok()
                {
                    refresh += 1;
                }
            });
        }
    };

    rsx! {
        li { class: "admin-question",
            span { "{row.content}" }
            span { class: "admin-question__meta", "{row.type_label} · {row.answer_count} answers" }
            button {
                class: "btn btn-danger",
                r#type: "button",
                onclick: on_delete,
                "Delete"
            }
        }
    }
}
