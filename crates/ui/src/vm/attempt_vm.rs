use duo_core::model::{QuestionType, Response};
use services::Attempt;

/// What the learner can do from the player view.
#[derive(Clone, Debug, PartialEq)]
pub enum AttemptIntent {
    Select(u64),
    SetText(String),
    Submit,
    Continue,
    Retry,
}

/// Cloneable render snapshot of an [`Attempt`].
///
/// The attempt itself lives in a signal and is mutated by intents; the view
/// renders from this copy so rsx never borrows the signal across awaits.
#[derive(Clone, Debug, PartialEq)]
pub struct AttemptSnapshot {
    pub title: String,
    pub index: usize,
    pub total: usize,
    pub score: usize,
    pub completed: bool,
    pub question: Option<QuestionVm>,
    pub feedback: Option<FeedbackVm>,
    pub selected: Option<u64>,
    pub typed: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionVm {
    pub content: String,
    pub image_url: Option<String>,
    pub is_short_answer: bool,
    /// `(answer id, content)` in presentation order. Empty for short answers.
    pub options: Vec<(u64, String)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub explanation: String,
    /// Shown after a wrong short answer so the learner can retype it.
    pub expected: Option<String>,
}

#[must_use]
pub fn snapshot_attempt(attempt: &Attempt) -> AttemptSnapshot {
    let question = attempt.current_question().map(|question| QuestionVm {
        content: question.content.clone(),
        image_url: question.image_url.clone(),
        is_short_answer: question.question_type == QuestionType::ShortAnswer,
        options: if question.question_type == QuestionType::MultipleChoice {
            question
                .answers
                .iter()
                .map(|answer| (answer.id.value(), answer.content.clone()))
                .collect()
        } else {
            Vec::new()
        },
    });

    let feedback = attempt.feedback().map(|correct| {
        let current = attempt.current_question();
        FeedbackVm {
            correct,
            explanation: current
                .map(|question| question.explanation.clone())
                .unwrap_or_default(),
            expected: if correct {
                None
            } else {
                current
                    .filter(|question| question.question_type == QuestionType::ShortAnswer)
                    .and_then(|question| question.correct_answer())
                    .map(|answer| answer.content.clone())
            },
        }
    });

    let (selected, typed) = match attempt.response() {
        Some(Response::Choice(id)) => (Some(id.value()), String::new()),
        Some(Response::Text(text)) => (None, text.clone()),
        None => (None, String::new()),
    };

    AttemptSnapshot {
        title: attempt.title().to_string(),
        index: attempt.current_index(),
        total: attempt.total_questions(),
        score: attempt.score(),
        completed: attempt.is_complete(),
        question,
        feedback,
        selected,
        typed,
    }
}
