use serde::{Deserialize, Serialize};

use crate::model::ids::{AnswerId, QuestionId};

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    MultipleChoice,
    ShortAnswer,
}

/// One answer option belonging to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: AnswerId,
    pub content: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// A question within a course, with its ordered answer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub question_type: QuestionType,
    /// Shown after a correct submission.
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub order_number: u32,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

//
// ─── RESPONSES AND GRADING ─────────────────────────────────────────────────────
//

/// A learner's response, tagged by input kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A selected option for a multiple-choice question.
    Choice(AnswerId),
    /// Typed text for a short-answer question.
    Text(String),
}

impl Response {
    /// True when there is nothing to grade yet (no selection / blank text).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Response::Choice(_) => false,
            Response::Text(text) => text.trim().is_empty(),
        }
    }
}

impl Question {
    /// Grade a response against this question's answer set.
    ///
    /// Multiple choice: correctness is the selected answer's flag; an unknown
    /// answer id grades false. Short answer: case-insensitive, whitespace-
    /// trimmed equality with the answer flagged correct; a question with no
    /// flagged answer grades false.
    #[must_use]
    pub fn grade(&self, response: &Response) -> bool {
        match (self.question_type, response) {
            (QuestionType::MultipleChoice, Response::Choice(answer_id)) => self
                .answers
                .iter()
                .find(|answer| answer.id == *answer_id)
                .is_some_and(|answer| answer.is_correct),
            (QuestionType::ShortAnswer, Response::Text(text)) => self
                .answers
                .iter()
                .find(|answer| answer.is_correct)
                .is_some_and(|answer| {
                    answer.content.trim().to_lowercase() == text.trim().to_lowercase()
                }),
            // Mismatched input kind for the question type.
            _ => false,
        }
    }

    /// The answer flagged correct, when one exists.
    #[must_use]
    pub fn correct_answer(&self) -> Option<&Answer> {
        self.answers.iter().find(|answer| answer.is_correct)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn choice_question(correct: u64) -> Question {
        Question {
            id: QuestionId::new(1),
            content: "What is 'house' in Javanese?".into(),
            image_url: None,
            question_type: QuestionType::MultipleChoice,
            explanation: "Omah means house.".into(),
            order_number: 1,
            answers: vec![
                Answer {
                    id: AnswerId::new(10),
                    content: "Omah".into(),
                    is_correct: correct == 10,
                },
                Answer {
                    id: AnswerId::new(11),
                    content: "Sega".into(),
                    is_correct: correct == 11,
                },
                Answer {
                    id: AnswerId::new(12),
                    content: "Banyu".into(),
                    is_correct: correct == 12,
                },
            ],
        }
    }

    fn short_question() -> Question {
        Question {
            id: QuestionId::new(2),
            content: "Name the island.".into(),
            image_url: None,
            question_type: QuestionType::ShortAnswer,
            explanation: String::new(),
            order_number: 2,
            answers: vec![Answer {
                id: AnswerId::new(20),
                content: "Jawa".into(),
                is_correct: true,
            }],
        }
    }

    #[test]
    fn choice_grading_follows_correct_flag() {
        let question = choice_question(11);
        assert!(question.grade(&Response::Choice(AnswerId::new(11))));
        assert!(!question.grade(&Response::Choice(AnswerId::new(10))));
        assert!(!question.grade(&Response::Choice(AnswerId::new(12))));
    }

    #[test]
    fn choice_grading_independent_of_option_order() {
        let mut question = choice_question(12);
        question.answers.reverse();
        assert!(question.grade(&Response::Choice(AnswerId::new(12))));
        assert!(!question.grade(&Response::Choice(AnswerId::new(10))));
    }

    #[test]
    fn unknown_answer_id_grades_false() {
        let question = choice_question(10);
        assert!(!question.grade(&Response::Choice(AnswerId::new(999))));
    }

    #[test]
    fn short_answer_trims_and_ignores_case() {
        let question = short_question();
        assert!(question.grade(&Response::Text(" jawa ".into())));
        assert!(question.grade(&Response::Text("JAWA".into())));
        assert!(!question.grade(&Response::Text("jawi".into())));
    }

    #[test]
    fn short_answer_case_folding_is_not_ascii_only() {
        let mut question = short_question();
        question.answers[0].content = "Émigré".into();
        assert!(question.grade(&Response::Text("émigré".into())));
        assert!(question.grade(&Response::Text(" ÉMIGRÉ ".into())));
        assert!(!question.grade(&Response::Text("emigre".into())));
    }

    #[test]
    fn short_answer_without_canonical_grades_false() {
        let mut question = short_question();
        question.answers[0].is_correct = false;
        assert!(!question.grade(&Response::Text("Jawa".into())));
    }

    #[test]
    fn mismatched_response_kind_grades_false() {
        assert!(!choice_question(10).grade(&Response::Text("Omah".into())));
        assert!(!short_question().grade(&Response::Choice(AnswerId::new(20))));
    }

    #[test]
    fn blank_text_counts_as_empty() {
        assert!(Response::Text("   ".into()).is_empty());
        assert!(!Response::Text("a".into()).is_empty());
        assert!(!Response::Choice(AnswerId::new(1)).is_empty());
    }
}
