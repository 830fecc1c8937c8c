use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::CourseId;
use crate::model::question::Question;

//
// ─── COURSE TYPES ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseType {
    Singleplayer,
    Multiplayer,
}

/// A course as served by the Remote Course Service, read-only to the player.
///
/// `deadline` is a UTC instant without zone marker and only present on
/// multiplayer courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub exp_reward: u32,
    #[serde(default = "CourseType::singleplayer")]
    pub course_type: CourseType,
    #[serde(default)]
    pub deadline: Option<NaiveDateTime>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl CourseType {
    fn singleplayer() -> Self {
        CourseType::Singleplayer
    }
}

impl Course {
    /// Questions in presentation order.
    #[must_use]
    pub fn ordered_questions(&self) -> Vec<Question> {
        let mut questions = self.questions.clone();
        questions.sort_by_key(|question| question.order_number);
        questions
    }
}

//
// ─── COURSE DRAFT (ADMIN) ──────────────────────────────────────────────────────
//

/// Admin-side course input, validated before being sent to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub exp_reward: u32,
    pub course_type: CourseType,
    pub deadline: Option<NaiveDateTime>,
}

impl CourseDraft {
    /// Validate the draft.
    ///
    /// Multiplayer courses never carry an experience reward; the reward is
    /// forced to zero here, mirroring the server-side rule. A deadline is
    /// only meaningful on multiplayer courses and is dropped otherwise.
    ///
    /// # Errors
    ///
    /// Returns `CourseError` for an empty title or a multiplayer course
    /// without a deadline.
    pub fn validate(self) -> Result<ValidatedCourse, CourseError> {
        if self.title.trim().is_empty() {
            return Err(CourseError::EmptyTitle);
        }

        let (exp_reward, deadline) = match self.course_type {
            CourseType::Singleplayer => (self.exp_reward, None),
            CourseType::Multiplayer => {
                let deadline = self.deadline.ok_or(CourseError::MissingDeadline)?;
                (0, Some(deadline))
            }
        };

        Ok(ValidatedCourse {
            title: self.title.trim().to_string(),
            description: self.description,
            difficulty: self.difficulty,
            exp_reward,
            course_type: self.course_type,
            deadline,
        })
    }
}

/// A validated course payload ready to be sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedCourse {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub exp_reward: u32,
    pub course_type: CourseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDateTime>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CourseError {
    #[error("course title must not be empty")]
    EmptyTitle,

    #[error("multiplayer courses require a deadline")]
    MissingDeadline,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::QuestionId;
    use crate::model::question::QuestionType;

    fn bare_question(id: u64, order_number: u32) -> Question {
        Question {
            id: QuestionId::new(id),
            content: format!("Q{id}"),
            image_url: None,
            question_type: QuestionType::ShortAnswer,
            explanation: String::new(),
            order_number,
            answers: Vec::new(),
        }
    }

    fn draft(course_type: CourseType) -> CourseDraft {
        CourseDraft {
            title: "Basic Greetings".into(),
            description: "Sugeng enjang!".into(),
            difficulty: Difficulty::Easy,
            exp_reward: 50,
            course_type,
            deadline: match course_type {
                CourseType::Multiplayer => {
                    Some(NaiveDateTime::parse_from_str("2025-06-01 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap())
                }
                CourseType::Singleplayer => None,
            },
        }
    }

    #[test]
    fn questions_sorted_by_order_number() {
        let course = Course {
            id: CourseId::new(1),
            title: "T".into(),
            description: String::new(),
            difficulty: Difficulty::Easy,
            exp_reward: 0,
            course_type: CourseType::Singleplayer,
            deadline: None,
            questions: vec![bare_question(1, 3), bare_question(2, 1), bare_question(3, 2)],
        };

        let ordered = course.ordered_questions();
        let ids: Vec<u64> = ordered.iter().map(|q| q.id.value()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn multiplayer_draft_zeroes_exp_reward() {
        let validated = draft(CourseType::Multiplayer).validate().unwrap();
        assert_eq!(validated.exp_reward, 0);
        assert!(validated.deadline.is_some());
    }

    #[test]
    fn singleplayer_draft_keeps_exp_reward() {
        let validated = draft(CourseType::Singleplayer).validate().unwrap();
        assert_eq!(validated.exp_reward, 50);
        assert!(validated.deadline.is_none());
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut input = draft(CourseType::Singleplayer);
        input.title = "   ".into();
        assert_eq!(input.validate().unwrap_err(), CourseError::EmptyTitle);
    }

    #[test]
    fn multiplayer_without_deadline_is_rejected() {
        let mut input = draft(CourseType::Multiplayer);
        input.deadline = None;
        assert_eq!(input.validate().unwrap_err(), CourseError::MissingDeadline);
    }
}
