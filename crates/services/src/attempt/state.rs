use duo_core::model::{AnswerId, Course, CourseId, CourseType, Question, Response};

use super::progress::AttemptProgress;
use crate::error::AttemptError;

/// Minimum `score / total` ratio for an attempt to count as passed.
pub const PASS_THRESHOLD: f64 = 0.8;

//
// ─── ATTEMPT ───────────────────────────────────────────────────────────────────
//

/// One pass through a course's question sequence.
///
/// Steps through the questions in presentation order, grading each response
/// against data already fetched. An incorrect submission never advances:
/// feedback and input are cleared and the same question is re-presented.
/// All state here is attempt-local and discarded on navigation.
#[derive(Debug)]
pub struct Attempt {
    course_id: CourseId,
    course_type: CourseType,
    title: String,
    questions: Vec<Question>,
    current: usize,
    score: usize,
    response: Option<Response>,
    /// `Some(correct)` while feedback for the current question is showing.
    feedback: Option<bool>,
    completed: bool,
    completion_attempted: bool,
}

impl Attempt {
    /// Create an attempt over the course's questions in order.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::EmptyCourse` when the course has no questions.
    pub fn new(course: &Course) -> Result<Self, AttemptError> {
        let questions = course.ordered_questions();
        if questions.is_empty() {
            return Err(AttemptError::EmptyCourse);
        }

        Ok(Self {
            course_id: course.id,
            course_type: course.course_type,
            title: course.title.clone(),
            questions,
            current: 0,
            score: 0,
            response: None,
            feedback: None,
            completed: false,
            completion_attempted: false,
        })
    }

    #[must_use]
    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    #[must_use]
    pub fn course_type(&self) -> CourseType {
        self.course_type
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.completed {
            None
        } else {
            self.questions.get(self.current)
        }
    }

    /// Zero-based index of the question being presented.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    /// `Some(correct)` while feedback is showing for the current question.
    #[must_use]
    pub fn feedback(&self) -> Option<bool> {
        self.feedback
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn progress(&self) -> AttemptProgress {
        AttemptProgress {
            total: self.questions.len(),
            answered: self.current + usize::from(self.completed),
            score: self.score,
            is_complete: self.completed,
        }
    }

    /// Select a multiple-choice option.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError` while feedback is showing or after completion.
    pub fn select_answer(&mut self, answer_id: AnswerId) -> Result<(), AttemptError> {
        self.ensure_input_open()?;
        self.response = Some(Response::Choice(answer_id));
        Ok(())
    }

    /// Set the typed short-answer text.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError` while feedback is showing or after completion.
    pub fn set_short_answer_text(
        &mut self,
        text: impl Into<String>,
    ) -> Result<(), AttemptError> {
        self.ensure_input_open()?;
        self.response = Some(Response::Text(text.into()));
        Ok(())
    }

    /// Grade the pending response against the current question.
    ///
    /// A correct submission increments the score. Either way, feedback is
    /// shown and further input for this question is frozen until `advance`.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::NoResponse` without a selection / with blank
    /// text, `FeedbackShowing` on a double submit, `Completed` after the end.
    pub fn submit(&mut self) -> Result<bool, AttemptError> {
        if self.completed {
            return Err(AttemptError::Completed);
        }
        if self.feedback.is_some() {
            return Err(AttemptError::FeedbackShowing);
        }
        let response = match &self.response {
            Some(response) if !response.is_empty() => response,
            _ => return Err(AttemptError::NoResponse),
        };
        let question = self
            .questions
            .get(self.current)
            .ok_or(AttemptError::Completed)?;

        let correct = question.grade(response);
        if correct {
            self.score += 1;
        }
        self.feedback = Some(correct);
        Ok(correct)
    }

    /// Leave the feedback state.
    ///
    /// Incorrect: stay on the same question with cleared input (forced
    /// retry, no penalty beyond re-answering). Correct: move to the next
    /// question, or mark the attempt completed after the last one.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::FeedbackNotShown` when nothing was submitted.
    pub fn advance(&mut self) -> Result<(), AttemptError> {
        let Some(correct) = self.feedback else {
            return Err(AttemptError::FeedbackNotShown);
        };

        self.feedback = None;
        self.response = None;

        if !correct {
            return Ok(());
        }

        if self.current + 1 < self.questions.len() {
            self.current += 1;
        } else {
            self.completed = true;
        }
        Ok(())
    }

    #[must_use]
    pub fn pass_ratio(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        self.score as f64 / self.questions.len() as f64
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.pass_ratio() >= PASS_THRESHOLD
    }

    /// Whether the completion call has already been issued for this attempt.
    #[must_use]
    pub fn completion_attempted(&self) -> bool {
        self.completion_attempted
    }

    pub(crate) fn mark_completion_attempted(&mut self) {
        self.completion_attempted = true;
    }

    /// Restart the attempt from the first question without refetching.
    ///
    /// Clears index, score, input and feedback. The restarted run is a new
    /// attempt, so a later pass may record a fresh completion.
    pub fn reset(&mut self) {
        self.current = 0;
        self.score = 0;
        self.response = None;
        self.feedback = None;
        self.completed = false;
        self.completion_attempted = false;
    }

    fn ensure_input_open(&self) -> Result<(), AttemptError> {
        if self.completed {
            return Err(AttemptError::Completed);
        }
        if self.feedback.is_some() {
            return Err(AttemptError::FeedbackShowing);
        }
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
