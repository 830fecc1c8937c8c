//! Course, question and answer authoring.

use std::sync::Arc;

use api::gateway::{AnswerDraft, CourseGateway, QuestionDraft};
use duo_core::model::{
    Answer, AnswerId, Course, CourseDraft, CourseId, Question, QuestionId,
};

use crate::error::AdminError;

/// Content management behind the admin console. Every course write goes
/// through [`CourseDraft::validate`] so invalid drafts never reach the wire.
#[derive(Clone)]
pub struct AdminService {
    courses: Arc<dyn CourseGateway>,
}

impl AdminService {
    #[must_use]
    pub fn new(courses: Arc<dyn CourseGateway>) -> Self {
        Self { courses }
    }

    /// Every course, both singleplayer and multiplayer.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Api` when the listing fails.
    pub async fn list_courses(&self) -> Result<Vec<Course>, AdminError> {
        Ok(self.courses.list_courses().await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the lookup fails.
    pub async fn course(&self, id: CourseId) -> Result<Course, AdminError> {
        Ok(self.courses.get_course(id).await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Course` when the draft is invalid and
    /// `AdminError::Api` when the create fails.
    pub async fn create_course(&self, draft: CourseDraft) -> Result<Course, AdminError> {
        let validated = draft.validate()?;
        Ok(self.courses.create_course(&validated).await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Course` when the draft is invalid and
    /// `AdminError::Api` when the update fails.
    pub async fn update_course(
        &self,
        id: CourseId,
        draft: CourseDraft,
    ) -> Result<Course, AdminError> {
        let validated = draft.validate()?;
        Ok(self.courses.update_course(id, &validated).await?)
    }

    /// Delete a course and everything under it.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Api` when the delete fails.
    pub async fn delete_course(&self, id: CourseId) -> Result<(), AdminError> {
        Ok(self.courses.delete_course(id).await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the listing fails.
    pub async fn list_questions(&self, course_id: CourseId) -> Result<Vec<Question>, AdminError> {
        Ok(self.courses.list_questions(course_id).await?)
    }

    /// Create a question together with its answer options.
    ///
    /// The question is created first; each answer then references its id. A
    /// failed answer create aborts the rest and surfaces the error, leaving
    /// the question in place for the admin to finish editing.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Api` when any create fails.
    pub async fn create_question_with_answers(
        &self,
        draft: QuestionDraft,
        answers: Vec<(String, bool)>,
    ) -> Result<Question, AdminError> {
        let mut question = self.courses.create_question(&draft).await?;
        for (content, is_correct) in answers {
            let answer = self
                .courses
                .create_answer(&AnswerDraft {
                    question_id: question.id,
                    content,
                    is_correct,
                })
                .await?;
            question.answers.push(answer);
        }
        Ok(question)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the update fails.
    pub async fn update_question(
        &self,
        id: QuestionId,
        draft: QuestionDraft,
    ) -> Result<Question, AdminError> {
        Ok(self.courses.update_question(id, &draft).await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the delete fails.
    pub async fn delete_question(&self, id: QuestionId) -> Result<(), AdminError> {
        Ok(self.courses.delete_question(id).await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the create fails.
    pub async fn create_answer(&self, draft: AnswerDraft) -> Result<Answer, AdminError> {
        Ok(self.courses.create_answer(&draft).await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the update fails.
    pub async fn update_answer(
        &self,
        id: AnswerId,
        draft: AnswerDraft,
    ) -> Result<Answer, AdminError> {
        Ok(self.courses.update_answer(id, &draft).await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the delete fails.
    pub async fn delete_answer(&self, id: AnswerId) -> Result<(), AdminError> {
        Ok(self.courses.delete_answer(id).await?)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
