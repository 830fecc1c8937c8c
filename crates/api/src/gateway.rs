//! Gateway contracts for the Remote Course Service.
//!
//! Services depend on these traits; the reqwest-backed `HttpGateway` is the
//! production implementation and `InMemoryGateway` backs the tests.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use duo_core::model::{
    Account, AccountId, Answer, AnswerId, Course, CourseId, CourseType, Question, QuestionId,
    QuestionType, ValidatedCourse,
};

use crate::error::ApiError;

//
// ─── WIRE SHAPES ───────────────────────────────────────────────────────────────
//

/// Login request body for `POST /accounts/login`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Registration body for `POST /accounts/register`.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Profile update body for `PUT /accounts/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Question payload for the admin editor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub course_id: CourseId,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub question_type: QuestionType,
    pub explanation: String,
    pub order_number: u32,
}

/// Answer payload for the admin editor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDraft {
    pub question_id: QuestionId,
    pub content: String,
    pub is_correct: bool,
}

/// One row of `GET /multiplayer/time/course/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEntry {
    pub account_id: AccountId,
    pub username: String,
    pub completion_time: u64,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
}

//
// ─── GATEWAYS ──────────────────────────────────────────────────────────────────
//

/// Courses, questions and answers.
#[async_trait]
pub trait CourseGateway: Send + Sync {
    /// Fetch one course with nested questions and answers.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any non-2xx status or failure envelope.
    async fn get_course(&self, id: CourseId) -> Result<Course, ApiError>;

    async fn list_courses(&self) -> Result<Vec<Course>, ApiError>;

    async fn list_courses_by_type(
        &self,
        course_type: CourseType,
    ) -> Result<Vec<Course>, ApiError>;

    async fn create_course(&self, course: &ValidatedCourse) -> Result<Course, ApiError>;

    async fn update_course(
        &self,
        id: CourseId,
        course: &ValidatedCourse,
    ) -> Result<Course, ApiError>;

    async fn delete_course(&self, id: CourseId) -> Result<(), ApiError>;

    async fn list_questions(&self, course_id: CourseId) -> Result<Vec<Question>, ApiError>;

    async fn create_question(&self, draft: &QuestionDraft) -> Result<Question, ApiError>;

    async fn update_question(
        &self,
        id: QuestionId,
        draft: &QuestionDraft,
    ) -> Result<Question, ApiError>;

    async fn delete_question(&self, id: QuestionId) -> Result<(), ApiError>;

    async fn list_answers(&self, question_id: QuestionId) -> Result<Vec<Answer>, ApiError>;

    async fn create_answer(&self, draft: &AnswerDraft) -> Result<Answer, ApiError>;

    async fn update_answer(&self, id: AnswerId, draft: &AnswerDraft) -> Result<Answer, ApiError>;

    async fn delete_answer(&self, id: AnswerId) -> Result<(), ApiError>;
}

/// Enrollment and multiplayer attempt records.
#[async_trait]
pub trait ProgressGateway: Send + Sync {
    /// Notify the service that a singleplayer enrollment has started.
    async fn start_enrollment(
        &self,
        account_id: AccountId,
        course_id: CourseId,
    ) -> Result<(), ApiError>;

    /// Whether the learner has completed a singleplayer course.
    async fn enrollment_completed(
        &self,
        account_id: AccountId,
        course_id: CourseId,
    ) -> Result<bool, ApiError>;

    /// Notify the service that a multiplayer attempt has started.
    async fn start_multiplayer(
        &self,
        account_id: AccountId,
        course_id: CourseId,
    ) -> Result<(), ApiError>;

    /// Record a passed multiplayer attempt. Only called on pass.
    async fn complete_multiplayer(
        &self,
        account_id: AccountId,
        course_id: CourseId,
    ) -> Result<(), ApiError>;

    /// The learner's recorded completion time in seconds, if any.
    async fn user_completion_time(
        &self,
        account_id: AccountId,
        course_id: CourseId,
    ) -> Result<Option<u64>, ApiError>;

    /// All recorded completion times for a course.
    async fn course_completion_times(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<CompletionEntry>, ApiError>;
}

/// Accounts: authentication, the leaderboard list and profile edits.
#[async_trait]
pub trait AccountGateway: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<Account, ApiError>;

    async fn register(&self, registration: &Registration) -> Result<Account, ApiError>;

    async fn list_accounts(&self) -> Result<Vec<Account>, ApiError>;

    async fn get_account(&self, id: AccountId) -> Result<Account, ApiError>;

    async fn update_account(
        &self,
        id: AccountId,
        update: &ProfileUpdate,
    ) -> Result<Account, ApiError>;
}
