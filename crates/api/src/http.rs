use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use duo_core::model::{
    Account, AccountId, Answer, AnswerId, Course, CourseId, CourseType, Question, QuestionId,
    ValidatedCourse,
};

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::gateway::{
    AccountGateway, AnswerDraft, CompletionEntry, CourseGateway, Credentials, ProfileUpdate,
    ProgressGateway, QuestionDraft, Registration,
};

/// Reqwest-backed gateway speaking to one Remote Course Service host.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base: Url,
}

impl HttpGateway {
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self {
            client: Client::new(),
            base,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base.as_str().trim_end_matches('/'), path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        let envelope: Envelope<T> = response.json().await?;
        envelope.into_payload()
    }

    /// Status-only acknowledgement; the envelope body is not inspected.
    fn ack(response: &Response) -> Result<(), ApiError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(ApiError::Status(response.status()))
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionTimePayload {
    #[serde(default)]
    completion_time: Option<u64>,
}

#[async_trait]
impl CourseGateway for HttpGateway {
    async fn get_course(&self, id: CourseId) -> Result<Course, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&format!("courses/{id}")))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        let response = self.client.get(self.endpoint("courses")).send().await?;
        Self::decode(response).await
    }

    async fn list_courses_by_type(
        &self,
        course_type: CourseType,
    ) -> Result<Vec<Course>, ApiError> {
        let path = match course_type {
            CourseType::Singleplayer => "courses/type/SINGLEPLAYER",
            CourseType::Multiplayer => "courses/type/MULTIPLAYER",
        };
        let response = self.client.get(self.endpoint(path)).send().await?;
        Self::decode(response).await
    }

    async fn create_course(&self, course: &ValidatedCourse) -> Result<Course, ApiError> {
        // Multiplayer courses are created through their own endpoint.
        let path = match course.course_type {
            CourseType::Singleplayer => "courses",
            CourseType::Multiplayer => "courses/multiplayer",
        };
        let response = self
            .client
            .post(self.endpoint(path))
            .json(course)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn update_course(
        &self,
        id: CourseId,
        course: &ValidatedCourse,
    ) -> Result<Course, ApiError> {
        let path = match course.course_type {
            CourseType::Singleplayer => format!("courses/{id}"),
            CourseType::Multiplayer => format!("courses/multiplayer/{id}"),
        };
        let response = self
            .client
            .put(self.endpoint(&path))
            .json(course)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete_course(&self, id: CourseId) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("courses/{id}")))
            .send()
            .await?;
        Self::ack(&response)
    }

    async fn list_questions(&self, course_id: CourseId) -> Result<Vec<Question>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&format!("questions/course/{course_id}")))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn create_question(&self, draft: &QuestionDraft) -> Result<Question, ApiError> {
        let response = self
            .client
            .post(self.endpoint("questions"))
            .json(draft)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn update_question(
        &self,
        id: QuestionId,
        draft: &QuestionDraft,
    ) -> Result<Question, ApiError> {
        let response = self
            .client
            .put(self.endpoint(&format!("questions/{id}")))
            .json(draft)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("questions/{id}")))
            .send()
            .await?;
        Self::ack(&response)
    }

    async fn list_answers(&self, question_id: QuestionId) -> Result<Vec<Answer>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&format!("answers/question/{question_id}")))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn create_answer(&self, draft: &AnswerDraft) -> Result<Answer, ApiError> {
        let response = self
            .client
            .post(self.endpoint("answers"))
            .json(draft)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn update_answer(&self, id: AnswerId, draft: &AnswerDraft) -> Result<Answer, ApiError> {
        let response = self
            .client
            .put(self.endpoint(&format!("answers/{id}")))
            .json(draft)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete_answer(&self, id: AnswerId) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("answers/{id}")))
            .send()
            .await?;
        Self::ack(&response)
    }
}

#[async_trait]
impl ProgressGateway for HttpGateway {
    async fn start_enrollment(
        &self,
        account_id: AccountId,
        course_id: CourseId,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "accountId": account_id,
            "courseId": course_id,
        });
        let response = self
            .client
            .post(self.endpoint("enrollments/start"))
            .json(&body)
            .send()
            .await?;
        Self::ack(&response)
    }

    async fn enrollment_completed(
        &self,
        account_id: AccountId,
        course_id: CourseId,
    ) -> Result<bool, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&format!(
                "enrollments/is-completed/user/{account_id}/course/{course_id}"
            )))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn start_multiplayer(
        &self,
        account_id: AccountId,
        course_id: CourseId,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint("multiplayer/start"))
            .query(&[
                ("accountId", account_id.to_string()),
                ("courseId", course_id.to_string()),
            ])
            .send()
            .await?;
        Self::ack(&response)
    }

    async fn complete_multiplayer(
        &self,
        account_id: AccountId,
        course_id: CourseId,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .put(self.endpoint("multiplayer/complete"))
            .query(&[
                ("accountId", account_id.to_string()),
                ("courseId", course_id.to_string()),
            ])
            .send()
            .await?;
        Self::ack(&response)
    }

    async fn user_completion_time(
        &self,
        account_id: AccountId,
        course_id: CourseId,
    ) -> Result<Option<u64>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&format!(
                "multiplayer/time/user/{account_id}/course/{course_id}"
            )))
            .send()
            .await?;
        let payload: CompletionTimePayload = Self::decode(response).await?;
        Ok(payload.completion_time)
    }

    async fn course_completion_times(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<CompletionEntry>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&format!("multiplayer/time/course/{course_id}")))
            .send()
            .await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl AccountGateway for HttpGateway {
    async fn login(&self, credentials: &Credentials) -> Result<Account, ApiError> {
        let response = self
            .client
            .post(self.endpoint("accounts/login"))
            .json(credentials)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn register(&self, registration: &Registration) -> Result<Account, ApiError> {
        let response = self
            .client
            .post(self.endpoint("accounts/register"))
            .json(registration)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
        let response = self.client.get(self.endpoint("accounts")).send().await?;
        Self::decode(response).await
    }

    async fn get_account(&self, id: AccountId) -> Result<Account, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&format!("accounts/{id}")))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn update_account(
        &self,
        id: AccountId,
        update: &ProfileUpdate,
    ) -> Result<Account, ApiError> {
        let response = self
            .client
            .put(self.endpoint(&format!("accounts/{id}")))
            .json(update)
            .send()
            .await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let gateway = HttpGateway::new(Url::parse("http://localhost:8091/").unwrap());
        assert_eq!(
            gateway.endpoint("courses/type/MULTIPLAYER"),
            "http://localhost:8091/courses/type/MULTIPLAYER"
        );
    }
}
