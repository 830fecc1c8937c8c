//! In-memory gateway for tests and prototyping.
//!
//! Behaves like the HTTP gateway seen from the outside: missing records come
//! back as 404-status errors and injected failures as 500s. Call counters on
//! the progress endpoints let tests assert at-most-once semantics.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use duo_core::model::{
    Account, AccountId, Answer, AnswerId, Course, CourseId, CourseType, Question, QuestionId,
    Role, ValidatedCourse,
};

use crate::error::ApiError;
use crate::gateway::{
    AccountGateway, AnswerDraft, CompletionEntry, CourseGateway, Credentials, ProfileUpdate,
    ProgressGateway, QuestionDraft, Registration,
};

#[derive(Default)]
struct State {
    courses: HashMap<CourseId, Course>,
    accounts: HashMap<AccountId, Account>,
    passwords: HashMap<String, String>,
    enrollments: HashSet<(AccountId, CourseId)>,
    completed_enrollments: HashSet<(AccountId, CourseId)>,
    completion_times: HashMap<(AccountId, CourseId), u64>,
    start_multiplayer_calls: u32,
    complete_multiplayer_calls: u32,
    fail_get_course: bool,
    fail_complete: bool,
    fail_time_fetch: bool,
    /// Elapsed seconds recorded when a completion call lands.
    elapsed_on_complete: u64,
    next_id: u64,
}

/// Simple in-memory gateway implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryGateway {
    state: Arc<Mutex<State>>,
}

fn not_found() -> ApiError {
    ApiError::Status(StatusCode::NOT_FOUND)
}

fn server_error() -> ApiError {
    ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR)
}

impl InMemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A poisoned lock only happens after a panic in another test thread.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert_course(&self, course: Course) {
        self.lock().courses.insert(course.id, course);
    }

    pub fn insert_account(&self, account: Account, password: &str) {
        let mut state = self.lock();
        state
            .passwords
            .insert(account.username.clone(), password.to_string());
        state.accounts.insert(account.id, account);
    }

    pub fn set_completion_time(&self, account_id: AccountId, course_id: CourseId, seconds: u64) {
        self.lock()
            .completion_times
            .insert((account_id, course_id), seconds);
    }

    pub fn set_elapsed_on_complete(&self, seconds: u64) {
        self.lock().elapsed_on_complete = seconds;
    }

    pub fn fail_get_course(&self, fail: bool) {
        self.lock().fail_get_course = fail;
    }

    pub fn fail_complete(&self, fail: bool) {
        self.lock().fail_complete = fail;
    }

    pub fn fail_time_fetch(&self, fail: bool) {
        self.lock().fail_time_fetch = fail;
    }

    #[must_use]
    pub fn start_multiplayer_calls(&self) -> u32 {
        self.lock().start_multiplayer_calls
    }

    #[must_use]
    pub fn complete_multiplayer_calls(&self) -> u32 {
        self.lock().complete_multiplayer_calls
    }

    #[must_use]
    pub fn enrollment_started(&self, account_id: AccountId, course_id: CourseId) -> bool {
        self.lock().enrollments.contains(&(account_id, course_id))
    }

    pub fn mark_enrollment_completed(&self, account_id: AccountId, course_id: CourseId) {
        self.lock()
            .completed_enrollments
            .insert((account_id, course_id));
    }

    fn next_id(state: &mut State) -> u64 {
        state.next_id += 1;
        state.next_id
    }
}

#[async_trait]
impl CourseGateway for InMemoryGateway {
    async fn get_course(&self, id: CourseId) -> Result<Course, ApiError> {
        let state = self.lock();
        if state.fail_get_course {
            return Err(server_error());
        }
        state.courses.get(&id).cloned().ok_or_else(not_found)
    }

    async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        let state = self.lock();
        let mut courses: Vec<Course> = state.courses.values().cloned().collect();
        courses.sort_by_key(|course| course.id);
        Ok(courses)
    }

    async fn list_courses_by_type(
        &self,
        course_type: CourseType,
    ) -> Result<Vec<Course>, ApiError> {
        let mut courses: Vec<Course> = self
            .lock()
            .courses
            .values()
            .filter(|course| course.course_type == course_type)
            .cloned()
            .collect();
        courses.sort_by_key(|course| course.id);
        Ok(courses)
    }

    async fn create_course(&self, course: &ValidatedCourse) -> Result<Course, ApiError> {
        let mut state = self.lock();
        let id = CourseId::new(Self::next_id(&mut state));
        let created = Course {
            id,
            title: course.title.clone(),
            description: course.description.clone(),
            difficulty: course.difficulty,
            exp_reward: course.exp_reward,
            course_type: course.course_type,
            deadline: course.deadline,
            questions: Vec::new(),
        };
        state.courses.insert(id, created.clone());
        Ok(created)
    }

    async fn update_course(
        &self,
        id: CourseId,
        course: &ValidatedCourse,
    ) -> Result<Course, ApiError> {
        let mut state = self.lock();
        let existing = state.courses.get_mut(&id).ok_or_else(not_found)?;
        existing.title = course.title.clone();
        existing.description = course.description.clone();
        existing.difficulty = course.difficulty;
        existing.exp_reward = course.exp_reward;
        existing.course_type = course.course_type;
        existing.deadline = course.deadline;
        Ok(existing.clone())
    }

    async fn delete_course(&self, id: CourseId) -> Result<(), ApiError> {
        self.lock()
            .courses
            .remove(&id)
            .map(|_| ())
            .ok_or_else(not_found)
    }

    async fn list_questions(&self, course_id: CourseId) -> Result<Vec<Question>, ApiError> {
        let state = self.lock();
        let course = state.courses.get(&course_id).ok_or_else(not_found)?;
        Ok(course.ordered_questions())
    }

    async fn create_question(&self, draft: &QuestionDraft) -> Result<Question, ApiError> {
        let mut state = self.lock();
        let id = QuestionId::new(Self::next_id(&mut state));
        let question = Question {
            id,
            content: draft.content.clone(),
            image_url: draft.image_url.clone(),
            question_type: draft.question_type,
            explanation: draft.explanation.clone(),
            order_number: draft.order_number,
            answers: Vec::new(),
        };
        let course = state
            .courses
            .get_mut(&draft.course_id)
            .ok_or_else(not_found)?;
        course.questions.push(question.clone());
        Ok(question)
    }

    async fn update_question(
        &self,
        id: QuestionId,
        draft: &QuestionDraft,
    ) -> Result<Question, ApiError> {
        let mut state = self.lock();
        let course = state
            .courses
            .get_mut(&draft.course_id)
            .ok_or_else(not_found)?;
        let question = course
            .questions
            .iter_mut()
            .find(|question| question.id == id)
            .ok_or_else(not_found)?;
        question.content = draft.content.clone();
        question.image_url = draft.image_url.clone();
        question.question_type = draft.question_type;
        question.explanation = draft.explanation.clone();
        question.order_number = draft.order_number;
        Ok(question.clone())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), ApiError> {
        let mut state = self.lock();
        for course in state.courses.values_mut() {
            let before = course.questions.len();
            course.questions.retain(|question| question.id != id);
            if course.questions.len() < before {
                return Ok(());
            }
        }
        Err(not_found())
    }

    async fn list_answers(&self, question_id: QuestionId) -> Result<Vec<Answer>, ApiError> {
        let state = self.lock();
        state
            .courses
            .values()
            .flat_map(|course| course.questions.iter())
            .find(|question| question.id == question_id)
            .map(|question| question.answers.clone())
            .ok_or_else(not_found)
    }

    async fn create_answer(&self, draft: &AnswerDraft) -> Result<Answer, ApiError> {
        let mut state = self.lock();
        let id = AnswerId::new(Self::next_id(&mut state));
        let answer = Answer {
            id,
            content: draft.content.clone(),
            is_correct: draft.is_correct,
        };
        let question = state
            .courses
            .values_mut()
            .flat_map(|course| course.questions.iter_mut())
            .find(|question| question.id == draft.question_id)
            .ok_or_else(not_found)?;
        question.answers.push(answer.clone());
        Ok(answer)
    }

    async fn update_answer(&self, id: AnswerId, draft: &AnswerDraft) -> Result<Answer, ApiError> {
        let mut state = self.lock();
        let answer = state
            .courses
            .values_mut()
            .flat_map(|course| course.questions.iter_mut())
            .flat_map(|question| question.answers.iter_mut())
            .find(|answer| answer.id == id)
            .ok_or_else(not_found)?;
        answer.content = draft.content.clone();
        answer.is_correct = draft.is_correct;
        Ok(answer.clone())
    }

    async fn delete_answer(&self, id: AnswerId) -> Result<(), ApiError> {
        let mut state = self.lock();
        for question in state
            .courses
            .values_mut()
            .flat_map(|course| course.questions.iter_mut())
        {
            let before = question.answers.len();
            question.answers.retain(|answer| answer.id != id);
            if question.answers.len() < before {
                return Ok(());
            }
        }
        Err(not_found())
    }
}

#[async_trait]
impl ProgressGateway for InMemoryGateway {
    async fn start_enrollment(
        &self,
        account_id: AccountId,
        course_id: CourseId,
    ) -> Result<(), ApiError> {
        self.lock().enrollments.insert((account_id, course_id));
        Ok(())
    }

    async fn enrollment_completed(
        &self,
        account_id: AccountId,
        course_id: CourseId,
    ) -> Result<bool, ApiError> {
        Ok(self
            .lock()
            .completed_enrollments
            .contains(&(account_id, course_id)))
    }

    async fn start_multiplayer(
        &self,
        account_id: AccountId,
        course_id: CourseId,
    ) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.start_multiplayer_calls += 1;
        state.enrollments.insert((account_id, course_id));
        Ok(())
    }

    async fn complete_multiplayer(
        &self,
        account_id: AccountId,
        course_id: CourseId,
    ) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.complete_multiplayer_calls += 1;
        if state.fail_complete {
            return Err(server_error());
        }
        let elapsed = state.elapsed_on_complete;
        state
            .completion_times
            .entry((account_id, course_id))
            .or_insert(elapsed);
        Ok(())
    }

    async fn user_completion_time(
        &self,
        account_id: AccountId,
        course_id: CourseId,
    ) -> Result<Option<u64>, ApiError> {
        let state = self.lock();
        if state.fail_time_fetch {
            return Err(server_error());
        }
        Ok(state.completion_times.get(&(account_id, course_id)).copied())
    }

    async fn course_completion_times(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<CompletionEntry>, ApiError> {
        let state = self.lock();
        let mut entries: Vec<CompletionEntry> = state
            .completion_times
            .iter()
            .filter(|((_, c), _)| *c == course_id)
            .map(|((account_id, _), seconds)| CompletionEntry {
                account_id: *account_id,
                username: state
                    .accounts
                    .get(account_id)
                    .map_or_else(|| account_id.to_string(), |a| a.username.clone()),
                completion_time: *seconds,
                completed_at: None,
            })
            .collect();
        entries.sort_by_key(|entry| entry.completion_time);
        Ok(entries)
    }
}

#[async_trait]
impl AccountGateway for InMemoryGateway {
    async fn login(&self, credentials: &Credentials) -> Result<Account, ApiError> {
        let state = self.lock();
        let stored = state
            .passwords
            .get(&credentials.username)
            .ok_or_else(|| ApiError::Envelope("invalid username or password".into()))?;
        if *stored != credentials.password {
            return Err(ApiError::Envelope("invalid username or password".into()));
        }
        state
            .accounts
            .values()
            .find(|account| account.username == credentials.username)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn register(&self, registration: &Registration) -> Result<Account, ApiError> {
        let mut state = self.lock();
        if state.passwords.contains_key(&registration.username) {
            return Err(ApiError::Envelope("username already taken".into()));
        }
        let id = AccountId::new(Self::next_id(&mut state));
        let account = Account {
            id,
            username: registration.username.clone(),
            email: registration.email.clone(),
            exp: 0,
            role: Role::User,
            image_url: None,
            created_at: None,
        };
        state
            .passwords
            .insert(registration.username.clone(), registration.password.clone());
        state.accounts.insert(id, account.clone());
        Ok(account)
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
        let mut accounts: Vec<Account> = self.lock().accounts.values().cloned().collect();
        accounts.sort_by_key(|account| account.id);
        Ok(accounts)
    }

    async fn get_account(&self, id: AccountId) -> Result<Account, ApiError> {
        self.lock().accounts.get(&id).cloned().ok_or_else(not_found)
    }

    async fn update_account(
        &self,
        id: AccountId,
        update: &ProfileUpdate,
    ) -> Result<Account, ApiError> {
        let mut state = self.lock();
        let old_username = state
            .accounts
            .get(&id)
            .map(|account| account.username.clone())
            .ok_or_else(not_found)?;

        if let Some(password) = &update.password {
            state.passwords.remove(&old_username);
            state
                .passwords
                .insert(update.username.clone(), password.clone());
        } else if let Some(password) = state.passwords.remove(&old_username) {
            state.passwords.insert(update.username.clone(), password);
        }

        let account = state.accounts.get_mut(&id).ok_or_else(not_found)?;
        account.username = update.username.clone();
        account.email = update.email.clone();
        Ok(account.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duo_core::model::Difficulty;

    fn course(id: u64, course_type: CourseType) -> Course {
        Course {
            id: CourseId::new(id),
            title: format!("Course {id}"),
            description: String::new(),
            difficulty: Difficulty::Easy,
            exp_reward: 0,
            course_type,
            deadline: None,
            questions: Vec::new(),
        }
    }

    #[tokio::test]
    async fn list_by_type_filters_courses() {
        let gateway = InMemoryGateway::new();
        gateway.insert_course(course(1, CourseType::Singleplayer));
        gateway.insert_course(course(2, CourseType::Multiplayer));

        let multiplayer = gateway
            .list_courses_by_type(CourseType::Multiplayer)
            .await
            .unwrap();
        assert_eq!(multiplayer.len(), 1);
        assert_eq!(multiplayer[0].id, CourseId::new(2));
    }

    #[tokio::test]
    async fn completion_records_elapsed_once() {
        let gateway = InMemoryGateway::new();
        gateway.set_elapsed_on_complete(205);
        let account = AccountId::new(1);
        let course_id = CourseId::new(9);

        gateway.complete_multiplayer(account, course_id).await.unwrap();
        gateway.set_elapsed_on_complete(999);
        gateway.complete_multiplayer(account, course_id).await.unwrap();

        // First recorded time wins.
        let time = gateway.user_completion_time(account, course_id).await.unwrap();
        assert_eq!(time, Some(205));
        assert_eq!(gateway.complete_multiplayer_calls(), 2);
    }

    #[tokio::test]
    async fn register_then_login_roundtrip() {
        let gateway = InMemoryGateway::new();
        let created = gateway
            .register(&Registration {
                username: "wira".into(),
                email: "w@example.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();

        let logged_in = gateway
            .login(&Credentials {
                username: "wira".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, logged_in.id);

        let wrong = gateway
            .login(&Credentials {
                username: "wira".into(),
                password: "nope".into(),
            })
            .await;
        assert!(wrong.is_err());
    }
}
