use std::sync::Arc;

use log::warn;

use api::gateway::{CourseGateway, ProgressGateway};
use duo_core::model::{AccountId, CourseId, CourseType};

use super::state::Attempt;
use crate::error::AttemptError;

/// Locally computed outcome of a finished attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptOutcome {
    pub passed: bool,
    pub score: usize,
    pub total: usize,
    /// Recorded elapsed seconds, when the service produced one.
    pub completion_time_seconds: Option<u64>,
}

/// Orchestrates attempt start and completion against the Remote Course Service.
///
/// The course load is the only fatal call. Start notification, completion
/// marking and the completion-time fetch are all best-effort: a failure is
/// logged and the learner still sees the locally computed outcome.
#[derive(Clone)]
pub struct AttemptLoopService {
    courses: Arc<dyn CourseGateway>,
    progress: Arc<dyn ProgressGateway>,
}

impl AttemptLoopService {
    #[must_use]
    pub fn new(courses: Arc<dyn CourseGateway>, progress: Arc<dyn ProgressGateway>) -> Self {
        Self { courses, progress }
    }

    /// Fetch the course and start an attempt over it.
    ///
    /// For multiplayer courses the service is notified that an attempt has
    /// started, once per call; a notification failure is logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError` when the course cannot be loaded (terminal for
    /// the page visit, no retry) or has no questions.
    pub async fn start_attempt(
        &self,
        account_id: AccountId,
        course_id: CourseId,
    ) -> Result<Attempt, AttemptError> {
        let course = self.courses.get_course(course_id).await?;
        let attempt = Attempt::new(&course)?;

        if attempt.course_type() == CourseType::Multiplayer
            && let Err(err) = self.progress.start_multiplayer(account_id, course_id).await
        {
            warn!("failed to record attempt start for course {course_id}: {err}");
        }

        Ok(attempt)
    }

    /// Whether the learner completed this course on an earlier visit, with
    /// the recorded time. Best-effort: errors are logged and read as `None`.
    pub async fn prior_completion(
        &self,
        account_id: AccountId,
        course_id: CourseId,
    ) -> Option<u64> {
        match self
            .progress
            .user_completion_time(account_id, course_id)
            .await
        {
            Ok(time) => time,
            Err(err) => {
                warn!("failed to check prior completion for course {course_id}: {err}");
                None
            }
        }
    }

    /// Evaluate a finished attempt and record a pass with the service.
    ///
    /// The completion call fires iff the attempt is complete and passed, at
    /// most once per attempt; repeat views of the completion screen reuse the
    /// guard and only re-read the recorded time. Failures here never block
    /// the completion screen.
    pub async fn finalize(&self, attempt: &mut Attempt, account_id: AccountId) -> AttemptOutcome {
        let passed = attempt.is_complete() && attempt.passed();
        let mut completion_time_seconds = None;

        if passed && attempt.course_type() == CourseType::Multiplayer {
            let course_id = attempt.course_id();

            if !attempt.completion_attempted() {
                attempt.mark_completion_attempted();
                if let Err(err) = self.progress.complete_multiplayer(account_id, course_id).await
                {
                    warn!("failed to mark course {course_id} complete: {err}");
                }
            }

            match self
                .progress
                .user_completion_time(account_id, course_id)
                .await
            {
                Ok(time) => completion_time_seconds = time,
                Err(err) => {
                    warn!("failed to fetch completion time for course {course_id}: {err}");
                }
            }
        }

        AttemptOutcome {
            passed,
            score: attempt.score(),
            total: attempt.total_questions(),
            completion_time_seconds,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use api::InMemoryGateway;
    use duo_core::model::{
        Answer, AnswerId, Course, Difficulty, Question, QuestionId, QuestionType,
    };

    fn service(gateway: &InMemoryGateway) -> AttemptLoopService {
        AttemptLoopService::new(Arc::new(gateway.clone()), Arc::new(gateway.clone()))
    }

    fn question(id: u64, order_number: u32) -> Question {
        Question {
            id: QuestionId::new(id),
            content: format!("Q{id}"),
            image_url: None,
            question_type: QuestionType::MultipleChoice,
            explanation: String::new(),
            order_number,
            answers: vec![Answer {
                id: AnswerId::new(id * 10),
                content: "right".into(),
                is_correct: true,
            }],
        }
    }

    fn multiplayer_course(id: u64, question_count: u64) -> Course {
        Course {
            id: CourseId::new(id),
            title: "Timed".into(),
            description: String::new(),
            difficulty: Difficulty::Medium,
            exp_reward: 0,
            course_type: CourseType::Multiplayer,
            deadline: None,
            questions: (1..=question_count)
                .map(|i| question(i, i as u32))
                .collect(),
        }
    }

    fn complete_all_correct(attempt: &mut Attempt) {
        while !attempt.is_complete() {
            let id = attempt
                .current_question()
                .and_then(Question::correct_answer)
                .map(|answer| answer.id)
                .unwrap();
            attempt.select_answer(id).unwrap();
            attempt.submit().unwrap();
            attempt.advance().unwrap();
        }
    }

    #[tokio::test]
    async fn start_notifies_the_service_once() {
        let gateway = InMemoryGateway::new();
        gateway.insert_course(multiplayer_course(1, 2));
        let account = AccountId::new(7);

        let svc = service(&gateway);
        let _attempt = svc.start_attempt(account, CourseId::new(1)).await.unwrap();

        assert_eq!(gateway.start_multiplayer_calls(), 1);
        assert!(gateway.enrollment_started(account, CourseId::new(1)));
    }

    #[tokio::test]
    async fn course_load_failure_is_fatal() {
        let gateway = InMemoryGateway::new();
        gateway.insert_course(multiplayer_course(1, 2));
        gateway.fail_get_course(true);

        let svc = service(&gateway);
        let result = svc.start_attempt(AccountId::new(7), CourseId::new(1)).await;
        assert!(result.is_err());
        // No attempt started, no start notification issued.
        assert_eq!(gateway.start_multiplayer_calls(), 0);
    }

    #[tokio::test]
    async fn finalize_records_a_pass_exactly_once() {
        let gateway = InMemoryGateway::new();
        gateway.insert_course(multiplayer_course(1, 2));
        gateway.set_elapsed_on_complete(205);
        let account = AccountId::new(7);

        let svc = service(&gateway);
        let mut attempt = svc.start_attempt(account, CourseId::new(1)).await.unwrap();
        complete_all_correct(&mut attempt);

        let outcome = svc.finalize(&mut attempt, account).await;
        assert!(outcome.passed);
        assert_eq!(outcome.score, 2);
        assert_eq!(outcome.completion_time_seconds, Some(205));

        // Viewing the completion screen again must not re-issue the call.
        let again = svc.finalize(&mut attempt, account).await;
        assert_eq!(gateway.complete_multiplayer_calls(), 1);
        assert_eq!(again.completion_time_seconds, Some(205));
    }

    #[tokio::test]
    async fn failed_time_fetch_still_reports_a_pass() {
        let gateway = InMemoryGateway::new();
        gateway.insert_course(multiplayer_course(1, 1));
        let account = AccountId::new(7);

        let svc = service(&gateway);
        let mut attempt = svc.start_attempt(account, CourseId::new(1)).await.unwrap();
        complete_all_correct(&mut attempt);

        gateway.fail_time_fetch(true);
        let outcome = svc.finalize(&mut attempt, account).await;
        assert!(outcome.passed);
        assert_eq!(outcome.completion_time_seconds, None);
        assert_eq!(gateway.complete_multiplayer_calls(), 1);
    }

    #[tokio::test]
    async fn failed_completion_call_is_swallowed_and_not_retried() {
        let gateway = InMemoryGateway::new();
        gateway.insert_course(multiplayer_course(1, 1));
        gateway.fail_complete(true);
        gateway.fail_time_fetch(true);
        let account = AccountId::new(7);

        let svc = service(&gateway);
        let mut attempt = svc.start_attempt(account, CourseId::new(1)).await.unwrap();
        complete_all_correct(&mut attempt);

        let outcome = svc.finalize(&mut attempt, account).await;
        assert!(outcome.passed);
        assert_eq!(outcome.completion_time_seconds, None);

        let _ = svc.finalize(&mut attempt, account).await;
        assert_eq!(gateway.complete_multiplayer_calls(), 1);
    }

    #[tokio::test]
    async fn unfinished_attempt_never_records_a_completion() {
        let gateway = InMemoryGateway::new();
        gateway.insert_course(multiplayer_course(1, 2));
        let account = AccountId::new(7);

        let svc = service(&gateway);
        let mut attempt = svc.start_attempt(account, CourseId::new(1)).await.unwrap();

        // First question only; the attempt is abandoned before the second.
        attempt.select_answer(AnswerId::new(10)).unwrap();
        attempt.submit().unwrap();
        attempt.advance().unwrap();

        let outcome = svc.finalize(&mut attempt, account).await;
        assert!(!outcome.passed);
        assert_eq!(outcome.completion_time_seconds, None);
        assert_eq!(gateway.complete_multiplayer_calls(), 0);
    }

    #[tokio::test]
    async fn prior_completion_reads_the_recorded_time() {
        let gateway = InMemoryGateway::new();
        let account = AccountId::new(7);
        let course_id = CourseId::new(1);
        gateway.set_completion_time(account, course_id, 120);

        let svc = service(&gateway);
        assert_eq!(svc.prior_completion(account, course_id).await, Some(120));

        gateway.fail_time_fetch(true);
        assert_eq!(svc.prior_completion(account, course_id).await, None);
    }
}
