//! Course discovery and enrollment.

use std::sync::Arc;

use log::warn;

use api::gateway::{CompletionEntry, CourseGateway, ProgressGateway};
use duo_core::model::{AccountId, Course, CourseId, CourseType};
use duo_core::time::deadline_passed;

use crate::Clock;
use crate::error::CatalogError;

/// Lists courses for the two catalog pages and handles enrollment state.
#[derive(Clone)]
pub struct CatalogService {
    clock: Clock,
    courses: Arc<dyn CourseGateway>,
    progress: Arc<dyn ProgressGateway>,
}

impl CatalogService {
    #[must_use]
    pub fn new(
        clock: Clock,
        courses: Arc<dyn CourseGateway>,
        progress: Arc<dyn ProgressGateway>,
    ) -> Self {
        Self {
            clock,
            courses,
            progress,
        }
    }

    /// # Errors
    ///
    /// Returns `CatalogError` when the listing request fails.
    pub async fn list_singleplayer(&self) -> Result<Vec<Course>, CatalogError> {
        Ok(self
            .courses
            .list_courses_by_type(CourseType::Singleplayer)
            .await?)
    }

    /// # Errors
    ///
    /// Returns `CatalogError` when the listing request fails.
    pub async fn list_multiplayer(&self) -> Result<Vec<Course>, CatalogError> {
        Ok(self
            .courses
            .list_courses_by_type(CourseType::Multiplayer)
            .await?)
    }

    /// Whether the course can still be started. Courses without a deadline
    /// are always startable; a deadline closes the course once it passes.
    #[must_use]
    pub fn startable(&self, course: &Course) -> bool {
        match course.deadline {
            Some(deadline) => !deadline_passed(self.clock.now(), deadline),
            None => true,
        }
    }

    /// Record that the learner opened a singleplayer course.
    ///
    /// Best-effort: the learner proceeds into the course either way.
    pub async fn start_enrollment(&self, account_id: AccountId, course_id: CourseId) {
        if let Err(err) = self.progress.start_enrollment(account_id, course_id).await {
            warn!("failed to record enrollment for course {course_id}: {err}");
        }
    }

    /// Whether the learner already finished this course. Errors read as
    /// not-completed so the catalog still renders.
    pub async fn enrollment_completed(&self, account_id: AccountId, course_id: CourseId) -> bool {
        match self
            .progress
            .enrollment_completed(account_id, course_id)
            .await
        {
            Ok(done) => done,
            Err(err) => {
                warn!("failed to check completion for course {course_id}: {err}");
                false
            }
        }
    }

    /// All recorded completion times for a course, fastest first.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` when the request fails.
    pub async fn course_times(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<CompletionEntry>, CatalogError> {
        let mut entries = self.progress.course_completion_times(course_id).await?;
        entries.sort_by_key(|entry| entry.completion_time);
        Ok(entries)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
