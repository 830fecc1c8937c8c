//! Shared error types for the services crate.

use thiserror::Error;

use api::{ApiError, SessionStoreError};
use duo_core::model::CourseError;

/// Errors emitted by the attempt state machine and loop.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AttemptError {
    #[error("course has no questions")]
    EmptyCourse,
    #[error("feedback is showing; advance before changing the response")]
    FeedbackShowing,
    #[error("no feedback to advance from; submit an answer first")]
    FeedbackNotShown,
    #[error("no answer selected or text entered")]
    NoResponse,
    #[error("attempt already completed")]
    Completed,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("username and password must not be empty")]
    MissingCredentials,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

/// Errors emitted by `LeaderboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LeaderboardError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `AdminService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AdminError {
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
