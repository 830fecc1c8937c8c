#![forbid(unsafe_code)]

pub mod admin;
pub mod attempt;
pub mod auth;
pub mod catalog;
pub mod error;
pub mod leaderboard;

pub use duo_core::Clock;

pub use error::{AdminError, AttemptError, AuthError, CatalogError, LeaderboardError};

pub use attempt::{
    Attempt, AttemptLoopService, AttemptOutcome, AttemptProgress, PASS_THRESHOLD,
};
pub use auth::AuthService;
pub use catalog::CatalogService;
pub use leaderboard::{LEADERBOARD_SIZE, LeaderboardService};
pub use admin::AdminService;
