//! Experience-point ranking.

use std::sync::Arc;

use api::gateway::AccountGateway;
use duo_core::model::Account;

use crate::error::LeaderboardError;

/// How many learners the leaderboard shows.
pub const LEADERBOARD_SIZE: usize = 10;

/// Ranks learner accounts by experience points.
#[derive(Clone)]
pub struct LeaderboardService {
    accounts: Arc<dyn AccountGateway>,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(accounts: Arc<dyn AccountGateway>) -> Self {
        Self { accounts }
    }

    /// The top learners by experience, descending. Administrator accounts
    /// never rank.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardError` when the account listing fails.
    pub async fn top_users(&self) -> Result<Vec<Account>, LeaderboardError> {
        let mut users: Vec<Account> = self
            .accounts
            .list_accounts()
            .await?
            .into_iter()
            .filter(|account| !account.role.is_admin())
            .collect();
        users.sort_by(|a, b| b.exp.cmp(&a.exp));
        users.truncate(LEADERBOARD_SIZE);
        Ok(users)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
