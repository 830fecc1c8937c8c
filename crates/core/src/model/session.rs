use serde::{Deserialize, Serialize};

use crate::model::{AccountId, Role};

/// The signed-in learner, carried explicitly through the app.
///
/// Populated at login or registration, cleared at logout, and injected into
/// views through the app context rather than read ad hoc from global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub account_id: AccountId,
    pub role: Role,
}

impl Session {
    #[must_use]
    pub fn new(username: impl Into<String>, account_id: AccountId, role: Role) -> Self {
        Self {
            username: username.into(),
            account_id,
            role,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
