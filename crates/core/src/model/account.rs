use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::ids::AccountId;

/// Account role as spelled on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// A Duomonggo account as returned by the Remote Course Service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    /// Experience points accumulated from first-time course completions.
    #[serde(default)]
    pub exp: u64,
    pub role: Role,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_decodes_wire_shape() {
        let json = r#"{
            "id": 3,
            "username": "benedict",
            "email": "b@example.com",
            "exp": 120,
            "role": "ADMIN",
            "imageUrl": null
        }"#;

        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.id, AccountId::new(3));
        assert!(account.role.is_admin());
        assert_eq!(account.exp, 120);
        assert!(account.image_url.is_none());
    }

    #[test]
    fn user_role_is_not_admin() {
        let role: Role = serde_json::from_str("\"USER\"").unwrap();
        assert!(!role.is_admin());
    }
}
