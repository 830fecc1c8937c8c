//! Login, registration and the persisted session.

use std::sync::Arc;

use log::warn;

use api::SessionStore;
use api::gateway::{AccountGateway, Credentials, ProfileUpdate, Registration};
use duo_core::model::{Account, AccountId, Session};

use crate::error::AuthError;

/// Authenticates against the account service and keeps the active session
/// in a [`SessionStore`].
#[derive(Clone)]
pub struct AuthService {
    accounts: Arc<dyn AccountGateway>,
    sessions: Arc<dyn SessionStore>,
}

impl AuthService {
    #[must_use]
    pub fn new(accounts: Arc<dyn AccountGateway>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { accounts, sessions }
    }

    /// The session persisted by a previous login, if any.
    ///
    /// A store that cannot be read (missing directory, corrupted file) reads
    /// as signed out rather than blocking the app.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        match self.sessions.load() {
            Ok(session) => session,
            Err(err) => {
                warn!("failed to read stored session: {err}");
                None
            }
        }
    }

    /// Authenticate and persist the resulting session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` before hitting the network when
    /// either field is blank, `AuthError::Api` when the service rejects the
    /// credentials, and `AuthError::Store` when the session cannot be saved.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        let account = self
            .accounts
            .login(&Credentials {
                username: username.trim().to_string(),
                password: password.to_string(),
            })
            .await?;
        let session = Session::new(account.username, account.id, account.role);
        self.sessions.save(&session)?;
        Ok(session)
    }

    /// Create an account. Registration does not log the account in; the
    /// learner signs in afterwards.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` when any field is blank, or
    /// `AuthError::Api` when the service rejects the registration.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AuthError> {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        let account = self
            .accounts
            .register(&Registration {
                username: username.trim().to_string(),
                email: email.trim().to_string(),
                password: password.to_string(),
            })
            .await?;
        Ok(account)
    }

    /// Drop the persisted session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` when the store cannot be cleared.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.sessions.clear()?;
        Ok(())
    }

    /// Full account record behind the session, for the profile page.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api` when the lookup fails.
    pub async fn account(&self, id: AccountId) -> Result<Account, AuthError> {
        Ok(self.accounts.get_account(id).await?)
    }

    /// Update the account and refresh the persisted session so the sidebar
    /// shows the new username immediately.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` when username or email is
    /// blank, `AuthError::Api` when the update fails, and `AuthError::Store`
    /// when the refreshed session cannot be saved.
    pub async fn update_profile(
        &self,
        id: AccountId,
        update: ProfileUpdate,
    ) -> Result<Account, AuthError> {
        if update.username.trim().is_empty() || update.email.trim().is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        let account = self.accounts.update_account(id, &update).await?;
        let session = Session::new(account.username.clone(), account.id, account.role);
        self.sessions.save(&session)?;
        Ok(account)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use api::{InMemoryGateway, InMemorySessionStore};
    use duo_core::model::Role;

    fn account(id: u64, username: &str, role: Role) -> Account {
        Account {
            id: AccountId::new(id),
            username: username.into(),
            email: format!("{username}@example.com"),
            exp: 0,
            role,
            image_url: None,
            created_at: None,
        }
    }

    fn service(gateway: &InMemoryGateway) -> (AuthService, Arc<InMemorySessionStore>) {
        let store = Arc::new(InMemorySessionStore::new());
        let svc = AuthService::new(Arc::new(gateway.clone()), store.clone());
        (svc, store)
    }

    #[tokio::test]
    async fn login_persists_the_session() {
        let gateway = InMemoryGateway::new();
        gateway.insert_account(account(3, "wira", Role::User), "secret");

        let (svc, store) = service(&gateway);
        let session = svc.login("wira", "secret").await.unwrap();
        assert_eq!(session.account_id, AccountId::new(3));
        assert_eq!(store.load().unwrap().unwrap().username, "wira");
    }

    #[tokio::test]
    async fn blank_credentials_never_hit_the_network() {
        let gateway = InMemoryGateway::new();
        let (svc, store) = service(&gateway);

        let result = svc.login("   ", "secret").await;
        assert!(matches!(result, Err(AuthError::MissingCredentials)));
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn rejected_login_leaves_no_session() {
        let gateway = InMemoryGateway::new();
        gateway.insert_account(account(3, "wira", Role::User), "secret");

        let (svc, store) = service(&gateway);
        let result = svc.login("wira", "wrong").await;
        assert!(matches!(result, Err(AuthError::Api(_))));
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn register_does_not_log_in() {
        let gateway = InMemoryGateway::new();
        let (svc, store) = service(&gateway);

        let created = svc
            .register("mira", "mira@example.com", "secret")
            .await
            .unwrap();
        assert_eq!(created.username, "mira");
        assert!(store.load().unwrap().is_none());

        svc.login("mira", "secret").await.unwrap();
        assert!(store.load().unwrap().is_some());
    }

    #[tokio::test]
    async fn logout_clears_the_session() {
        let gateway = InMemoryGateway::new();
        gateway.insert_account(account(3, "wira", Role::User), "secret");

        let (svc, store) = service(&gateway);
        svc.login("wira", "secret").await.unwrap();
        svc.logout().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn profile_update_refreshes_the_session_username() {
        let gateway = InMemoryGateway::new();
        gateway.insert_account(account(3, "wira", Role::User), "secret");

        let (svc, store) = service(&gateway);
        svc.login("wira", "secret").await.unwrap();

        let updated = svc
            .update_profile(
                AccountId::new(3),
                ProfileUpdate {
                    username: "wira2".into(),
                    email: "wira2@example.com".into(),
                    password: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.username, "wira2");
        assert_eq!(store.load().unwrap().unwrap().username, "wira2");
    }
}
