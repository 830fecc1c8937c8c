use std::sync::Arc;

use services::{AdminService, AttemptLoopService, AuthService, CatalogService, LeaderboardService};

/// Services the composition root hands to the UI.
pub trait UiApp: Send + Sync {
    fn auth(&self) -> Arc<AuthService>;
    fn catalog(&self) -> Arc<CatalogService>;
    fn attempts(&self) -> Arc<AttemptLoopService>;
    fn leaderboard(&self) -> Arc<LeaderboardService>;
    fn admin(&self) -> Arc<AdminService>;
}

#[derive(Clone)]
pub struct AppContext {
    auth: Arc<AuthService>,
    catalog: Arc<CatalogService>,
    attempts: Arc<AttemptLoopService>,
    leaderboard: Arc<LeaderboardService>,
    admin: Arc<AdminService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            auth: app.auth(),
            catalog: app.catalog(),
            attempts: app.attempts(),
            leaderboard: app.leaderboard(),
            admin: app.admin(),
        }
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn attempts(&self) -> Arc<AttemptLoopService> {
        Arc::clone(&self.attempts)
    }

    #[must_use]
    pub fn leaderboard(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard)
    }

    #[must_use]
    pub fn admin(&self) -> Arc<AdminService> {
        Arc::clone(&self.admin)
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
