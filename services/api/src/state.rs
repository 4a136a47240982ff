//! Application state

use std::ops::Deref;
use std::sync::Arc;

use banter_ai_core::{CoachService, OpenAiChatProvider};
use banter_auth_core::{AuthService, PlanGate};
use banter_db::pg::{PgSessionRepository, PgUserRepository, Repositories};
use banter_db::DbPool;

use crate::config::Config;

/// Type alias for the auth service with concrete repository types
pub type AuthServiceImpl = AuthService<PgUserRepository, PgSessionRepository>;

/// Type alias for the coach service with the concrete provider
pub type CoachServiceImpl = CoachService<OpenAiChatProvider>;

/// Shared database pool wrapper for health checks
#[derive(Clone)]
pub struct SharedPool(Arc<DbPool>);

impl Deref for SharedPool {
    type Target = DbPool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Auth service for session exchange and token validation
    pub auth: Arc<AuthServiceImpl>,
    /// AI orchestration service
    pub coach: Arc<CoachServiceImpl>,
    /// Plan gate over the static tier catalog
    pub plans: PlanGate,
    /// Database repositories
    pub repos: Repositories,
    /// Database connection pool (shared reference for health checks)
    pub pool: SharedPool,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        auth: AuthServiceImpl,
        coach: CoachServiceImpl,
        repos: Repositories,
        pool: DbPool,
        config: Config,
    ) -> Self {
        Self {
            auth: Arc::new(auth),
            coach: Arc::new(coach),
            plans: PlanGate::new(),
            repos,
            pool: SharedPool(Arc::new(pool)),
            config: Arc::new(config),
        }
    }
}
