//! PostgreSQL repository implementations

mod analysis;
mod session;
mod user;

pub use analysis::PgAnalysisRepository;
pub use session::PgSessionRepository;
pub use user::PgUserRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub users: PgUserRepository,
    pub sessions: PgSessionRepository,
    pub analyses: PgAnalysisRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            users: PgUserRepository::new(pool.clone()),
            sessions: PgSessionRepository::new(pool.clone()),
            analyses: PgAnalysisRepository::new(pool),
        }
    }
}
