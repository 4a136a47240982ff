//! Session management
//!
//! Sessions are DB-backed: an opaque minted token maps to a row holding the
//! owning user and an expiry. Expiry is compared against the current time on
//! every authentication, never pre-computed into a flag.

use std::sync::Arc;

use banter_db::{CreateSession, SessionRepository, SessionRow};
use banter_types::{SessionId, UserId};
use chrono::{DateTime, Duration as ChronoDuration, Utc};

use crate::token::{hash_token, mint_token};
use crate::AuthError;

/// Session manager handles session creation, lookup, and deletion
#[derive(Clone)]
pub struct SessionManager<R: SessionRepository> {
    repo: Arc<R>,
    session_duration_hours: u32,
}

impl<R: SessionRepository> SessionManager<R> {
    /// Create a new session manager
    pub fn new(repo: Arc<R>, session_duration_hours: u32) -> Self {
        Self {
            repo,
            session_duration_hours,
        }
    }

    /// Create a new session for a user.
    ///
    /// Returns the stored row together with the raw token; the raw token is
    /// not recoverable afterwards.
    pub async fn create_session(
        &self,
        user_id: UserId,
    ) -> Result<(SessionRow, String), AuthError> {
        let token = mint_token();
        let expires_at = self.expiry_from_now(Utc::now());

        let create = CreateSession {
            id: SessionId::new().0,
            user_id: user_id.0,
            token_hash: hash_token(&token),
            expires_at,
        };

        let row = self.repo.create(create).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to create session");
            AuthError::Database(e)
        })?;

        Ok((row, token))
    }

    /// Look up the session for a raw bearer token.
    ///
    /// A token with no matching row and a row whose expiry has passed are
    /// both authentication failures; the expired row is left in place for
    /// the periodic sweep.
    pub async fn authenticate(&self, token: &str) -> Result<SessionRow, AuthError> {
        let session = self
            .repo
            .find_by_token_hash(&hash_token(token))
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        if session.is_expired(Utc::now()) {
            tracing::debug!(session_id = %session.id, "Session expired");
            return Err(AuthError::SessionExpired);
        }

        Ok(session)
    }

    /// Delete a session by ID (logout)
    pub async fn delete_session(&self, session_id: SessionId) -> Result<(), AuthError> {
        self.repo.delete(session_id.0).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to delete session");
            AuthError::Database(e)
        })
    }

    /// Delete all expired sessions, returning the number removed
    pub async fn sweep_expired(&self) -> Result<u64, AuthError> {
        Ok(self.repo.delete_expired().await?)
    }

    fn expiry_from_now(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + ChronoDuration::hours(i64::from(self.session_duration_hours))
    }
}

impl<R: SessionRepository> std::fmt::Debug for SessionManager<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("session_duration_hours", &self.session_duration_hours)
            .finish_non_exhaustive()
    }
}
