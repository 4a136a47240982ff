//! Auth service - ties together session exchange, token authentication, and
//! logout

use std::sync::Arc;

use banter_db::{CreateUser, SessionRepository, UserRepository, UserRow};
use banter_types::{SessionId, UserId};
use chrono::{DateTime, Utc};

use crate::identity::{IdentityProvider, SessionData};
use crate::session::SessionManager;
use crate::AuthError;

/// Result of authenticating a bearer token: the full user record plus the
/// session it came from (logout needs the session id)
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: UserRow,
    pub session_id: SessionId,
}

/// Result of a successful session exchange
#[derive(Debug, Clone)]
pub struct EstablishedSession {
    pub user: UserRow,
    /// Raw bearer token, returned to the client exactly once
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Authentication service
///
/// Provides the unified interface the HTTP layer consumes:
/// - Session exchange against the external identity provider
/// - Bearer-token authentication (the auth gate)
/// - Logout
pub struct AuthService<U: UserRepository, S: SessionRepository> {
    identity: Arc<dyn IdentityProvider>,
    sessions: SessionManager<S>,
    users: Arc<U>,
}

impl<U: UserRepository, S: SessionRepository> AuthService<U, S> {
    /// Create a new auth service
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        users: Arc<U>,
        session_repo: Arc<S>,
        session_duration_hours: u32,
    ) -> Self {
        Self {
            identity,
            sessions: SessionManager::new(session_repo, session_duration_hours),
            users,
        }
    }

    // =========================================================================
    // Session Exchange
    // =========================================================================

    /// Exchange a third-party session id for a user and a fresh bearer token.
    ///
    /// The user is created on first exchange and reused afterwards.
    pub async fn exchange_session(
        &self,
        external_session_id: &str,
    ) -> Result<EstablishedSession, AuthError> {
        let data = self.identity.fetch_session_data(external_session_id).await?;

        let user = self.get_or_create_user(&data).await?;
        let (session, token) = self.sessions.create_session(user.user_id()).await?;

        tracing::info!(user_id = %user.id, session_id = %session.id, "Session established");

        Ok(EstablishedSession {
            user,
            token,
            expires_at: session.expires_at,
        })
    }

    // =========================================================================
    // Auth Gate
    // =========================================================================

    /// Authenticate a bearer token, returning the current user.
    ///
    /// Fails when the session is unknown, its expiry has passed, or the
    /// referenced user record is gone. No retries; a failed lookup is
    /// terminal for the request.
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let session = self.sessions.authenticate(token).await?;

        let user = self
            .users
            .find_by_id(session.user_id)
            .await?
            .ok_or(AuthError::UserMissing)?;

        Ok(AuthenticatedUser {
            user,
            session_id: session.session_id(),
        })
    }

    /// Delete the session backing a bearer token (logout)
    pub async fn logout(&self, session_id: SessionId) -> Result<(), AuthError> {
        self.sessions.delete_session(session_id).await
    }

    /// Delete expired sessions
    pub async fn sweep_expired_sessions(&self) -> Result<u64, AuthError> {
        self.sessions.sweep_expired().await
    }

    // =========================================================================
    // User Management
    // =========================================================================

    /// Find the user for an exchanged profile, creating one on first login.
    ///
    /// Matches by the provider subject first, then by email (backfilling the
    /// subject for accounts that predate it).
    async fn get_or_create_user(&self, data: &SessionData) -> Result<UserRow, AuthError> {
        if let Some(user) = self.users.find_by_external_id(&data.id).await? {
            return Ok(user);
        }

        if let Some(mut user) = self.users.find_by_email(&data.email).await? {
            self.users.set_external_id(user.id, &data.id).await?;
            user.external_id = Some(data.id.clone());
            return Ok(user);
        }

        let create = CreateUser {
            id: UserId::new().0,
            email: data.email.clone(),
            name: data.name.clone(),
            picture: data.picture.clone(),
            external_id: Some(data.id.clone()),
        };

        let user = self.users.create(create).await?;
        tracing::info!(user_id = %user.id, "User created on first session exchange");
        Ok(user)
    }
}

impl<U: UserRepository, S: SessionRepository> std::fmt::Debug for AuthService<U, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish_non_exhaustive()
    }
}
