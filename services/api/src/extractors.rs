//! Axum extractors for authentication

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::header;

use banter_db::UserRow;
use banter_types::SessionId;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from the bearer token.
///
/// Carries the full user row (the auth gate's contract) plus the session id
/// so logout can delete the right record.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: UserRow,
    pub session_id: SessionId,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = bearer_token(parts).ok_or(ApiError::Unauthenticated)?;

        let authed = app_state.auth.authenticate(&token).await.map_err(|e| {
            tracing::debug!(error = %e, "Token authentication failed");
            ApiError::from(e)
        })?;

        Ok(AuthUser {
            user: authed.user,
            session_id: authed.session_id,
        })
    }
}

/// Extract the bearer token from the Authorization header
fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}
