//! Authentication handlers (session exchange, me, logout)

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use banter_db::UserRow;

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub session_token: String,
    pub expires_at: String,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub tier: Option<String>,
    pub subscription_expires_at: Option<String>,
    pub created_at: String,
}

impl From<UserRow> for UserInfo {
    fn from(user: UserRow) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            name: user.name,
            picture: user.picture,
            tier: user.tier,
            subscription_expires_at: user.subscription_expires_at.map(|t| t.to_rfc3339()),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth/session
///
/// Exchange a third-party session id (the `X-Session-ID` header) for a user
/// and a fresh bearer token.
pub async fn exchange_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<SessionResponse>> {
    let session_id = headers
        .get("X-Session-ID")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::Unauthenticated)?;

    let established = state.auth.exchange_session(session_id).await?;

    Ok(Json(SessionResponse {
        user_id: established.user.id.to_string(),
        email: established.user.email,
        name: established.user.name,
        picture: established.user.picture,
        session_token: established.token,
        expires_at: established.expires_at.to_rfc3339(),
    }))
}

/// GET /api/auth/me
///
/// Return the current user
pub async fn me(auth_user: AuthUser) -> ApiResult<Json<UserInfo>> {
    Ok(Json(UserInfo::from(auth_user.user)))
}

/// POST /api/auth/logout
///
/// Delete the current session
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<LogoutResponse>> {
    state.auth.logout(auth_user.session_id).await?;

    Ok(Json(LogoutResponse { success: true }))
}
