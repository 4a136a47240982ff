//! Error types for the API service.
//!
//! Domain failures are raised close to their detection point and pass
//! through unchanged; anything unclassified is logged with its full chain
//! and shaped into a generic 500.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use banter_auth_core::{AuthError, PlanError};

/// Whether internal error details are exposed in response bodies.
/// Set once at startup from config.
static EXPOSE_DETAILS: AtomicBool = AtomicBool::new(false);

/// Enable or disable detail exposure (from the debug flag)
pub fn set_debug_errors(enabled: bool) {
    EXPOSE_DETAILS.store(enabled, Ordering::Relaxed);
}

/// Wire error body: flat `{error, message, details}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing, invalid, or expired session")]
    Unauthenticated,

    #[error("An active subscription is required")]
    PaymentRequired,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("AI provider failed: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error")]
    Database(#[from] banter_db::DbError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::PaymentRequired => StatusCode::PAYMENT_REQUIRED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Upstream(_) | Self::Internal(_) | Self::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::PaymentRequired => "PAYMENT_REQUIRED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Upstream(_) => "UPSTREAM_FAILURE",
            Self::Internal(_) | Self::Database(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the public message is the error's own text or a generic one
    fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_) | Self::Database(_))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        let (message, details) = if self.is_internal() {
            // Log the full chain; suppress it on the wire unless debugging
            tracing::error!(error = ?self, "Internal API error");
            let details = EXPOSE_DETAILS
                .load(Ordering::Relaxed)
                .then(|| serde_json::Value::String(self.to_string()));
            ("Internal server error".to_string(), details)
        } else {
            (self.to_string(), None)
        };

        let body = ErrorBody {
            error: code,
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::SessionNotFound | AuthError::SessionExpired | AuthError::UserMissing => {
                Self::Unauthenticated
            }
            AuthError::IdentityProvider(message) => Self::Upstream(message),
            AuthError::Database(e) => Self::Database(e),
        }
    }
}

impl From<PlanError> for ApiError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::NoActivePlan | PlanError::PlanExpired => Self::PaymentRequired,
            PlanError::TierTooLow { required } => {
                Self::Forbidden(format!("requires {required} tier or higher"))
            }
        }
    }
}

impl From<banter_ai_core::AiError> for ApiError {
    fn from(err: banter_ai_core::AiError) -> Self {
        Self::Upstream(err.to_string())
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
