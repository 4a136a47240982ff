//! Subscription handlers
//!
//! Activation here is mock-grade: it sets the tier and a computed expiry
//! without any payment verification. It is deliberately isolated in this
//! module so a real payment integration can replace it without touching the
//! rest of the API surface.

use axum::extract::State;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use banter_db::UserRepository;
use banter_types::{plan_catalog, BillingPeriod, PlanSpec, Tier};

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PlansResponse {
    pub plans: Vec<PlanSpec>,
}

#[derive(Debug, Deserialize)]
pub struct ActivateRequest {
    pub plan: String,
    pub billing_period: String,
}

#[derive(Debug, Serialize)]
pub struct ActivateResponse {
    pub success: bool,
    pub tier: String,
    pub billing_period: String,
    pub expires_at: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/subscription/plans
///
/// Public: the static tier catalog
pub async fn list_plans() -> Json<PlansResponse> {
    Json(PlansResponse {
        plans: plan_catalog().to_vec(),
    })
}

/// POST /api/subscription/activate
///
/// Mock activation: sets the caller's tier and an expiry 30 or 365 days out.
pub async fn activate(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(req): Json<ActivateRequest>,
) -> ApiResult<Json<ActivateResponse>> {
    let tier: Tier = req
        .plan
        .parse()
        .map_err(|_| ApiError::Validation(format!("invalid plan: {}", req.plan)))?;

    let period: BillingPeriod = req
        .billing_period
        .parse()
        .map_err(|_| ApiError::Validation(format!("invalid billing_period: {}", req.billing_period)))?;

    let expires_at = Utc::now() + Duration::days(period.days());

    state
        .repos
        .users
        .set_subscription(auth_user.user.id, &tier.to_string(), expires_at)
        .await?;

    metrics::counter!("subscriptions_activated_total").increment(1);
    tracing::info!(user_id = %auth_user.user.id, tier = %tier, period = %period, "Subscription activated (mock)");

    Ok(Json(ActivateResponse {
        success: true,
        tier: tier.to_string(),
        billing_period: period.to_string(),
        expires_at: expires_at.to_rfc3339(),
    }))
}
