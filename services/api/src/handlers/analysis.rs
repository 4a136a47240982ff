//! Analysis handlers: analyze text, analyze image, history, detail

use axum::extract::{Path, Query, State};
use axum::Json;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use banter_db::{AnalysisRepository, AnalysisRow, CreateAnalysis};
use banter_types::{AnalysisId, AnalysisKind, Tier};

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Maximum conversation text length in characters (must match the mirror in
/// tests/input_validation.rs)
pub const MAX_CONVERSATION_CHARS: usize = 10_000;

const DEFAULT_HISTORY_LIMIT: i64 = 20;
const MAX_HISTORY_LIMIT: i64 = 100;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub conversation_text: String,
    pub tone: String,
    pub goal: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeImageRequest {
    pub image_base64: String,
    pub tone: String,
    pub goal: String,
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis_id: String,
    pub suggestions: Vec<String>,
    pub analysis_text: String,
    pub tone_used: String,
    pub goal_used: String,
}

impl From<AnalysisRow> for AnalysisResponse {
    fn from(row: AnalysisRow) -> Self {
        Self {
            analysis_id: row.id.to_string(),
            suggestions: row.suggestions,
            analysis_text: row.analysis,
            tone_used: row.tone,
            goal_used: row.goal,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub analyses: Vec<HistoryEntry>,
}

/// History listing entry; image payloads are stripped to a flag
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub id: String,
    pub kind: String,
    pub conversation_text: Option<String>,
    pub has_image: bool,
    pub context_hint: Option<String>,
    pub image_context: Option<String>,
    pub tone: String,
    pub goal: String,
    pub analysis: String,
    pub suggestions: Vec<String>,
    pub tier: String,
    pub created_at: String,
}

impl From<AnalysisRow> for HistoryEntry {
    fn from(row: AnalysisRow) -> Self {
        Self {
            id: row.id.to_string(),
            kind: row.kind,
            conversation_text: row.conversation_text,
            has_image: row.image_base64.is_some(),
            context_hint: row.context_hint,
            image_context: row.image_context,
            tone: row.tone,
            goal: row.goal,
            analysis: row.analysis,
            suggestions: row.suggestions,
            tier: row.tier,
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

/// Full analysis record, including any stored image payload
#[derive(Debug, Serialize)]
pub struct AnalysisDetail {
    pub id: String,
    pub kind: String,
    pub conversation_text: Option<String>,
    pub image_base64: Option<String>,
    pub context_hint: Option<String>,
    pub image_context: Option<String>,
    pub tone: String,
    pub goal: String,
    pub analysis: String,
    pub suggestions: Vec<String>,
    pub raw_response: String,
    pub tier: String,
    pub created_at: String,
}

impl From<AnalysisRow> for AnalysisDetail {
    fn from(row: AnalysisRow) -> Self {
        Self {
            id: row.id.to_string(),
            kind: row.kind,
            conversation_text: row.conversation_text,
            image_base64: row.image_base64,
            context_hint: row.context_hint,
            image_context: row.image_context,
            tone: row.tone,
            goal: row.goal,
            analysis: row.analysis,
            suggestions: row.suggestions,
            raw_response: row.raw_response,
            tier: row.tier,
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Validate conversation text length (1 to 10000 characters)
fn validate_conversation_text(text: &str) -> Result<(), &'static str> {
    let chars = text.chars().count();
    if chars == 0 {
        return Err("conversation_text must not be empty");
    }
    if chars > MAX_CONVERSATION_CHARS {
        return Err("conversation_text exceeds 10000 characters");
    }
    Ok(())
}

/// Validate an image payload is well-formed base64
fn validate_image_base64(payload: &str) -> Result<(), &'static str> {
    if payload.is_empty() {
        return Err("image_base64 must not be empty");
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|_| "image_base64 is not valid base64")?;
    Ok(())
}

/// Validate a tone/goal label is present
fn validate_label(field: &'static str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/analyze-text
///
/// Validate, gate by plan, make one chat call, persist, and shape the
/// response. Validation always precedes the LLM call.
pub async fn analyze_text(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(req): Json<AnalyzeTextRequest>,
) -> ApiResult<Json<AnalysisResponse>> {
    let start = Instant::now();

    validate_conversation_text(&req.conversation_text)
        .map_err(|m| ApiError::Validation(m.to_string()))?;
    validate_label("tone", &req.tone)?;
    validate_label("goal", &req.goal)?;

    let plan = state.plans.check(&auth_user.user, None)?;

    let result = state
        .coach
        .generate_suggestions(
            &req.conversation_text,
            &req.tone,
            &req.goal,
            plan.entitlements.model,
            plan.entitlements.suggestion_count,
        )
        .await?;

    let row = state
        .repos
        .analyses
        .create(CreateAnalysis {
            id: AnalysisId::new().0,
            user_id: auth_user.user.id,
            kind: AnalysisKind::Text.as_str().to_string(),
            conversation_text: Some(req.conversation_text),
            image_base64: None,
            context_hint: None,
            image_context: None,
            tone: req.tone,
            goal: req.goal,
            analysis: result.analysis,
            suggestions: result.suggestions,
            raw_response: result.raw_response,
            tier: plan.tier.to_string(),
        })
        .await?;

    metrics::counter!("analyses_created_total", "kind" => "text").increment(1);
    metrics::histogram!("analysis_duration_seconds", "kind" => "text")
        .record(start.elapsed().as_secs_f64());

    tracing::info!(user_id = %auth_user.user.id, analysis_id = %row.id, "Text analysis created");

    Ok(Json(AnalysisResponse::from(row)))
}

/// POST /api/analyze-image
///
/// Premium-gated: the image is first described by a vision call, then the
/// description feeds the same suggestion pipeline as text. Two chat calls,
/// sequential.
pub async fn analyze_image(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(req): Json<AnalyzeImageRequest>,
) -> ApiResult<Json<AnalysisResponse>> {
    let start = Instant::now();

    validate_image_base64(&req.image_base64).map_err(|m| ApiError::Validation(m.to_string()))?;
    validate_label("tone", &req.tone)?;
    validate_label("goal", &req.goal)?;

    let plan = state.plans.check(&auth_user.user, Some(Tier::Premium))?;

    let image_context = state
        .coach
        .describe_image(
            &req.image_base64,
            req.context.as_deref(),
            plan.entitlements.model,
        )
        .await?;

    let result = state
        .coach
        .generate_suggestions(
            &image_context,
            &req.tone,
            &req.goal,
            plan.entitlements.model,
            plan.entitlements.suggestion_count,
        )
        .await?;

    let row = state
        .repos
        .analyses
        .create(CreateAnalysis {
            id: AnalysisId::new().0,
            user_id: auth_user.user.id,
            kind: AnalysisKind::Image.as_str().to_string(),
            conversation_text: None,
            image_base64: Some(req.image_base64),
            context_hint: req.context,
            image_context: Some(image_context),
            tone: req.tone,
            goal: req.goal,
            analysis: result.analysis,
            suggestions: result.suggestions,
            raw_response: result.raw_response,
            tier: plan.tier.to_string(),
        })
        .await?;

    metrics::counter!("analyses_created_total", "kind" => "image").increment(1);
    metrics::histogram!("analysis_duration_seconds", "kind" => "image")
        .record(start.elapsed().as_secs_f64());

    tracing::info!(user_id = %auth_user.user.id, analysis_id = %row.id, "Image analysis created");

    Ok(Json(AnalysisResponse::from(row)))
}

/// GET /api/history?limit=20
///
/// Recent analyses for the caller, newest first, image payloads stripped
pub async fn history(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<HistoryParams>,
) -> ApiResult<Json<HistoryResponse>> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);

    let rows = state
        .repos
        .analyses
        .list_recent(auth_user.user.id, limit)
        .await?;

    Ok(Json(HistoryResponse {
        analyses: rows.into_iter().map(HistoryEntry::from).collect(),
    }))
}

/// GET /api/analysis/{id}
///
/// Full record, only for its owner
pub async fn get_analysis(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<AnalysisDetail>> {
    let analysis_id = AnalysisId::parse(&id)
        .map_err(|_| ApiError::Validation("invalid analysis id".to_string()))?;

    let row = state
        .repos
        .analyses
        .find_by_id(analysis_id.0)
        .await?
        .ok_or(ApiError::NotFound)?;

    if row.user_id != auth_user.user.id {
        return Err(ApiError::Forbidden(
            "analysis belongs to another user".to_string(),
        ));
    }

    Ok(Json(AnalysisDetail::from(row)))
}
