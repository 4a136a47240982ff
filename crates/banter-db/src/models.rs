//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// User row from the database
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    /// Subject issued by the external identity provider
    pub external_id: Option<String>,
    /// Active subscription tier, if any
    pub tier: Option<String>,
    pub subscription_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Session row from the database
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    /// SHA-256 hex of the opaque bearer token; the raw token is never stored
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRow {
    /// Whether the session's stored expiry has passed
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Analysis row from the database
#[derive(Debug, Clone, FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub user_id: Uuid,
    /// "text" or "image"
    pub kind: String,
    pub conversation_text: Option<String>,
    pub image_base64: Option<String>,
    /// User-supplied hint accompanying an image upload
    pub context_hint: Option<String>,
    /// Vision-derived description used as conversation context
    pub image_context: Option<String>,
    pub tone: String,
    pub goal: String,
    pub analysis: String,
    pub suggestions: Vec<String>,
    pub raw_response: String,
    /// Plan tier at the time the analysis was created
    pub tier: String,
    pub created_at: DateTime<Utc>,
}

// Conversion implementations from row types to banter-types domain ids

impl UserRow {
    /// Convert to domain UserId
    pub fn user_id(&self) -> banter_types::UserId {
        banter_types::UserId(self.id)
    }
}

impl SessionRow {
    /// Convert to domain SessionId
    pub fn session_id(&self) -> banter_types::SessionId {
        banter_types::SessionId(self.id)
    }

    /// Convert to domain UserId
    pub fn user_id(&self) -> banter_types::UserId {
        banter_types::UserId(self.user_id)
    }
}

impl AnalysisRow {
    /// Convert to domain AnalysisId
    pub fn analysis_id(&self) -> banter_types::AnalysisId {
        banter_types::AnalysisId(self.id)
    }

    /// Convert to domain UserId
    pub fn user_id(&self) -> banter_types::UserId {
        banter_types::UserId(self.user_id)
    }
}
