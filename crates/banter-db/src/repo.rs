//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::*;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>>;

    /// Find a user by the identity provider's subject
    async fn find_by_external_id(&self, external_id: &str) -> DbResult<Option<UserRow>>;

    /// Create a new user
    async fn create(&self, user: CreateUser) -> DbResult<UserRow>;

    /// Record the identity provider's subject for an existing user
    async fn set_external_id(&self, id: Uuid, external_id: &str) -> DbResult<()>;

    /// Set the subscription tier and its expiry
    async fn set_subscription(
        &self,
        id: Uuid,
        tier: &str,
        expires_at: DateTime<Utc>,
    ) -> DbResult<()>;
}

/// Create user input
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub external_id: Option<String>,
}

/// Session repository trait
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Find a session by token hash
    async fn find_by_token_hash(&self, token_hash: &str) -> DbResult<Option<SessionRow>>;

    /// Create a new session
    async fn create(&self, session: CreateSession) -> DbResult<SessionRow>;

    /// Delete a session
    async fn delete(&self, id: Uuid) -> DbResult<()>;

    /// Delete expired sessions
    async fn delete_expired(&self) -> DbResult<u64>;
}

/// Create session input
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

/// Analysis repository trait
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Find an analysis by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<AnalysisRow>>;

    /// List a user's analyses, newest first
    async fn list_recent(&self, user_id: Uuid, limit: i64) -> DbResult<Vec<AnalysisRow>>;

    /// Create a new analysis record
    async fn create(&self, analysis: CreateAnalysis) -> DbResult<AnalysisRow>;
}

/// Create analysis input
#[derive(Debug, Clone)]
pub struct CreateAnalysis {
    pub id: Uuid,
    pub user_id: Uuid,
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
}
