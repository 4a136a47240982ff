//! Mock repositories for testing

use async_trait::async_trait;
use banter_db::{
    CreateSession, CreateUser, DbResult, SessionRepository, SessionRow, UserRepository, UserRow,
};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// In-memory user repository for testing
#[derive(Default, Clone)]
pub struct MockUserRepository {
    users: Arc<DashMap<Uuid, UserRow>>,
    by_email: Arc<DashMap<String, Uuid>>,
    by_external_id: Arc<DashMap<String, Uuid>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test user directly
    pub fn insert_user(&self, user: UserRow) {
        self.by_email.insert(user.email.clone(), user.id);
        if let Some(ref ext) = user.external_id {
            self.by_external_id.insert(ext.clone(), user.id);
        }
        self.users.insert(user.id, user);
    }

    /// Create a test user with the given subscription state
    pub fn test_user(tier: Option<&str>, expires_at: Option<DateTime<Utc>>) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: format!("test-{}@example.com", Uuid::new_v4()),
            name: "Test User".to_string(),
            picture: None,
            external_id: Some(Uuid::new_v4().to_string()),
            tier: tier.map(String::from),
            subscription_expires_at: expires_at,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>> {
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .by_email
            .get(email)
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn find_by_external_id(&self, external_id: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .by_external_id
            .get(external_id)
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        let row = UserRow {
            id: user.id,
            email: user.email.clone(),
            name: user.name,
            picture: user.picture,
            external_id: user.external_id,
            tier: None,
            subscription_expires_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.insert_user(row.clone());
        Ok(row)
    }

    async fn set_external_id(&self, id: Uuid, external_id: &str) -> DbResult<()> {
        if let Some(mut user) = self.users.get_mut(&id) {
            user.external_id = Some(external_id.to_string());
            user.updated_at = Utc::now();
        }
        self.by_external_id.insert(external_id.to_string(), id);
        Ok(())
    }

    async fn set_subscription(
        &self,
        id: Uuid,
        tier: &str,
        expires_at: DateTime<Utc>,
    ) -> DbResult<()> {
        if let Some(mut user) = self.users.get_mut(&id) {
            user.tier = Some(tier.to_string());
            user.subscription_expires_at = Some(expires_at);
            user.updated_at = Utc::now();
        }
        Ok(())
    }
}

/// In-memory session repository for testing
#[derive(Default, Clone)]
pub struct MockSessionRepository {
    sessions: Arc<DashMap<Uuid, SessionRow>>,
    by_token_hash: Arc<DashMap<String, Uuid>>,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test session directly (for expiry scenarios)
    pub fn insert_session(&self, session: SessionRow) {
        self.by_token_hash
            .insert(session.token_hash.clone(), session.id);
        self.sessions.insert(session.id, session);
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn find_by_token_hash(&self, token_hash: &str) -> DbResult<Option<SessionRow>> {
        Ok(self
            .by_token_hash
            .get(token_hash)
            .and_then(|id| self.sessions.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, session: CreateSession) -> DbResult<SessionRow> {
        let row = SessionRow {
            id: session.id,
            user_id: session.user_id,
            token_hash: session.token_hash,
            created_at: Utc::now(),
            expires_at: session.expires_at,
        };
        self.insert_session(row.clone());
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> DbResult<()> {
        if let Some((_, session)) = self.sessions.remove(&id) {
            self.by_token_hash.remove(&session.token_hash);
        }
        Ok(())
    }

    async fn delete_expired(&self) -> DbResult<u64> {
        let now = Utc::now();
        let expired: Vec<Uuid> = self
            .sessions
            .iter()
            .filter(|r| r.value().expires_at <= now)
            .map(|r| *r.key())
            .collect();

        for id in &expired {
            if let Some((_, session)) = self.sessions.remove(id) {
                self.by_token_hash.remove(&session.token_hash);
            }
        }

        Ok(expired.len() as u64)
    }
}
