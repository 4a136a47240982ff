//! Session lifecycle tests: exchange, authenticate, expire, logout

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use banter_auth_core::{
    hash_token, AuthError, AuthService, IdentityProvider, PlanError, PlanGate, SessionData,
};
use banter_db::{SessionRow, UserRepository};
use banter_types::Tier;
use chrono::{Duration, Utc};
use uuid::Uuid;

use common::mock_repos::{MockSessionRepository, MockUserRepository};

/// Identity provider stub resolving every session id to a fixed profile
struct StubIdentity {
    data: SessionData,
}

impl StubIdentity {
    fn new(subject: &str, email: &str) -> Self {
        Self {
            data: SessionData {
                id: subject.to_string(),
                email: email.to_string(),
                name: "Stub User".to_string(),
                picture: Some("https://example.com/p.png".to_string()),
            },
        }
    }
}

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn fetch_session_data(&self, _session_id: &str) -> Result<SessionData, AuthError> {
        Ok(self.data.clone())
    }
}

/// Identity provider stub that always fails
struct FailingIdentity;

#[async_trait]
impl IdentityProvider for FailingIdentity {
    async fn fetch_session_data(&self, _session_id: &str) -> Result<SessionData, AuthError> {
        Err(AuthError::IdentityProvider("boom".to_string()))
    }
}

fn service(
    identity: Arc<dyn IdentityProvider>,
) -> (
    AuthService<MockUserRepository, MockSessionRepository>,
    MockUserRepository,
    MockSessionRepository,
) {
    let users = MockUserRepository::new();
    let sessions = MockSessionRepository::new();
    let service = AuthService::new(
        identity,
        Arc::new(users.clone()),
        Arc::new(sessions.clone()),
        24,
    );
    (service, users, sessions)
}

#[tokio::test]
async fn test_exchange_then_me_returns_same_user() {
    let (service, _, _) = service(Arc::new(StubIdentity::new("sub-1", "a@example.com")));

    let established = service.exchange_session("ext-session-1").await.unwrap();
    let authed = service.authenticate(&established.token).await.unwrap();

    assert_eq!(authed.user.id, established.user.id);
    assert_eq!(authed.user.email, "a@example.com");
}

#[tokio::test]
async fn test_second_exchange_reuses_user() {
    let (service, users, sessions) =
        service(Arc::new(StubIdentity::new("sub-1", "a@example.com")));

    let first = service.exchange_session("ext-1").await.unwrap();
    let second = service.exchange_session("ext-2").await.unwrap();

    assert_eq!(first.user.id, second.user.id);
    assert_eq!(users.user_count(), 1);
    // Each exchange still mints its own session
    assert_eq!(sessions.session_count(), 2);
}

#[tokio::test]
async fn test_exchange_backfills_external_id_by_email() {
    let (service, users, _) = service(Arc::new(StubIdentity::new("sub-9", "a@example.com")));

    // Pre-existing account with no provider subject
    let mut existing = MockUserRepository::test_user(None, None);
    existing.email = "a@example.com".to_string();
    existing.external_id = None;
    let existing_id = existing.id;
    users.insert_user(existing);

    let established = service.exchange_session("ext-1").await.unwrap();

    assert_eq!(established.user.id, existing_id);
    assert_eq!(established.user.external_id.as_deref(), Some("sub-9"));
    assert_eq!(users.user_count(), 1);
}

#[tokio::test]
async fn test_unknown_token_is_unauthenticated() {
    let (service, _, _) = service(Arc::new(StubIdentity::new("sub-1", "a@example.com")));

    let result = service.authenticate("no-such-token").await;
    assert!(matches!(result, Err(AuthError::SessionNotFound)));
}

#[tokio::test]
async fn test_expired_session_is_unauthenticated() {
    let (service, users, sessions) =
        service(Arc::new(StubIdentity::new("sub-1", "a@example.com")));

    let user = MockUserRepository::test_user(None, None);
    let user_id = user.id;
    users.insert_user(user);

    // Session row whose stored expiry is in the past; the row still exists
    let token = "expired-token";
    sessions.insert_session(SessionRow {
        id: Uuid::new_v4(),
        user_id,
        token_hash: hash_token(token),
        created_at: Utc::now() - Duration::hours(48),
        expires_at: Utc::now() - Duration::hours(1),
    });

    let result = service.authenticate(token).await;
    assert!(matches!(result, Err(AuthError::SessionExpired)));
}

#[tokio::test]
async fn test_session_expiring_exactly_now_is_unauthenticated() {
    let (service, users, sessions) =
        service(Arc::new(StubIdentity::new("sub-1", "a@example.com")));

    let user = MockUserRepository::test_user(None, None);
    let user_id = user.id;
    users.insert_user(user);

    let token = "boundary-token";
    sessions.insert_session(SessionRow {
        id: Uuid::new_v4(),
        user_id,
        token_hash: hash_token(token),
        created_at: Utc::now(),
        expires_at: Utc::now(),
    });

    let result = service.authenticate(token).await;
    assert!(matches!(result, Err(AuthError::SessionExpired)));
}

#[tokio::test]
async fn test_session_for_missing_user_is_unauthenticated() {
    let (service, _, sessions) = service(Arc::new(StubIdentity::new("sub-1", "a@example.com")));

    let token = "orphan-token";
    sessions.insert_session(SessionRow {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        token_hash: hash_token(token),
        created_at: Utc::now(),
        expires_at: Utc::now() + Duration::hours(1),
    });

    let result = service.authenticate(token).await;
    assert!(matches!(result, Err(AuthError::UserMissing)));
}

#[tokio::test]
async fn test_logout_deletes_session() {
    let (service, _, sessions) = service(Arc::new(StubIdentity::new("sub-1", "a@example.com")));

    let established = service.exchange_session("ext-1").await.unwrap();
    let authed = service.authenticate(&established.token).await.unwrap();

    service.logout(authed.session_id).await.unwrap();
    assert_eq!(sessions.session_count(), 0);

    let result = service.authenticate(&established.token).await;
    assert!(matches!(result, Err(AuthError::SessionNotFound)));
}

#[tokio::test]
async fn test_identity_failure_surfaces_as_upstream() {
    let (service, users, sessions) = service(Arc::new(FailingIdentity));

    let result = service.exchange_session("ext-1").await;
    assert!(matches!(result, Err(AuthError::IdentityProvider(_))));

    // Nothing persisted on a failed exchange
    assert_eq!(users.user_count(), 0);
    assert_eq!(sessions.session_count(), 0);
}

#[tokio::test]
async fn test_sweep_removes_only_expired() {
    let (service, users, sessions) =
        service(Arc::new(StubIdentity::new("sub-1", "a@example.com")));

    let user = MockUserRepository::test_user(None, None);
    let user_id = user.id;
    users.insert_user(user);

    sessions.insert_session(SessionRow {
        id: Uuid::new_v4(),
        user_id,
        token_hash: hash_token("stale"),
        created_at: Utc::now() - Duration::days(10),
        expires_at: Utc::now() - Duration::days(3),
    });
    sessions.insert_session(SessionRow {
        id: Uuid::new_v4(),
        user_id,
        token_hash: hash_token("fresh"),
        created_at: Utc::now(),
        expires_at: Utc::now() + Duration::days(3),
    });

    let removed = service.sweep_expired_sessions().await.unwrap();
    assert_eq!(removed, 1);
    assert_eq!(sessions.session_count(), 1);
}

#[tokio::test]
async fn test_activation_becomes_visible_to_plan_gate() {
    let users = MockUserRepository::new();
    let gate = PlanGate::new();

    let user = MockUserRepository::test_user(None, None);
    let user_id = user.id;
    users.insert_user(user.clone());

    // Ungated before activation
    assert_eq!(gate.check(&user, None).unwrap_err(), PlanError::NoActivePlan);

    // Monthly activation sets the tier and a ~30-day expiry
    let expires_at = Utc::now() + Duration::days(30);
    users
        .set_subscription(user_id, &Tier::Premium.to_string(), expires_at)
        .await
        .unwrap();

    let refreshed = users.find_by_id(user_id).await.unwrap().unwrap();
    let plan = gate.check(&refreshed, Some(Tier::Premium)).unwrap();
    assert_eq!(plan.tier, Tier::Premium);
    assert_eq!(plan.entitlements.suggestion_count, 4);
}
