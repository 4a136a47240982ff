//! Contract tests for the HTTP identity provider

use banter_auth_core::{AuthError, HttpIdentityProvider, IdentityProvider};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_session_data_sends_session_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/session-data"))
        .and(header("X-Session-ID", "ext-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "sub-123",
            "email": "user@example.com",
            "name": "Some User",
            "picture": "https://cdn.example.com/u.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = HttpIdentityProvider::new(format!("{}/auth/session-data", server.uri()));
    let data = provider.fetch_session_data("ext-abc").await.unwrap();

    assert_eq!(data.id, "sub-123");
    assert_eq!(data.email, "user@example.com");
    assert_eq!(data.name, "Some User");
    assert_eq!(data.picture.as_deref(), Some("https://cdn.example.com/u.png"));
}

#[tokio::test]
async fn test_fetch_session_data_tolerates_extra_fields() {
    let server = MockServer::start().await;

    // Providers ship more fields than we consume; unknown keys must not break
    Mock::given(method("GET"))
        .and(path("/auth/session-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "sub-1",
            "email": "u@example.com",
            "name": "U",
            "picture": null,
            "session_token": "provider-side-token",
            "locale": "en-US"
        })))
        .mount(&server)
        .await;

    let provider = HttpIdentityProvider::new(format!("{}/auth/session-data", server.uri()));
    let data = provider.fetch_session_data("ext-1").await.unwrap();

    assert_eq!(data.id, "sub-1");
    assert!(data.picture.is_none());
}

#[tokio::test]
async fn test_provider_rejection_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/session-data"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid session"))
        .mount(&server)
        .await;

    let provider = HttpIdentityProvider::new(format!("{}/auth/session-data", server.uri()));
    let err = provider.fetch_session_data("bad").await.unwrap_err();

    match err {
        AuthError::IdentityProvider(msg) => assert!(msg.contains("401")),
        other => panic!("expected IdentityProvider error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/session-data"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let provider = HttpIdentityProvider::new(format!("{}/auth/session-data", server.uri()));
    let err = provider.fetch_session_data("ext").await.unwrap_err();

    assert!(matches!(err, AuthError::IdentityProvider(_)));
}
