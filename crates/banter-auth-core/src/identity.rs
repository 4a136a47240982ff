//! External identity provider abstraction
//!
//! The login flow hands the backend a third-party session id; the provider's
//! session-data endpoint resolves it into a user profile. The provider is
//! behind a trait so tests can substitute a stub.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::error;

use crate::AuthError;

/// Profile resolved from a third-party session id
#[derive(Debug, Clone, Deserialize)]
pub struct SessionData {
    /// Subject identifier issued by the provider
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

/// Identity provider trait
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a third-party session id into a user profile
    async fn fetch_session_data(&self, session_id: &str) -> Result<SessionData, AuthError>;
}

/// HTTP identity provider calling the external session-data endpoint
#[derive(Clone)]
pub struct HttpIdentityProvider {
    client: Client,
    session_data_url: String,
}

impl HttpIdentityProvider {
    /// Create a new provider against the given session-data endpoint URL
    pub fn new(session_data_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            session_data_url: session_data_url.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn fetch_session_data(&self, session_id: &str) -> Result<SessionData, AuthError> {
        let response = self
            .client
            .get(&self.session_data_url)
            .header("X-Session-ID", session_id)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Session exchange request failed");
                AuthError::IdentityProvider(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Session exchange rejected");
            return Err(AuthError::IdentityProvider(format!(
                "session exchange failed: {status}"
            )));
        }

        response.json::<SessionData>().await.map_err(|e| {
            error!(error = %e, "Failed to parse session-data response");
            AuthError::IdentityProvider(e.to_string())
        })
    }
}
