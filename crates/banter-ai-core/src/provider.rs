//! Chat provider trait
//!
//! Defines the single seam through which the service talks to an LLM.

use async_trait::async_trait;

use crate::AiError;

/// Content of the single user turn sent with each request
#[derive(Debug, Clone)]
pub struct UserContent {
    pub text: String,
    /// Base64 image payload attached as a multimodal part
    pub image_base64: Option<String>,
}

impl UserContent {
    /// Text-only user content
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image_base64: None,
        }
    }

    /// Text plus an attached base64 image
    pub fn with_image(text: impl Into<String>, image_base64: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image_base64: Some(image_base64.into()),
        }
    }
}

/// Trait all chat providers implement.
///
/// One request, one reply; no streaming, no tools. The service never makes
/// more than two calls per inbound request.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a system prompt plus one user turn and return the assistant's
    /// reply text.
    async fn chat(&self, model: &str, system: &str, user: UserContent)
        -> Result<String, AiError>;
}
