//! OpenAI-compatible chat provider implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::provider::{ChatProvider, UserContent};
use crate::AiError;

/// Default API base for OpenAI-compatible providers
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Provider configuration
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
}

impl OpenAiConfig {
    /// Configuration against the default API base
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Override the API base (proxies, compatible providers, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// OpenAI-compatible chat provider
#[derive(Clone)]
pub struct OpenAiChatProvider {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiChatProvider {
    /// Create a new provider
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAiChatProvider {
    async fn chat(
        &self,
        model: &str,
        system: &str,
        user: UserContent,
    ) -> Result<String, AiError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        debug!(model = %model, multimodal = user.image_base64.is_some(), "Chat completion request");

        let body = ChatCompletionRequest {
            model,
            messages: vec![
                WireMessage {
                    role: "system",
                    content: WireContent::Text(system.to_string()),
                },
                WireMessage {
                    role: "user",
                    content: user.into(),
                },
            ],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Chat completion request failed");
                AiError::Request(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            error!(status = status, body = %message, "Chat provider error");
            return Err(AiError::Provider { status, message });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse chat completion");
            AiError::MalformedReply(e.to_string())
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AiError::MalformedReply("no choices in completion".to_string()))
    }
}

// Wire types for the chat-completions endpoint

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: WireContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WireContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

impl From<UserContent> for WireContent {
    fn from(user: UserContent) -> Self {
        match user.image_base64 {
            None => WireContent::Text(user.text),
            Some(image_base64) => WireContent::Parts(vec![
                ContentPart::Text { text: user.text },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: format!("data:image/jpeg;base64,{image_base64}"),
                    },
                },
            ]),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}
