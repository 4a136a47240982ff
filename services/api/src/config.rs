//! Configuration for the banter API service.

use banter_ai_core::OpenAiConfig;

/// API service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Database URL
    pub database_url: String,

    /// LLM provider API key
    pub llm_api_key: String,

    /// LLM provider API base URL
    pub llm_base_url: String,

    /// Full URL of the external session-data endpoint
    pub session_exchange_url: String,

    /// How long minted sessions stay valid
    pub session_duration_hours: u32,

    /// Expose internal error details in responses
    pub debug_errors: bool,

    /// Metrics enabled
    pub metrics_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let http_port = std::env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        let llm_api_key =
            std::env::var("LLM_API_KEY").map_err(|_| ConfigError::Missing("LLM_API_KEY"))?;

        let llm_base_url = std::env::var("LLM_BASE_URL")
            .unwrap_or_else(|_| banter_ai_core::openai::DEFAULT_API_BASE.to_string());

        let session_exchange_url = std::env::var("SESSION_EXCHANGE_URL")
            .map_err(|_| ConfigError::Missing("SESSION_EXCHANGE_URL"))?;

        // Session duration (default 7 days)
        let session_duration_hours: u32 = std::env::var("SESSION_DURATION_HOURS")
            .unwrap_or_else(|_| "168".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("SESSION_DURATION_HOURS"))?;

        let debug_errors = std::env::var("DEBUG_ERRORS")
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .unwrap_or(false);

        let metrics_enabled = std::env::var("METRICS_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        Ok(Self {
            http_port,
            database_url,
            llm_api_key,
            llm_base_url,
            session_exchange_url,
            session_duration_hours,
            debug_errors,
            metrics_enabled,
        })
    }

    /// Build the LLM provider configuration
    pub fn openai_config(&self) -> OpenAiConfig {
        OpenAiConfig::new(self.llm_api_key.clone()).with_base_url(self.llm_base_url.clone())
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
