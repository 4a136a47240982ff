//! AI orchestration errors

use thiserror::Error;

/// Errors from the chat provider boundary.
///
/// All variants surface to clients as an upstream failure; nothing here is
/// retried.
#[derive(Error, Debug)]
pub enum AiError {
    /// The request never completed (network, TLS, timeout)
    #[error("provider request failed: {0}")]
    Request(String),

    /// The provider answered with a non-success status
    #[error("provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// The provider answered 2xx but the body was not usable
    #[error("malformed provider reply: {0}")]
    MalformedReply(String),
}
