//! Auth and plan gate errors

use banter_types::Tier;
use thiserror::Error;

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// No session matches the presented token
    #[error("session not found")]
    SessionNotFound,

    /// The session's stored expiry is at or before the current time
    #[error("session expired")]
    SessionExpired,

    /// The session references a user record that no longer exists
    #[error("user record missing for session")]
    UserMissing,

    /// The external session-exchange endpoint failed
    #[error("identity provider error: {0}")]
    IdentityProvider(String),

    /// Database error
    #[error("database error")]
    Database(#[from] banter_db::DbError),
}

/// Plan gate errors
///
/// Both payment variants map to the same HTTP status; they are kept separate
/// so the distinct gate branches stay testable.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlanError {
    /// The user has never activated a subscription
    #[error("no active subscription")]
    NoActivePlan,

    /// The subscription's expiry has passed
    #[error("subscription expired")]
    PlanExpired,

    /// The user's tier ranks below the endpoint's minimum
    #[error("requires {required} tier or higher")]
    TierTooLow { required: Tier },
}
