//! Banter Auth Core - authentication and plan gating
//!
//! Provides the building blocks the API service composes per request:
//! - [`AuthService`]: session exchange against the external identity
//!   provider, bearer-token authentication, logout
//! - [`SessionManager`]: opaque token minting and live-expiry validation
//! - [`PlanGate`]: subscription tier entitlement checks

pub mod error;
pub mod identity;
pub mod plan;
pub mod service;
pub mod session;
pub mod token;

pub use error::{AuthError, PlanError};
pub use identity::{HttpIdentityProvider, IdentityProvider, SessionData};
pub use plan::{ActivePlan, PlanGate};
pub use service::{AuthService, AuthenticatedUser, EstablishedSession};
pub use session::SessionManager;
pub use token::{hash_token, mint_token};
