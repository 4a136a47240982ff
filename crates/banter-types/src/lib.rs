//! Banter Types - Shared domain types
//!
//! This crate contains domain types used across banter crates:
//! - User, session, and analysis identifiers
//! - Subscription tiers and the plan catalog
//! - Billing periods

pub mod analysis;
pub mod session;
pub mod tier;
pub mod user;

pub use analysis::*;
pub use session::*;
pub use tier::*;
pub use user::*;
