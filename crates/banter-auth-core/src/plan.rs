//! Plan gate - subscription tier entitlement checks
//!
//! The gate works on an already-loaded user row; expiry is compared against
//! the current time on every check rather than trusting any stored flag.

use banter_db::UserRow;
use banter_types::{PlanEntitlements, Tier};
use chrono::Utc;

use crate::PlanError;

/// A passed gate check: the caller's tier and what it entitles them to
#[derive(Debug, Clone, Copy)]
pub struct ActivePlan {
    pub tier: Tier,
    pub entitlements: PlanEntitlements,
}

/// Plan gate service
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanGate;

impl PlanGate {
    /// Create a new plan gate
    pub fn new() -> Self {
        Self
    }

    /// Check that a user holds an active subscription, optionally at or
    /// above a minimum tier.
    ///
    /// A missing tier, an unparseable stored tier, and a passed expiry all
    /// fail as payment-required; only an active-but-too-low tier is a
    /// forbidden.
    pub fn check(&self, user: &UserRow, min_tier: Option<Tier>) -> Result<ActivePlan, PlanError> {
        let tier: Tier = user
            .tier
            .as_deref()
            .ok_or(PlanError::NoActivePlan)?
            .parse()
            .map_err(|_| PlanError::NoActivePlan)?;

        match user.subscription_expires_at {
            Some(expires_at) if expires_at > Utc::now() => {}
            _ => return Err(PlanError::PlanExpired),
        }

        if let Some(required) = min_tier {
            if tier.rank() < required.rank() {
                return Err(PlanError::TierTooLow { required });
            }
        }

        Ok(ActivePlan {
            tier,
            entitlements: tier.entitlements(),
        })
    }
}
