//! Subscription tier types and the plan catalog

use serde::{Deserialize, Serialize};

/// Subscription tier levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Entry tier - text analysis with the compact model
    Standard,
    /// Mid tier - adds screenshot analysis
    Premium,
    /// Top tier - priority model and the largest suggestion count
    Pro,
}

impl Tier {
    /// All tiers in ascending rank order
    pub const ALL: [Tier; 3] = [Tier::Standard, Tier::Premium, Tier::Pro];

    /// Numeric rank used for minimum-tier gate checks
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Standard => 1,
            Self::Premium => 2,
            Self::Pro => 3,
        }
    }

    /// Monthly price in cents
    pub const fn monthly_price_cents(&self) -> u32 {
        match self {
            Self::Standard => 999,
            Self::Premium => 1_999,
            Self::Pro => 3_999,
        }
    }

    /// Annual price in cents
    pub const fn annual_price_cents(&self) -> u32 {
        match self {
            Self::Standard => 7_999,
            Self::Premium => 15_999,
            Self::Pro => 31_999,
        }
    }

    /// AI model this tier is entitled to
    pub const fn model(&self) -> &'static str {
        match self {
            Self::Standard => "gpt-5-mini",
            Self::Premium => "gpt-5.2",
            Self::Pro => "gpt-5.2-pro",
        }
    }

    /// Number of reply suggestions this tier is entitled to per analysis
    pub const fn suggestion_count(&self) -> usize {
        match self {
            Self::Standard => 3,
            Self::Premium => 4,
            Self::Pro => 5,
        }
    }

    /// Features available for this tier
    pub const fn features(&self) -> &'static [&'static str] {
        match self {
            Self::Standard => &["text_analysis", "history"],
            Self::Premium => &["text_analysis", "history", "image_analysis"],
            Self::Pro => &[
                "text_analysis",
                "history",
                "image_analysis",
                "priority_models",
            ],
        }
    }

    /// Entitlement record for this tier (model plus suggestion count)
    pub const fn entitlements(&self) -> PlanEntitlements {
        PlanEntitlements {
            model: self.model(),
            suggestion_count: self.suggestion_count(),
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Premium => write!(f, "premium"),
            Self::Pro => write!(f, "pro"),
        }
    }
}

impl std::str::FromStr for Tier {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "premium" => Ok(Self::Premium),
            "pro" => Ok(Self::Pro),
            _ => Err(TierParseError(s.to_string())),
        }
    }
}

/// Error parsing a tier string
#[derive(Debug, Clone)]
pub struct TierParseError(pub String);

impl std::fmt::Display for TierParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid tier: {}", self.0)
    }
}

impl std::error::Error for TierParseError {}

/// What a tier entitles a request to: which model answers and how many
/// suggestions come back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanEntitlements {
    /// AI model name passed to the provider
    pub model: &'static str,
    /// Maximum suggestions returned per analysis
    pub suggestion_count: usize,
}

/// One row of the static plan catalog, as exposed on the public plans
/// endpoint
#[derive(Debug, Clone, Serialize)]
pub struct PlanSpec {
    pub tier: Tier,
    pub monthly_price_cents: u32,
    pub annual_price_cents: u32,
    pub model: &'static str,
    pub suggestion_count: usize,
    pub features: &'static [&'static str],
}

impl PlanSpec {
    /// Build the catalog entry for a tier
    pub const fn for_tier(tier: Tier) -> Self {
        Self {
            tier,
            monthly_price_cents: tier.monthly_price_cents(),
            annual_price_cents: tier.annual_price_cents(),
            model: tier.model(),
            suggestion_count: tier.suggestion_count(),
            features: tier.features(),
        }
    }
}

/// The full read-only catalog in ascending tier order
pub fn plan_catalog() -> [PlanSpec; 3] {
    [
        PlanSpec::for_tier(Tier::Standard),
        PlanSpec::for_tier(Tier::Premium),
        PlanSpec::for_tier(Tier::Pro),
    ]
}

/// Billing period for subscription activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    Monthly,
    Annual,
}

impl BillingPeriod {
    /// Subscription length in days
    pub const fn days(&self) -> i64 {
        match self {
            Self::Monthly => 30,
            Self::Annual => 365,
        }
    }
}

impl std::fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Annual => write!(f, "annual"),
        }
    }
}

impl std::str::FromStr for BillingPeriod {
    type Err = BillingPeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "annual" => Ok(Self::Annual),
            _ => Err(BillingPeriodParseError(s.to_string())),
        }
    }
}

/// Error parsing a billing period string
#[derive(Debug, Clone)]
pub struct BillingPeriodParseError(pub String);

impl std::fmt::Display for BillingPeriodParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid billing period: {}", self.0)
    }
}

impl std::error::Error for BillingPeriodParseError {}
