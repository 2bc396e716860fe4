//! Plan catalog and feature gate
//!
//! Pace has two tiers. Free covers the quick check and the basic score; Pro
//! unlocks streaks, projections, scenarios and the companion. Billing itself
//! happens elsewhere; this module only answers "is this feature included".

use serde::Serialize;

use crate::models::PlanTier;

/// Gated capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    QuickCheck,
    HealthScore,
    Streaks,
    Projection,
    Scenario,
    Companion,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuickCheck => "quick_check",
            Self::HealthScore => "health_score",
            Self::Streaks => "streaks",
            Self::Projection => "projection",
            Self::Scenario => "scenario",
            Self::Companion => "companion",
        }
    }

    /// Lowest tier that includes this feature
    pub fn min_tier(&self) -> PlanTier {
        match self {
            Self::QuickCheck | Self::HealthScore => PlanTier::Free,
            Self::Streaks | Self::Projection | Self::Scenario | Self::Companion => PlanTier::Pro,
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A plan as shown on the pricing page
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub tier: PlanTier,
    pub name: &'static str,
    pub price_monthly: u32,
    pub price_yearly: u32,
    pub features: &'static [&'static str],
}

const PLANS: &[Plan] = &[
    Plan {
        tier: PlanTier::Free,
        name: "Free",
        price_monthly: 0,
        price_yearly: 0,
        features: &[
            "Quick check",
            "Basic Health Score",
            "Simple momentum indicator",
        ],
    },
    Plan {
        tier: PlanTier::Pro,
        name: "Pro",
        price_monthly: 5,
        price_yearly: 48,
        features: &[
            "Full Momentum analytics",
            "Behavioral streaks + projections",
            "AI Companion guidance",
            "Scenario comparison",
        ],
    },
];

/// All plans, cheapest first
pub fn catalog() -> &'static [Plan] {
    PLANS
}

pub fn plan(tier: PlanTier) -> &'static Plan {
    match tier {
        PlanTier::Free => &PLANS[0],
        PlanTier::Pro => &PLANS[1],
    }
}

/// Whether a tier includes a feature
pub fn allows(tier: PlanTier, feature: Feature) -> bool {
    match feature.min_tier() {
        PlanTier::Free => true,
        PlanTier::Pro => tier == PlanTier::Pro,
    }
}
