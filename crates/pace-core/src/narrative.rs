//! Narrative and advisory text derived from a health breakdown
//!
//! All generators are deterministic and threshold driven. Rules are checked
//! in a fixed order so the same breakdown always yields the same text.

use serde::{Deserialize, Serialize};

use crate::models::{BudgetCheck, Breakdown, Metric};

pub const LABEL_STEADY_MIN: u8 = 75;
pub const LABEL_BUILDING_MIN: u8 = 55;

pub const MAX_REASON_CLAUSES: usize = 2;
pub const MAX_DRIVERS: usize = 3;
pub const MAX_NEXT_STEPS: usize = 3;

/// (metric, fires below, clause)
const REASON_RULES: &[(Metric, u8, &str)] = &[
    (Metric::Cushion, 40, "Little is left after fixed costs"),
    (Metric::Affordability, 45, "Fixed costs take a large share of income"),
    (Metric::Runway, 45, "Your daily budget will not stretch to the end of the period"),
    (Metric::Acceleration, 45, "Daily spend keeps drifting above budget"),
    (Metric::Consistency, 50, "Your daily budget swings a lot between checks"),
];

pub const REASON_DEFAULT: &str = "Spending is pacing well against your budget";
pub const REASON_NO_HISTORY: &str = "No checks yet; run a check to start your score";

const NEXT_STEP_RULES: &[(Metric, u8, &str)] = &[
    (Metric::Cushion, 45, "Move a small amount into a buffer this week"),
    (Metric::Acceleration, 50, "Cap flexible spend at today's daily budget"),
    (Metric::Consistency, 55, "Check in at the same time each day to steady your pace"),
    (Metric::Affordability, 45, "Review one fixed cost you could cut or renegotiate"),
];

pub const NEXT_STEP_DEFAULT: &str = "Keep your current pace and check in again tomorrow";

/// One of the weakest areas behind a score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub name: String,
    /// Display value, e.g. "60%"
    pub value: String,
    /// Strength used for ranking (higher is healthier)
    pub strength: u8,
}

/// Short headline for a score
pub fn label(score: u8) -> &'static str {
    if score >= LABEL_STEADY_MIN {
        "Steady"
    } else if score >= LABEL_BUILDING_MIN {
        "Building"
    } else {
        "Alert"
    }
}

fn fires(breakdown: &Breakdown, metric: Metric, threshold: u8) -> bool {
    breakdown.get(metric).is_some_and(|v| v < threshold)
}

/// One-line explanation of what is holding the score back
pub fn reason(history: &[BudgetCheck], breakdown: &Breakdown) -> String {
    if history.is_empty() {
        return REASON_NO_HISTORY.to_string();
    }

    let clauses: Vec<&str> = REASON_RULES
        .iter()
        .filter(|(metric, threshold, _)| fires(breakdown, *metric, *threshold))
        .map(|(_, _, clause)| *clause)
        .take(MAX_REASON_CLAUSES)
        .collect();

    if clauses.is_empty() {
        REASON_DEFAULT.to_string()
    } else {
        clauses.join("; ")
    }
}

/// The three weakest metrics, weakest first
///
/// Fixed ratio is ranked by affordability but displayed as the share of
/// income taken by fixed costs. Ties keep the listed order.
pub fn drivers(breakdown: &Breakdown) -> Vec<Driver> {
    let candidates = [
        ("Stability", Metric::Stability),
        ("Spend drift", Metric::Acceleration),
        ("Cushion", Metric::Cushion),
        ("Fixed ratio", Metric::Affordability),
        ("Runway", Metric::Runway),
        ("Consistency", Metric::Consistency),
        ("Goal alignment", Metric::GoalAlignment),
    ];

    let mut ranked: Vec<Driver> = candidates
        .iter()
        .map(|(name, metric)| {
            let strength = breakdown.get(*metric).unwrap_or(0);
            let shown = if *metric == Metric::Affordability {
                100 - strength
            } else {
                strength
            };
            Driver {
                name: name.to_string(),
                value: format!("{}%", shown),
                strength,
            }
        })
        .collect();

    // Stable sort keeps the listed order for ties
    ranked.sort_by_key(|d| d.strength);
    ranked.truncate(MAX_DRIVERS);
    ranked
}

/// Up to three concrete suggestions, or a default when nothing is weak
pub fn next_steps(breakdown: &Breakdown) -> Vec<String> {
    let steps: Vec<String> = NEXT_STEP_RULES
        .iter()
        .filter(|(metric, threshold, _)| fires(breakdown, *metric, *threshold))
        .map(|(_, _, step)| step.to_string())
        .take(MAX_NEXT_STEPS)
        .collect();

    if steps.is_empty() {
        vec![NEXT_STEP_DEFAULT.to_string()]
    } else {
        steps
    }
}
