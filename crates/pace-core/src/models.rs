//! Domain models for Pace

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::Classification;

/// Pacing status of a single budget check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Spend is within the daily budget
    Ok,
    /// Spend is over budget but within the caution multiplier
    Caution,
    /// Spend is well over budget, or there is no budget to spend
    Danger,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Caution => "caution",
            Self::Danger => "danger",
        }
    }

    /// Ok or caution: the user is still adjusting rather than overshooting
    pub fn is_on_track(&self) -> bool {
        matches!(self, Self::Ok | Self::Caution)
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ok" => Ok(Self::Ok),
            "caution" => Ok(Self::Caution),
            "danger" => Ok(Self::Danger),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse risk bucket derived from the health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    Low,
    Moderate,
    High,
}

impl Risk {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl std::str::FromStr for Risk {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "moderate" => Ok(Self::Moderate),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown risk: {}", s)),
        }
    }
}

impl std::fmt::Display for Risk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Voice the companion uses when replying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Calm,
    Direct,
    Playful,
    Coach,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Calm => "calm",
            Self::Direct => "direct",
            Self::Playful => "playful",
            Self::Coach => "coach",
        }
    }
}

impl std::str::FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calm" => Ok(Self::Calm),
            "direct" => Ok(Self::Direct),
            "playful" => Ok(Self::Playful),
            "coach" => Ok(Self::Coach),
            _ => Err(format!("Unknown tone: {}", s)),
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Subscription tier a user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    #[default]
    Free,
    Pro,
}

impl PlanTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
        }
    }
}

impl std::str::FromStr for PlanTier {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "pro" => Ok(Self::Pro),
            _ => Err(format!("Unknown plan: {}", s)),
        }
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user whose checks are tracked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub tone: Tone,
    pub plan: PlanTier,
    pub created_at: DateTime<Utc>,
}

/// Inputs for a budget check, before classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewBudgetCheck {
    pub net_income: f64,
    pub fixed_expenses: f64,
    pub today_expense: f64,
    pub days_left: i64,
}

impl NewBudgetCheck {
    pub fn new(net_income: f64, fixed_expenses: f64, today_expense: f64, days_left: i64) -> Self {
        Self {
            net_income,
            fixed_expenses,
            today_expense,
            days_left,
        }
    }
}

/// A classified budget check, one per submission
///
/// Records are append-only. Histories handed to the engine are ordered
/// newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCheck {
    pub id: i64,
    pub user_id: i64,
    pub net_income: f64,
    pub fixed_expenses: f64,
    pub today_expense: f64,
    pub days_left: i64,
    pub daily_budget: f64,
    pub status: Status,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl BudgetCheck {
    /// Build an unsaved record (id and user_id are 0) from a classified input
    pub fn from_classification(
        input: &NewBudgetCheck,
        classification: Classification,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            user_id: 0,
            net_income: input.net_income,
            fixed_expenses: input.fixed_expenses,
            today_expense: input.today_expense,
            days_left: input.days_left,
            daily_budget: classification.daily_budget,
            status: classification.status,
            message: classification.message,
            created_at,
        }
    }

    /// Income left after fixed costs
    pub fn disposable_income(&self) -> f64 {
        self.net_income - self.fixed_expenses
    }
}

/// Named sub-metrics of the health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Stability,
    Acceleration,
    Cushion,
    Buffer,
    Affordability,
    Runway,
    GoalAlignment,
    Consistency,
    Shock,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stability => "stability",
            Self::Acceleration => "acceleration",
            Self::Cushion => "cushion",
            Self::Buffer => "buffer",
            Self::Affordability => "affordability",
            Self::Runway => "runway",
            Self::GoalAlignment => "goal_alignment",
            Self::Consistency => "consistency",
            Self::Shock => "shock",
        }
    }

    pub fn all() -> &'static [Metric] {
        &[
            Self::Stability,
            Self::Acceleration,
            Self::Cushion,
            Self::Buffer,
            Self::Affordability,
            Self::Runway,
            Self::GoalAlignment,
            Self::Consistency,
            Self::Shock,
        ]
    }
}

impl std::str::FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Metric::all()
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("Unknown metric: {}", s))
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sub-metric percentages (0-100) behind a health score
///
/// Empty when the history was empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breakdown(BTreeMap<Metric, u8>);

impl Breakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a metric, clamping to 100
    pub fn set(&mut self, metric: Metric, percent: u8) {
        self.0.insert(metric, percent.min(100));
    }

    pub fn get(&self, metric: Metric) -> Option<u8> {
        self.0.get(&metric).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, u8)> + '_ {
        self.0.iter().map(|(m, v)| (*m, *v))
    }
}

/// A persisted health assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentSnapshot {
    pub id: i64,
    pub user_id: i64,
    pub score: u8,
    pub trend: i32,
    pub risk: Risk,
    pub breakdown: Breakdown,
    pub created_at: DateTime<Utc>,
}
