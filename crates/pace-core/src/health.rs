//! Health score aggregation
//!
//! Folds a window of past budget checks (newest first) into a 0-100 score.
//! Seven normalized sub-metrics are computed from the window, weighted by the
//! policy and exposed as integer percentages in a [`Breakdown`]:
//!
//! - **stability** - share of checks that were ok
//! - **shock** - share of checks that were ok or caution
//! - **acceleration** - 1 minus the mean relative overspend (drift), capped at 1
//! - **cushion** - share of income left after fixed costs
//! - **affordability** - 1 minus the share of income taken by fixed costs
//! - **runway** - how much of the disposable income the daily budget covers
//! - **buffer** - mean of cushion and runway
//! - **consistency** - 1 minus the coefficient of variation of daily budgets
//! - **goal_alignment** - ok checks plus half credit for caution checks
//!
//! The trend compares the recent slice against the one before it. Each slice
//! is scored on its own, so trends never chain.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{BudgetCheck, Breakdown, Metric, Risk, Status};
use crate::policy::{ScoringPolicy, Weights, CAUTION_GOAL_CREDIT, CONSISTENCY_MIN_SAMPLES};

/// Score, breakdown, risk tier and trend for a history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub score: u8,
    pub breakdown: Breakdown,
    pub risk: Risk,
    pub trend: i32,
}

/// Normalized sub-metrics, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub stability: f64,
    pub shock: f64,
    pub acceleration: f64,
    pub cushion: f64,
    pub affordability: f64,
    pub runway: f64,
    pub buffer: f64,
    pub consistency: f64,
    pub goal_alignment: f64,
}

impl Metrics {
    /// Compute the sub-metrics; `None` for an empty window
    pub fn from_history(records: &[BudgetCheck]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let total = records.len() as f64;
        let ok = records.iter().filter(|r| r.status == Status::Ok).count() as f64;
        let caution = records
            .iter()
            .filter(|r| r.status == Status::Caution)
            .count() as f64;

        let stability = ok / total;
        let shock = (ok + caution) / total;
        let goal_alignment = (ok + CAUTION_GOAL_CREDIT * caution) / total;

        let drifts: Vec<f64> = records
            .iter()
            .filter(|r| r.daily_budget > 0.0)
            .map(|r| ((r.today_expense - r.daily_budget) / r.daily_budget).abs())
            .collect();
        let acceleration = 1.0 - mean(&drifts).unwrap_or(0.0).min(1.0);

        let with_income: Vec<&BudgetCheck> =
            records.iter().filter(|r| r.net_income > 0.0).collect();
        let cushions: Vec<f64> = with_income
            .iter()
            .map(|r| clamp01(r.disposable_income() / r.net_income))
            .collect();
        let fixed_ratios: Vec<f64> = with_income
            .iter()
            .map(|r| clamp01(r.fixed_expenses / r.net_income))
            .collect();
        let cushion = mean(&cushions).unwrap_or(0.0);
        let affordability = 1.0 - mean(&fixed_ratios).unwrap_or(0.0);

        let runways: Vec<f64> = records
            .iter()
            .filter(|r| r.disposable_income() > 0.0 && r.days_left > 0)
            .map(|r| clamp01(r.daily_budget * r.days_left as f64 / r.disposable_income()))
            .collect();
        let runway = mean(&runways).unwrap_or(cushion);
        let buffer = (cushion + runway) / 2.0;

        let budgets: Vec<f64> = records.iter().map(|r| r.daily_budget).collect();
        let consistency = match coefficient_of_variation(&budgets) {
            Some(cv) if budgets.len() >= CONSISTENCY_MIN_SAMPLES => 1.0 - clamp01(cv),
            _ => stability,
        };

        Some(Self {
            stability,
            shock,
            acceleration: clamp01(acceleration),
            cushion,
            affordability: clamp01(affordability),
            runway,
            buffer,
            consistency,
            goal_alignment,
        })
    }

    /// Weighted sum in [0, 1]
    pub fn composite(&self, weights: &Weights) -> f64 {
        weights.stability * self.stability
            + weights.acceleration * self.acceleration
            + weights.buffer * self.buffer
            + weights.affordability * self.affordability
            + weights.goal_alignment * self.goal_alignment
            + weights.consistency * self.consistency
            + weights.shock * self.shock
    }

    pub fn breakdown(&self) -> Breakdown {
        let mut breakdown = Breakdown::new();
        breakdown.set(Metric::Stability, percent(self.stability));
        breakdown.set(Metric::Acceleration, percent(self.acceleration));
        breakdown.set(Metric::Cushion, percent(self.cushion));
        breakdown.set(Metric::Buffer, percent(self.buffer));
        breakdown.set(Metric::Affordability, percent(self.affordability));
        breakdown.set(Metric::Runway, percent(self.runway));
        breakdown.set(Metric::GoalAlignment, percent(self.goal_alignment));
        breakdown.set(Metric::Consistency, percent(self.consistency));
        breakdown.set(Metric::Shock, percent(self.shock));
        breakdown
    }
}

/// Risk tier for a score
pub fn risk_for(score: u8, policy: &ScoringPolicy) -> Risk {
    if score >= policy.low_risk_min {
        Risk::Low
    } else if score >= policy.moderate_risk_min {
        Risk::Moderate
    } else {
        Risk::High
    }
}

/// Score a slice as-is, without looking at any older records
///
/// Returns the neutral score and an empty breakdown for an empty slice.
pub fn score_window(records: &[BudgetCheck], policy: &ScoringPolicy) -> (u8, Breakdown) {
    match Metrics::from_history(records) {
        Some(metrics) => (
            percent(metrics.composite(&policy.weights)),
            metrics.breakdown(),
        ),
        None => (policy.neutral_score, Breakdown::new()),
    }
}

/// Score a history (newest first), including the one-step trend
pub fn score(history: &[BudgetCheck], policy: &ScoringPolicy) -> ScoreSummary {
    let window = &history[..history.len().min(policy.history_window)];
    let (score, breakdown) = score_window(window, policy);
    let trend = trend(window, policy);

    debug!(
        records = window.len(),
        score,
        trend,
        "Scored history window"
    );

    ScoreSummary {
        score,
        breakdown,
        risk: risk_for(score, policy),
        trend,
    }
}

/// Recent slice score minus previous slice score; 0 without a previous slice
pub fn trend(window: &[BudgetCheck], policy: &ScoringPolicy) -> i32 {
    let slice = policy.trend_slice;
    if window.len() <= slice {
        return 0;
    }

    let recent = &window[..slice];
    let previous = &window[slice..window.len().min(slice * 2)];

    let (recent_score, _) = score_window(recent, policy);
    let (previous_score, _) = score_window(previous, policy);
    recent_score as i32 - previous_score as i32
}

/// Fraction in [0, 1] to a rounded percentage in [0, 100]
pub(crate) fn percent(fraction: f64) -> u8 {
    if fraction.is_nan() {
        return 0;
    }
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}

pub(crate) fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Population standard deviation over mean; `None` unless the mean is positive
fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    if avg <= 0.0 {
        return None;
    }
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt() / avg)
}
