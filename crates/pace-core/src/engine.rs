//! Score Engine - classification and health assessment under one policy
//!
//! The engine is a thin owner of a [`ScoringPolicy`]. It holds no state
//! besides the policy, performs no I/O and reads no clock, so it can be
//! cloned freely and shared across threads.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pace_core::engine::ScoreEngine;
//!
//! let engine = ScoreEngine::new(ScoringPolicy::load(None)?);
//! let classification = engine.classify(3000.0, 1800.0, 90.0, 12);
//! let history = db.recent_checks(user_id, engine.policy().history_window)?;
//! let assessment = engine.assess(&history);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{classify_with, Classification};
use crate::health::{self, ScoreSummary};
use crate::models::{BudgetCheck, Breakdown, NewBudgetCheck, Risk};
use crate::narrative::{self, Driver};
use crate::policy::ScoringPolicy;
use crate::projection::{projection_over, Projection};
use crate::streaks::{streaks, Streaks};

/// Everything shown for a user's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthAssessment {
    pub score: u8,
    pub trend: i32,
    pub risk: Risk,
    pub label: String,
    pub breakdown: Breakdown,
    pub reason: String,
    /// Weakest areas, empty until the first check
    pub drivers: Vec<Driver>,
    pub next_steps: Vec<String>,
    pub streaks: Streaks,
    pub projection: Projection,
}

#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    policy: ScoringPolicy,
}

impl ScoreEngine {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Classify a day's spend
    pub fn classify(
        &self,
        net_income: f64,
        fixed_expenses: f64,
        today_expense: f64,
        days_left: i64,
    ) -> Classification {
        classify_with(
            self.policy.caution_multiplier,
            net_income,
            fixed_expenses,
            today_expense,
            days_left,
        )
    }

    /// Classify the inputs of a new check
    pub fn classify_check(&self, input: &NewBudgetCheck) -> Classification {
        self.classify(
            input.net_income,
            input.fixed_expenses,
            input.today_expense,
            input.days_left,
        )
    }

    /// Score, breakdown, risk and trend for a newest-first history
    pub fn score(&self, history: &[BudgetCheck]) -> ScoreSummary {
        health::score(history, &self.policy)
    }

    pub fn projection(&self, history: &[BudgetCheck]) -> Projection {
        projection_over(history, self.policy.projection_window)
    }

    /// Full assessment for a newest-first history
    pub fn assess(&self, history: &[BudgetCheck]) -> HealthAssessment {
        let window = &history[..history.len().min(self.policy.history_window)];
        let summary = self.score(window);

        let drivers = if window.is_empty() {
            Vec::new()
        } else {
            narrative::drivers(&summary.breakdown)
        };

        let assessment = HealthAssessment {
            score: summary.score,
            trend: summary.trend,
            risk: summary.risk,
            label: narrative::label(summary.score).to_string(),
            reason: narrative::reason(window, &summary.breakdown),
            drivers,
            next_steps: narrative::next_steps(&summary.breakdown),
            streaks: streaks(window),
            projection: self.projection(window),
            breakdown: summary.breakdown,
        };

        debug!(
            records = window.len(),
            score = assessment.score,
            risk = assessment.risk.as_str(),
            "Assessment complete"
        );

        assessment
    }
}
