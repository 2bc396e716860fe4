//! Short-term projection curve
//!
//! Turns the average drift of recent checks into a six-point curve. The
//! curve shape is fixed; drift only moves its base.

use serde::{Deserialize, Serialize};

use crate::health::mean;
use crate::models::BudgetCheck;
use crate::policy::PROJECTION_WINDOW;

pub const PROJECTION_BASE: f64 = 70.0;
/// Points lost per unit of drift
pub const PROJECTION_DRIFT_SLOPE: f64 = 30.0;
pub const BASE_MIN: f64 = 35.0;
pub const BASE_MAX: f64 = 90.0;
pub const POINT_MIN: i32 = 30;
pub const POINT_MAX: i32 = 95;
pub const CURVE_OFFSETS: [i32; 6] = [0, -4, -7, -3, 2, -1];
pub const DEFAULT_POINTS: [i32; 6] = [62, 60, 58, 57, 59, 61];
/// Drift above this marks the buffer as tight
pub const TIGHT_DRIFT: f64 = 0.05;
/// Largest shift a what-if scenario can apply
pub const SCENARIO_SHIFT_MAX: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BufferState {
    Stable,
    Tight,
}

impl BufferState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Tight => "tight",
        }
    }
}

impl std::fmt::Display for BufferState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub points: Vec<i32>,
    pub buffer: BufferState,
    /// Relative overspend the curve was built from
    pub drift: f64,
}

impl Projection {
    /// Shift the curve for a what-if: income and expense changes in percent
    pub fn with_scenario(&self, income_pct: i32, expense_pct: i32) -> Projection {
        let shift = (income_pct.saturating_sub(expense_pct))
            .clamp(-SCENARIO_SHIFT_MAX, SCENARIO_SHIFT_MAX);
        Projection {
            points: self
                .points
                .iter()
                .map(|p| (p + shift).clamp(POINT_MIN, POINT_MAX))
                .collect(),
            buffer: self.buffer,
            drift: self.drift,
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            points: DEFAULT_POINTS.to_vec(),
            buffer: BufferState::Stable,
            drift: 0.0,
        }
    }
}

/// Project over the default window of recent checks
pub fn projection(history: &[BudgetCheck]) -> Projection {
    projection_over(history, PROJECTION_WINDOW)
}

/// Project from the `window` newest checks
pub fn projection_over(history: &[BudgetCheck], window: usize) -> Projection {
    let recent = &history[..history.len().min(window)];
    if recent.is_empty() {
        return Projection::default();
    }

    let budgets: Vec<f64> = recent.iter().map(|r| r.daily_budget).collect();
    let spends: Vec<f64> = recent.iter().map(|r| r.today_expense).collect();
    let avg_budget = mean(&budgets).unwrap_or(0.0);
    let avg_spend = mean(&spends).unwrap_or(0.0);

    let drift = if avg_budget > 0.0 {
        (avg_spend - avg_budget) / avg_budget
    } else {
        0.0
    };

    let base = (PROJECTION_BASE - drift * PROJECTION_DRIFT_SLOPE).clamp(BASE_MIN, BASE_MAX);
    let points = CURVE_OFFSETS
        .iter()
        .map(|offset| ((base + *offset as f64).round() as i32).clamp(POINT_MIN, POINT_MAX))
        .collect();

    Projection {
        points,
        buffer: if drift <= TIGHT_DRIFT {
            BufferState::Stable
        } else {
            BufferState::Tight
        },
        drift,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;
    use crate::test_utils::{check, history};

    #[test]
    fn test_empty_history_default_curve() {
        let p = projection(&[]);
        assert_eq!(p.points, vec![62, 60, 58, 57, 59, 61]);
        assert_eq!(p.buffer, BufferState::Stable);
    }

    #[test]
    fn test_underspend_lifts_curve() {
        // 90 spent on a 100 budget: drift -0.1, base 73
        let p = projection(&history(&[Status::Ok; 3]));
        assert_eq!(p.points, vec![73, 69, 66, 70, 75, 72]);
        assert_eq!(p.buffer, BufferState::Stable);
    }

    #[test]
    fn test_overspend_tightens_buffer() {
        // 180 spent on a 100 budget: drift 0.8, base 46
        let p = projection(&history(&[Status::Danger; 2]));
        assert_eq!(p.points, vec![46, 42, 39, 43, 48, 45]);
        assert_eq!(p.buffer, BufferState::Tight);
    }

    #[test]
    fn test_base_and_points_are_clamped() {
        let p = projection(&[check(3000.0, 1800.0, 10_000.0, 12)]);
        assert_eq!(p.points, vec![35, 31, 30, 32, 37, 34]);

        let generous = projection(&[check(3000.0, 1800.0, 0.0, 12)]);
        assert!(generous.points.iter().all(|p| *p <= POINT_MAX));
        assert_eq!(generous.points[0], 90);
    }

    #[test]
    fn test_non_positive_budget_means_no_drift() {
        let p = projection(&[check(1000.0, 1500.0, 50.0, 10)]);
        assert_eq!(p.drift, 0.0);
        assert_eq!(p.points[0], 70);
    }

    #[test]
    fn test_only_recent_window_counts() {
        let mut statuses = vec![Status::Ok; 10];
        statuses.extend([Status::Danger; 10]);
        let p = projection(&history(&statuses));
        assert_eq!(p.buffer, BufferState::Stable);
    }

    #[test]
    fn test_scenario_shift_is_capped() {
        let base = Projection::default();
        assert_eq!(
            base.with_scenario(5, 0).points,
            vec![67, 65, 63, 62, 64, 66]
        );
        assert_eq!(
            base.with_scenario(100, 0).points,
            vec![82, 80, 78, 77, 79, 81]
        );
        assert_eq!(
            base.with_scenario(0, 40).points,
            vec![42, 40, 38, 37, 39, 41]
        );
    }
}
