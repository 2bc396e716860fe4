//! Scoring policy: thresholds, window sizes and metric weights
//!
//! Every knob the classifier and health aggregator use lives here as a named
//! constant, and the tunable ones can be overridden from a TOML file.
//!
//! ## Configuration Resolution
//!
//! Policy is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/pace/config/policy.toml)
//!    or an explicit path
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default policy (compiled into binary)
const DEFAULT_POLICY: &str = include_str!("../../../config/policy.toml");

/// Spend above `daily_budget * CAUTION_MULTIPLIER` is danger
pub const CAUTION_MULTIPLIER: f64 = 1.3;

/// Most recent checks folded into a health score
pub const HISTORY_WINDOW: usize = 20;

/// Records per slice when comparing recent vs previous for the trend
pub const TREND_SLICE: usize = 5;

/// Most recent checks used for the projection curve
pub const PROJECTION_WINDOW: usize = 10;

/// Score reported for an empty history
pub const NEUTRAL_SCORE: u8 = 62;

pub const LOW_RISK_MIN_SCORE: u8 = 75;
pub const MODERATE_RISK_MIN_SCORE: u8 = 55;

/// Minimum number of daily budgets before consistency uses their spread
pub const CONSISTENCY_MIN_SAMPLES: usize = 3;

/// Weight given to caution checks in goal alignment (ok counts as 1)
pub const CAUTION_GOAL_CREDIT: f64 = 0.5;

/// Allowed drift of the weight sum from 1.0
const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

/// Weights of the sub-metrics in the composite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub stability: f64,
    pub acceleration: f64,
    pub buffer: f64,
    pub affordability: f64,
    pub goal_alignment: f64,
    pub consistency: f64,
    pub shock: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.stability
            + self.acceleration
            + self.buffer
            + self.affordability
            + self.goal_alignment
            + self.consistency
            + self.shock
    }

    fn values(&self) -> [f64; 7] {
        [
            self.stability,
            self.acceleration,
            self.buffer,
            self.affordability,
            self.goal_alignment,
            self.consistency,
            self.shock,
        ]
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            stability: 0.20,
            acceleration: 0.18,
            buffer: 0.18,
            affordability: 0.14,
            goal_alignment: 0.12,
            consistency: 0.10,
            shock: 0.08,
        }
    }
}

/// Full scoring policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub caution_multiplier: f64,
    pub history_window: usize,
    pub trend_slice: usize,
    pub projection_window: usize,
    pub neutral_score: u8,
    pub low_risk_min: u8,
    pub moderate_risk_min: u8,
    pub weights: Weights,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            caution_multiplier: CAUTION_MULTIPLIER,
            history_window: HISTORY_WINDOW,
            trend_slice: TREND_SLICE,
            projection_window: PROJECTION_WINDOW,
            neutral_score: NEUTRAL_SCORE,
            low_risk_min: LOW_RISK_MIN_SCORE,
            moderate_risk_min: MODERATE_RISK_MIN_SCORE,
            weights: Weights::default(),
        }
    }
}

impl ScoringPolicy {
    /// Load the policy (override first, then embedded default)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let content = match override_path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::NotFound(format!(
                        "Policy file {}",
                        path.display()
                    )));
                }
                read_policy(path)?
            }
            None => match default_policy_path() {
                Some(path) if path.exists() => read_policy(&path)?,
                _ => DEFAULT_POLICY.to_string(),
            },
        };

        parse_policy(&content)
    }

    /// Check that the policy describes a usable scoring scheme
    pub fn validate(&self) -> Result<()> {
        if !(self.caution_multiplier.is_finite() && self.caution_multiplier >= 1.0) {
            return Err(Error::InvalidData(format!(
                "caution_multiplier must be >= 1.0, got {}",
                self.caution_multiplier
            )));
        }
        if self.history_window == 0 || self.trend_slice == 0 || self.projection_window == 0 {
            return Err(Error::InvalidData(
                "window sizes must be greater than zero".to_string(),
            ));
        }
        if self.neutral_score > 100 || self.low_risk_min > 100 {
            return Err(Error::InvalidData(
                "scores must be within 0-100".to_string(),
            ));
        }
        if self.moderate_risk_min > self.low_risk_min {
            return Err(Error::InvalidData(format!(
                "moderate_risk_min ({}) must not exceed low_risk_min ({})",
                self.moderate_risk_min, self.low_risk_min
            )));
        }
        if self.weights.values().iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(Error::InvalidData(
                "weights must be non-negative numbers".to_string(),
            ));
        }
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(Error::InvalidData(format!(
                "weights must sum to 1.0, got {:.3}",
                sum
            )));
        }
        Ok(())
    }
}

/// Default policy override path
pub fn default_policy_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("pace").join("config").join("policy.toml"))
}

fn read_policy(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::InvalidData(format!("Failed to read policy: {}", e)))
}

/// Raw policy structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawPolicy {
    classifier: Option<RawClassifier>,
    window: Option<RawWindow>,
    score: Option<RawScore>,
    weights: Option<RawWeights>,
}

#[derive(Debug, Deserialize)]
struct RawClassifier {
    caution_multiplier: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawWindow {
    history: Option<usize>,
    trend_slice: Option<usize>,
    projection: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawScore {
    neutral: Option<u8>,
    low_risk_min: Option<u8>,
    moderate_risk_min: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct RawWeights {
    stability: Option<f64>,
    acceleration: Option<f64>,
    buffer: Option<f64>,
    affordability: Option<f64>,
    goal_alignment: Option<f64>,
    consistency: Option<f64>,
    shock: Option<f64>,
}

/// Parse a policy from TOML content
pub fn parse_policy(content: &str) -> Result<ScoringPolicy> {
    let raw: RawPolicy = toml::from_str(content)
        .map_err(|e| Error::InvalidData(format!("Invalid policy TOML: {}", e)))?;

    let mut policy = ScoringPolicy::default();

    if let Some(classifier) = raw.classifier {
        if let Some(multiplier) = classifier.caution_multiplier {
            policy.caution_multiplier = multiplier;
        }
    }

    if let Some(window) = raw.window {
        if let Some(history) = window.history {
            policy.history_window = history;
        }
        if let Some(slice) = window.trend_slice {
            policy.trend_slice = slice;
        }
        if let Some(projection) = window.projection {
            policy.projection_window = projection;
        }
    }

    if let Some(score) = raw.score {
        if let Some(neutral) = score.neutral {
            policy.neutral_score = neutral;
        }
        if let Some(low) = score.low_risk_min {
            policy.low_risk_min = low;
        }
        if let Some(moderate) = score.moderate_risk_min {
            policy.moderate_risk_min = moderate;
        }
    }

    if let Some(weights) = raw.weights {
        let w = &mut policy.weights;
        w.stability = weights.stability.unwrap_or(w.stability);
        w.acceleration = weights.acceleration.unwrap_or(w.acceleration);
        w.buffer = weights.buffer.unwrap_or(w.buffer);
        w.affordability = weights.affordability.unwrap_or(w.affordability);
        w.goal_alignment = weights.goal_alignment.unwrap_or(w.goal_alignment);
        w.consistency = weights.consistency.unwrap_or(w.consistency);
        w.shock = weights.shock.unwrap_or(w.shock);
    }

    policy.validate()?;
    Ok(policy)
}
