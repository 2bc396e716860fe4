//! Pace Core Library
//!
//! Shared functionality for the Pace budgeting companion:
//! - Daily spend classification against a monthly budget
//! - Health score aggregation over recent checks
//! - Narrative labels, reasons, drivers and next steps
//! - Behavioral streaks and short-term projections
//! - Rule-based companion replies
//! - Plan catalog and feature gate
//! - Database access and migrations
//! - CSV/JSON export of check history

pub mod classify;
pub mod companion;
pub mod db;
pub mod engine;
pub mod error;
pub mod export;
pub mod health;
pub mod models;
pub mod narrative;
pub mod plans;
pub mod policy;
pub mod projection;
pub mod streaks;

/// Record builders for unit tests
#[cfg(test)]
pub mod test_utils;

pub use classify::{classify, Classification};
pub use companion::CompanionContext;
pub use db::Database;
pub use engine::{HealthAssessment, ScoreEngine};
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use health::ScoreSummary;
pub use narrative::Driver;
pub use plans::{Feature, Plan};
pub use policy::ScoringPolicy;
pub use projection::{BufferState, Projection};
pub use streaks::Streaks;
