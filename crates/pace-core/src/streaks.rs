//! Behavioral streaks counted from the newest check backwards

use serde::{Deserialize, Serialize};

use crate::models::{BudgetCheck, Status};

/// A streak at or above this length is worth celebrating
pub const STREAK_HIGHLIGHT_MIN: u32 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    /// Consecutive ok checks
    pub stable: u32,
    /// Consecutive ok or caution checks
    pub adjust: u32,
    /// Consecutive ok checks (currently counted like `stable`)
    pub goal: u32,
}

/// True if a single run is long enough to highlight
pub fn is_highlight(days: u32) -> bool {
    days >= STREAK_HIGHLIGHT_MIN
}

impl Streaks {
    /// True if any streak reached the highlight length
    pub fn highlighted(&self) -> bool {
        [self.stable, self.adjust, self.goal].into_iter().any(is_highlight)
    }
}

fn run_length(history: &[BudgetCheck], keep: impl Fn(Status) -> bool) -> u32 {
    history.iter().take_while(|r| keep(r.status)).count() as u32
}

/// Count streaks over a newest-first history
pub fn streaks(history: &[BudgetCheck]) -> Streaks {
    Streaks {
        stable: run_length(history, |s| s == Status::Ok),
        adjust: run_length(history, |s| s.is_on_track()),
        goal: run_length(history, |s| s == Status::Ok),
    }
}
