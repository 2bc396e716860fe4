//! Record builders shared by unit tests

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::classify::classify;
use crate::models::{BudgetCheck, NewBudgetCheck, Status};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

/// Classify the inputs and build an unsaved record
pub fn check(income: f64, fixed: f64, spend: f64, days_left: i64) -> BudgetCheck {
    let input = NewBudgetCheck::new(income, fixed, spend, days_left);
    BudgetCheck::from_classification(
        &input,
        classify(income, fixed, spend, days_left),
        base_time(),
    )
}

/// A record with a 100/day budget whose spend produces the given status
pub fn check_with_status(status: Status) -> BudgetCheck {
    let spend = match status {
        Status::Ok => 90.0,
        Status::Caution => 120.0,
        Status::Danger => 180.0,
    };
    check(3000.0, 1800.0, spend, 12)
}

/// Records for the given statuses, newest first, one day apart
pub fn history(statuses: &[Status]) -> Vec<BudgetCheck> {
    statuses
        .iter()
        .enumerate()
        .map(|(i, status)| {
            let mut record = check_with_status(*status);
            record.created_at = base_time() - Duration::days(i as i64);
            record
        })
        .collect()
}
