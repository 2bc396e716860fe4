//! Single-check pacing decision
//!
//! Splits what is left after fixed costs evenly over the remaining days and
//! compares today's spend against that allowance.

use serde::{Deserialize, Serialize};

use crate::models::Status;
use crate::policy::CAUTION_MULTIPLIER;

pub const MESSAGE_NO_BUDGET: &str =
    "Available budget is too low or the days left are invalid.";
pub const MESSAGE_OK: &str = "This spend is within your usual pace.";
pub const MESSAGE_CAUTION: &str = "This spend trims your end-of-period comfort.";
pub const MESSAGE_DANGER: &str = "At this pace your monthly balance is at risk.";

/// Outcome of classifying one day's spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub daily_budget: f64,
    pub status: Status,
    pub message: String,
}

/// Allowance per remaining day; 0 when there are no days left
pub fn daily_budget(net_income: f64, fixed_expenses: f64, days_left: i64) -> f64 {
    if days_left > 0 {
        (net_income - fixed_expenses) / days_left as f64
    } else {
        0.0
    }
}

/// Classify with the default caution multiplier
pub fn classify(
    net_income: f64,
    fixed_expenses: f64,
    today_expense: f64,
    days_left: i64,
) -> Classification {
    classify_with(
        CAUTION_MULTIPLIER,
        net_income,
        fixed_expenses,
        today_expense,
        days_left,
    )
}

/// Classify a day's spend against its daily budget
///
/// Accepts any numbers; range checks belong to the caller.
pub fn classify_with(
    caution_multiplier: f64,
    net_income: f64,
    fixed_expenses: f64,
    today_expense: f64,
    days_left: i64,
) -> Classification {
    let budget = daily_budget(net_income, fixed_expenses, days_left);

    let (status, message) = if budget <= 0.0 {
        (Status::Danger, MESSAGE_NO_BUDGET)
    } else if today_expense <= budget {
        (Status::Ok, MESSAGE_OK)
    } else if today_expense <= budget * caution_multiplier {
        (Status::Caution, MESSAGE_CAUTION)
    } else {
        (Status::Danger, MESSAGE_DANGER)
    };

    Classification {
        daily_budget: budget,
        status,
        message: message.to_string(),
    }
}
