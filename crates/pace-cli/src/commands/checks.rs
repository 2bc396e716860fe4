//! Budget check commands (check, history)

use anyhow::{bail, Result};
use chrono::Utc;
use pace_core::models::{BudgetCheck, NewBudgetCheck, Status};
use pace_core::{Database, ScoreEngine};

use super::find_user;

/// Raw amounts from the command line
#[derive(Debug, Clone, Copy)]
pub struct CheckInput {
    pub income: f64,
    pub fixed: f64,
    pub spend: f64,
    pub days_left: i64,
}

impl CheckInput {
    /// Reject values the classifier would accept but a person never means
    pub fn validate(&self) -> Result<NewBudgetCheck> {
        for (name, value) in [
            ("income", self.income),
            ("fixed", self.fixed),
            ("spend", self.spend),
        ] {
            if !value.is_finite() || value < 0.0 {
                bail!("--{} must be a non-negative amount, got {}", name, value);
            }
        }
        if self.days_left < 0 {
            bail!("--days-left cannot be negative, got {}", self.days_left);
        }

        Ok(NewBudgetCheck::new(
            self.income,
            self.fixed,
            self.spend,
            self.days_left,
        ))
    }
}

pub(crate) fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Ok => "🟢",
        Status::Caution => "🟡",
        Status::Danger => "🔴",
    }
}

pub fn cmd_check(
    db: &Database,
    engine: &ScoreEngine,
    user_name: &str,
    input: &CheckInput,
    json: bool,
) -> Result<()> {
    let user = find_user(db, user_name)?;
    let new_check = input.validate()?;

    let classification = engine.classify_check(&new_check);
    let mut check = BudgetCheck::from_classification(&new_check, classification, Utc::now());
    check.id = db.insert_check(user.id, &check)?;
    check.user_id = user.id;

    if json {
        println!("{}", serde_json::to_string_pretty(&check)?);
        return Ok(());
    }

    println!();
    println!("{} {}", status_icon(check.status), check.status.as_str().to_uppercase());
    println!("   ─────────────────────────────");
    println!("   Daily budget: ${:.2}", check.daily_budget);
    println!("   Spent today:  ${:.2}", check.today_expense);
    println!("   {}", check.message);
    println!();
    println!("   Run 'pace health -u \"{}\"' to see how this moves your score.", user.name);
    println!();

    Ok(())
}

pub fn cmd_history(db: &Database, user_name: &str, limit: usize, json: bool) -> Result<()> {
    let user = find_user(db, user_name)?;
    let checks = db.recent_checks(user.id, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&checks)?);
        return Ok(());
    }

    if checks.is_empty() {
        println!("No checks yet for {}. Log one with:", user.name);
        println!("  pace check -u \"{}\" --income 3000 --fixed 1800 --spend 90 --days-left 12", user.name);
        return Ok(());
    }

    println!();
    println!("📜 Recent checks for {} ({} shown)", user.name, checks.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for check in &checks {
        println!(
            "   {}  {} {:<8} spent ${:>9.2} of ${:>9.2}  ({} days left)",
            check.created_at.format("%Y-%m-%d %H:%M"),
            status_icon(check.status),
            check.status,
            check.today_expense,
            check.daily_budget,
            check.days_left
        );
    }

    println!();
    Ok(())
}
