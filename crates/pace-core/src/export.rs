//! Export of a user's check history
//!
//! Supports:
//! - Check history as CSV with an optional date range
//! - Full per-user JSON backup (user, checks, snapshots)

use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{AssessmentSnapshot, BudgetCheck, User};

/// Current backup format version
pub const BACKUP_VERSION: u32 = 1;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

/// Options for check export
#[derive(Debug, Clone, Default)]
pub struct CheckExportOptions {
    /// Start date filter (inclusive)
    pub from: Option<NaiveDate>,
    /// End date filter (inclusive)
    pub to: Option<NaiveDate>,
}

impl CheckExportOptions {
    fn includes(&self, check: &BudgetCheck) -> bool {
        let date = check.created_at.date_naive();
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// Column names of [`CheckRow`], written even when no rows match
const CSV_HEADER: [&str; 8] = [
    "date",
    "net_income",
    "fixed_expenses",
    "today_expense",
    "days_left",
    "daily_budget",
    "status",
    "message",
];

/// One CSV row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRow {
    pub date: String,
    pub net_income: f64,
    pub fixed_expenses: f64,
    pub today_expense: f64,
    pub days_left: i64,
    pub daily_budget: f64,
    pub status: String,
    pub message: String,
}

impl From<&BudgetCheck> for CheckRow {
    fn from(check: &BudgetCheck) -> Self {
        Self {
            date: check.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            net_income: check.net_income,
            fixed_expenses: check.fixed_expenses,
            today_expense: check.today_expense,
            days_left: check.days_left,
            daily_budget: (check.daily_budget * 100.0).round() / 100.0,
            status: check.status.as_str().to_string(),
            message: check.message.clone(),
        }
    }
}

/// Everything stored for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBackup {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub user: User,
    pub checks: Vec<BudgetCheck>,
    pub snapshots: Vec<AssessmentSnapshot>,
}

impl Database {
    /// Checks for a user within the date range, newest first
    pub fn export_checks(
        &self,
        user_id: i64,
        opts: &CheckExportOptions,
    ) -> Result<Vec<BudgetCheck>> {
        Ok(self
            .list_checks(user_id)?
            .into_iter()
            .filter(|c| opts.includes(c))
            .collect())
    }

    /// Write a user's checks as CSV
    pub fn export_checks_csv<W: Write>(
        &self,
        user_id: i64,
        opts: &CheckExportOptions,
        writer: W,
    ) -> Result<usize> {
        let checks = self.export_checks(user_id, opts)?;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        wtr.write_record(CSV_HEADER)?;
        for check in &checks {
            wtr.serialize(CheckRow::from(check))?;
        }
        wtr.flush()?;

        Ok(checks.len())
    }

    /// Build a full backup of one user
    pub fn export_user_backup(&self, user_id: i64) -> Result<UserBackup> {
        let user = self
            .get_user(user_id)?
            .ok_or_else(|| Error::NotFound(format!("User {}", user_id)))?;

        Ok(UserBackup {
            version: BACKUP_VERSION,
            exported_at: Utc::now(),
            checks: self.list_checks(user_id)?,
            snapshots: self.list_snapshots(user_id, None)?,
            user,
        })
    }

    /// Write a user's data in the given format, returning the number of checks written
    pub fn export_user<W: Write>(
        &self,
        user_id: i64,
        format: ExportFormat,
        opts: &CheckExportOptions,
        mut writer: W,
    ) -> Result<usize> {
        match format {
            ExportFormat::Csv => self.export_checks_csv(user_id, opts, writer),
            ExportFormat::Json => {
                let mut backup = self.export_user_backup(user_id)?;
                backup.checks.retain(|c| opts.includes(c));
                serde_json::to_writer_pretty(&mut writer, &backup)?;
                writeln!(writer)?;
                Ok(backup.checks.len())
            }
        }
    }
}
