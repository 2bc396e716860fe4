//! Budget check history
//!
//! Checks are only ever inserted. Reads return them newest first, which is
//! the order the score engine expects.

use rusqlite::params;
use tracing::debug;

use super::{format_datetime, parse_column, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{BudgetCheck, Status};

const CHECK_COLUMNS: &str = "id, user_id, net_income, fixed_expenses, today_expense, days_left, \
                             daily_budget, status, message, created_at";

fn row_to_check(row: &rusqlite::Row) -> rusqlite::Result<BudgetCheck> {
    let status_str: String = row.get(7)?;
    let created_at_str: String = row.get(9)?;

    Ok(BudgetCheck {
        id: row.get(0)?,
        user_id: row.get(1)?,
        net_income: row.get(2)?,
        fixed_expenses: row.get(3)?,
        today_expense: row.get(4)?,
        days_left: row.get(5)?,
        daily_budget: row.get(6)?,
        status: parse_column(7, &status_str)?,
        message: row.get(8)?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Store a classified check for a user, returning its ID
    ///
    /// The record's own `id` and `user_id` are ignored.
    pub fn insert_check(&self, user_id: i64, check: &BudgetCheck) -> Result<i64> {
        if self.get_user(user_id)?.is_none() {
            return Err(Error::NotFound(format!("User {}", user_id)));
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO budget_checks (
                user_id, net_income, fixed_expenses, today_expense, days_left,
                daily_budget, status, message, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                check.net_income,
                check.fixed_expenses,
                check.today_expense,
                check.days_left,
                check.daily_budget,
                check.status.as_str(),
                check.message,
                format_datetime(&check.created_at),
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(user_id, id, status = check.status.as_str(), "Stored budget check");
        Ok(id)
    }

    pub fn get_check(&self, id: i64) -> Result<Option<BudgetCheck>> {
        let conn = self.conn()?;
        let sql = format!("SELECT {} FROM budget_checks WHERE id = ?", CHECK_COLUMNS);

        match conn.query_row(&sql, params![id], row_to_check) {
            Ok(check) => Ok(Some(check)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// The `limit` newest checks for a user, newest first
    ///
    /// Checks stored within the same second keep insertion order.
    pub fn recent_checks(&self, user_id: i64, limit: usize) -> Result<Vec<BudgetCheck>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM budget_checks WHERE user_id = ? \
             ORDER BY created_at DESC, id DESC LIMIT ?",
            CHECK_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;

        let checks = stmt
            .query_map(params![user_id, limit as i64], row_to_check)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(checks)
    }

    /// Every check for a user, newest first
    pub fn list_checks(&self, user_id: i64) -> Result<Vec<BudgetCheck>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM budget_checks WHERE user_id = ? ORDER BY created_at DESC, id DESC",
            CHECK_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;

        let checks = stmt
            .query_map(params![user_id], row_to_check)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(checks)
    }

    pub fn count_checks(&self, user_id: i64) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM budget_checks WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Check counts per status for a user
    pub fn status_counts(&self, user_id: i64) -> Result<Vec<(Status, i64)>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT status, COUNT(*) FROM budget_checks WHERE user_id = ? GROUP BY status",
        )?;

        let rows = stmt
            .query_map(params![user_id], |row| {
                let status: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((parse_column::<Status>(0, &status)?, count))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut counts: Vec<(Status, i64)> = [Status::Ok, Status::Caution, Status::Danger]
            .into_iter()
            .map(|s| (s, 0))
            .collect();
        for (status, count) in rows {
            if let Some(entry) = counts.iter_mut().find(|(s, _)| *s == status) {
                entry.1 = count;
            }
        }

        Ok(counts)
    }
}
