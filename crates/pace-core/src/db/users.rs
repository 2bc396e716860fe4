//! User operations

use rusqlite::params;

use super::{parse_column, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{PlanTier, Tone, User};

const USER_COLUMNS: &str = "id, name, tone, plan, created_at";

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    let tone_str: String = row.get(2)?;
    let plan_str: String = row.get(3)?;
    let created_at_str: String = row.get(4)?;

    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        tone: parse_column(2, &tone_str)?,
        plan: parse_column(3, &plan_str)?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Create a user, returning its ID
    pub fn create_user(&self, name: &str, tone: Tone, plan: PlanTier) -> Result<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData("User name cannot be empty".to_string()));
        }
        if self.find_user_by_name(name)?.is_some() {
            return Err(Error::InvalidData(format!("User '{}' already exists", name)));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (name, tone, plan) VALUES (?, ?, ?)",
            params![name, tone.as_str(), plan.as_str()],
        )?;

        Ok(conn.last_insert_rowid())
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn()?;
        let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);

        match conn.query_row(&sql, params![id], row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Look up a user by name (case-insensitive)
    pub fn find_user_by_name(&self, name: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM users WHERE name = ? COLLATE NOCASE",
            USER_COLUMNS
        );

        match conn.query_row(&sql, params![name.trim()], row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn()?;
        let sql = format!("SELECT {} FROM users ORDER BY name", USER_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;

        let users = stmt
            .query_map([], row_to_user)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(users)
    }

    pub fn set_user_tone(&self, id: i64, tone: Tone) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE users SET tone = ? WHERE id = ?",
            params![tone.as_str(), id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("User {}", id)));
        }
        Ok(())
    }

    pub fn set_user_plan(&self, id: i64, plan: PlanTier) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE users SET plan = ? WHERE id = ?",
            params![plan.as_str(), id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("User {}", id)));
        }
        Ok(())
    }
}
