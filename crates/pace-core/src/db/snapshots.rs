//! Saved health assessments

use chrono::{DateTime, Utc};
use rusqlite::params;

use super::{format_datetime, parse_column, parse_datetime, Database};
use crate::error::Result;
use crate::health::ScoreSummary;
use crate::models::AssessmentSnapshot;

const SNAPSHOT_COLUMNS: &str = "id, user_id, score, trend, risk, breakdown, created_at";

fn row_to_snapshot(row: &rusqlite::Row) -> rusqlite::Result<AssessmentSnapshot> {
    let score: i64 = row.get(2)?;
    let risk_str: String = row.get(4)?;
    let breakdown_json: String = row.get(5)?;
    let created_at_str: String = row.get(6)?;

    Ok(AssessmentSnapshot {
        id: row.get(0)?,
        user_id: row.get(1)?,
        score: score.clamp(0, 100) as u8,
        trend: row.get(3)?,
        risk: parse_column(4, &risk_str)?,
        breakdown: serde_json::from_str(&breakdown_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Save a score summary taken at `taken_at`, returning its ID
    pub fn save_snapshot(
        &self,
        user_id: i64,
        summary: &ScoreSummary,
        taken_at: DateTime<Utc>,
    ) -> Result<i64> {
        let conn = self.conn()?;
        let breakdown_json = serde_json::to_string(&summary.breakdown)?;

        conn.execute(
            r#"
            INSERT INTO assessment_snapshots (user_id, score, trend, risk, breakdown, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                summary.score as i64,
                summary.trend,
                summary.risk.as_str(),
                breakdown_json,
                format_datetime(&taken_at),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    pub fn latest_snapshot(&self, user_id: i64) -> Result<Option<AssessmentSnapshot>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM assessment_snapshots WHERE user_id = ? \
             ORDER BY created_at DESC, id DESC LIMIT 1",
            SNAPSHOT_COLUMNS
        );

        match conn.query_row(&sql, params![user_id], row_to_snapshot) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Snapshots for a user, newest first; `None` returns all of them
    pub fn list_snapshots(
        &self,
        user_id: i64,
        limit: Option<usize>,
    ) -> Result<Vec<AssessmentSnapshot>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM assessment_snapshots WHERE user_id = ? \
             ORDER BY created_at DESC, id DESC LIMIT ?",
            SNAPSHOT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;

        let snapshots = stmt
            // SQLite treats a negative LIMIT as unbounded
            .query_map(
                params![user_id, limit.map_or(-1, |l| l as i64)],
                row_to_snapshot,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(snapshots)
    }
}
