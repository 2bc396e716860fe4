//! Database tests

use super::*;
use crate::models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::classify::classify;
    use crate::health::ScoreSummary;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    fn classified(spend: f64, created_at: DateTime<Utc>) -> BudgetCheck {
        let input = NewBudgetCheck::new(3000.0, 1800.0, spend, 12);
        BudgetCheck::from_classification(&input, classify(3000.0, 1800.0, spend, 12), created_at)
    }

    #[test]
    fn test_in_memory_db() {
        let db = Database::in_memory().unwrap();
        assert!(db.list_users().unwrap().is_empty());
        assert!(!db.path().is_empty());
    }

    #[test]
    fn test_schema_exists() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();

        let columns: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('budget_checks') WHERE name IN ('user_id', 'daily_budget', 'status', 'message', 'created_at')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(columns, 5, "budget_checks should have the expected columns");

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'budget_checks', 'assessment_snapshots')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 3);
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let db = Database::in_memory().unwrap();
        db.create_user("Ava", Tone::Calm, PlanTier::Free).unwrap();

        let reopened = Database::new_unencrypted(db.path()).unwrap();
        assert_eq!(reopened.list_users().unwrap().len(), 1);
    }

    #[test]
    fn test_user_crud() {
        let db = Database::in_memory().unwrap();

        let id = db.create_user("  Ava ", Tone::Direct, PlanTier::Free).unwrap();
        assert!(id > 0);

        let user = db.get_user(id).unwrap().unwrap();
        assert_eq!(user.name, "Ava");
        assert_eq!(user.tone, Tone::Direct);
        assert_eq!(user.plan, PlanTier::Free);

        db.set_user_tone(id, Tone::Coach).unwrap();
        db.set_user_plan(id, PlanTier::Pro).unwrap();
        let user = db.find_user_by_name("ava").unwrap().unwrap();
        assert_eq!(user.tone, Tone::Coach);
        assert_eq!(user.plan, PlanTier::Pro);

        assert!(db.get_user(id + 100).unwrap().is_none());
        assert!(db.find_user_by_name("nobody").unwrap().is_none());
    }

    #[test]
    fn test_user_validation() {
        let db = Database::in_memory().unwrap();
        db.create_user("Ava", Tone::Calm, PlanTier::Free).unwrap();

        assert!(matches!(
            db.create_user("AVA", Tone::Calm, PlanTier::Free),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(
            db.create_user("   ", Tone::Calm, PlanTier::Free),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(
            db.set_user_tone(999, Tone::Calm),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_list_users_sorted_by_name() {
        let db = Database::in_memory().unwrap();
        db.create_user("Zed", Tone::Calm, PlanTier::Free).unwrap();
        db.create_user("Ava", Tone::Calm, PlanTier::Pro).unwrap();

        let names: Vec<String> = db.list_users().unwrap().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["Ava", "Zed"]);
    }

    #[test]
    fn test_insert_and_get_check() {
        let db = Database::in_memory().unwrap();
        let user_id = db.create_user("Ava", Tone::Calm, PlanTier::Free).unwrap();

        let check = classified(120.0, at(1, 9));
        let id = db.insert_check(user_id, &check).unwrap();

        let stored = db.get_check(id).unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.user_id, user_id);
        assert_eq!(stored.status, Status::Caution);
        assert_eq!(stored.daily_budget, 100.0);
        assert_eq!(stored.message, check.message);
        assert_eq!(stored.created_at, at(1, 9));
    }

    #[test]
    fn test_insert_check_unknown_user() {
        let db = Database::in_memory().unwrap();
        let result = db.insert_check(42, &classified(90.0, at(1, 9)));
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_recent_checks_newest_first_and_limited() {
        let db = Database::in_memory().unwrap();
        let user_id = db.create_user("Ava", Tone::Calm, PlanTier::Free).unwrap();

        // Inserted out of order on purpose
        for day in [3, 1, 5, 2, 4] {
            db.insert_check(user_id, &classified(90.0, at(day, 8))).unwrap();
        }

        let recent = db.recent_checks(user_id, 3).unwrap();
        let days: Vec<DateTime<Utc>> = recent.iter().map(|c| c.created_at).collect();
        assert_eq!(days, vec![at(5, 8), at(4, 8), at(3, 8)]);

        assert_eq!(db.list_checks(user_id).unwrap().len(), 5);
        assert_eq!(db.count_checks(user_id).unwrap(), 5);
    }

    #[test]
    fn test_same_second_keeps_insertion_order() {
        let db = Database::in_memory().unwrap();
        let user_id = db.create_user("Ava", Tone::Calm, PlanTier::Free).unwrap();

        let first = db.insert_check(user_id, &classified(90.0, at(1, 8))).unwrap();
        let second = db.insert_check(user_id, &classified(180.0, at(1, 8))).unwrap();

        let recent = db.recent_checks(user_id, 10).unwrap();
        assert_eq!(recent[0].id, second);
        assert_eq!(recent[1].id, first);
    }

    #[test]
    fn test_checks_are_scoped_per_user() {
        let db = Database::in_memory().unwrap();
        let ava = db.create_user("Ava", Tone::Calm, PlanTier::Free).unwrap();
        let ben = db.create_user("Ben", Tone::Calm, PlanTier::Free).unwrap();

        db.insert_check(ava, &classified(90.0, at(1, 8))).unwrap();
        db.insert_check(ben, &classified(90.0, at(1, 8))).unwrap();
        db.insert_check(ben, &classified(90.0, at(2, 8))).unwrap();

        assert_eq!(db.recent_checks(ava, 20).unwrap().len(), 1);
        assert_eq!(db.recent_checks(ben, 20).unwrap().len(), 2);
    }

    #[test]
    fn test_status_counts() {
        let db = Database::in_memory().unwrap();
        let user_id = db.create_user("Ava", Tone::Calm, PlanTier::Free).unwrap();

        let base = at(1, 8);
        for (i, spend) in [90.0, 90.0, 120.0, 500.0].iter().enumerate() {
            let check = classified(*spend, base + Duration::days(i as i64));
            db.insert_check(user_id, &check).unwrap();
        }

        let counts = db.status_counts(user_id).unwrap();
        assert_eq!(
            counts,
            vec![(Status::Ok, 2), (Status::Caution, 1), (Status::Danger, 1)]
        );
    }

    #[test]
    fn test_snapshot_round_trip() {
        let db = Database::in_memory().unwrap();
        let user_id = db.create_user("Ava", Tone::Calm, PlanTier::Pro).unwrap();
        assert!(db.latest_snapshot(user_id).unwrap().is_none());

        let mut breakdown = Breakdown::new();
        breakdown.set(Metric::Stability, 80);
        breakdown.set(Metric::Cushion, 35);

        let summary = ScoreSummary {
            score: 71,
            breakdown: breakdown.clone(),
            risk: Risk::Moderate,
            trend: -4,
        };
        db.save_snapshot(user_id, &summary, at(1, 8)).unwrap();
        db.save_snapshot(
            user_id,
            &ScoreSummary {
                score: 76,
                risk: Risk::Low,
                trend: 5,
                ..summary.clone()
            },
            at(2, 8),
        )
        .unwrap();

        let latest = db.latest_snapshot(user_id).unwrap().unwrap();
        assert_eq!(latest.score, 76);
        assert_eq!(latest.risk, Risk::Low);
        assert_eq!(latest.breakdown, breakdown);

        let all = db.list_snapshots(user_id, Some(10)).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].trend, -4);
    }

    #[test]
    fn test_encrypted_database_requires_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pace.db");
        let path = path.to_str().unwrap();

        let db = Database::new_with_key(path, Some("correct horse")).unwrap();
        assert!(db.is_encrypted());
        db.create_user("Ava", Tone::Calm, PlanTier::Free).unwrap();
        drop(db);

        let reopened = Database::new_with_key(path, Some("correct horse")).unwrap();
        assert_eq!(reopened.list_users().unwrap().len(), 1);

        assert!(Database::new_with_key(path, Some("wrong")).is_err());
    }

    #[test]
    fn test_unencrypted_database_reports_plaintext() {
        let db = Database::in_memory().unwrap();
        assert!(!db.is_encrypted());
    }

    #[test]
    fn test_corrupt_check_status_is_an_error() {
        let db = Database::in_memory().unwrap();
        let user_id = db.create_user("Ava", Tone::Calm, PlanTier::Free).unwrap();
        let id = db.insert_check(user_id, &classified(90.0, at(1, 8))).unwrap();

        db.conn()
            .unwrap()
            .execute("UPDATE budget_checks SET status = 'fine' WHERE id = ?", [id])
            .unwrap();

        assert!(matches!(db.get_check(id), Err(Error::Database(_))));
        assert!(db.recent_checks(user_id, 10).is_err());
        assert!(db.status_counts(user_id).is_err());
    }

    #[test]
    fn test_corrupt_snapshot_is_an_error() {
        let db = Database::in_memory().unwrap();
        let user_id = db.create_user("Ava", Tone::Calm, PlanTier::Free).unwrap();
        let summary = ScoreSummary {
            score: 70,
            breakdown: Breakdown::new(),
            risk: Risk::Moderate,
            trend: 0,
        };
        let id = db.save_snapshot(user_id, &summary, at(1, 8)).unwrap();
        let conn = db.conn().unwrap();

        conn.execute("UPDATE assessment_snapshots SET risk = 'severe' WHERE id = ?", [id])
            .unwrap();
        assert!(db.latest_snapshot(user_id).is_err());

        conn.execute(
            "UPDATE assessment_snapshots SET risk = 'low', breakdown = 'not json' WHERE id = ?",
            [id],
        )
        .unwrap();
        assert!(db.latest_snapshot(user_id).is_err());
    }

    #[test]
    fn test_corrupt_user_plan_is_an_error() {
        let db = Database::in_memory().unwrap();
        let user_id = db.create_user("Ava", Tone::Calm, PlanTier::Free).unwrap();

        db.conn()
            .unwrap()
            .execute("UPDATE users SET plan = 'platinum' WHERE id = ?", [user_id])
            .unwrap();

        assert!(db.get_user(user_id).is_err());
    }

    #[test]
    fn test_parse_datetime_format() {
        let dt = parse_datetime("2026-03-01 12:30:00");
        assert_eq!(format_datetime(&dt), "2026-03-01 12:30:00");
    }
}
