//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use clap::Parser;
use pace_core::db::Database;
use pace_core::models::{PlanTier, Status, Tone};
use pace_core::ScoreEngine;

use crate::cli::{Cli, Commands, UserAction};
use crate::commands::{self, CheckInput};

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

fn input(spend: f64) -> CheckInput {
    CheckInput {
        income: 3000.0,
        fixed: 1800.0,
        spend,
        days_left: 12,
    }
}

/// A user with a few recorded checks
fn user_with_checks(db: &Database, name: &str, plan: PlanTier, spends: &[f64]) -> i64 {
    let id = db.create_user(name, Tone::Calm, plan).unwrap();
    let engine = ScoreEngine::default();
    for spend in spends {
        commands::cmd_check(db, &engine, name, &input(*spend), false).unwrap();
    }
    id
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_check_command() {
    let cli = Cli::try_parse_from([
        "pace",
        "--no-encrypt",
        "check",
        "-u",
        "Sam",
        "--income",
        "3000",
        "--fixed",
        "1800",
        "--spend",
        "90",
        "--days-left",
        "12",
    ])
    .unwrap();

    assert!(cli.no_encrypt);
    assert_eq!(cli.db.to_str(), Some("pace.db"));
    match cli.command {
        Commands::Check {
            user,
            spend,
            days_left,
            json,
            ..
        } => {
            assert_eq!(user, "Sam");
            assert_eq!(spend, 90.0);
            assert_eq!(days_left, 12);
            assert!(!json);
        }
        _ => panic!("expected check command"),
    }
}

#[test]
fn test_parse_projection_negative_pct() {
    let cli = Cli::try_parse_from([
        "pace",
        "projection",
        "-u",
        "Sam",
        "--expense-pct",
        "-10",
    ])
    .unwrap();

    match cli.command {
        Commands::Projection {
            income_pct,
            expense_pct,
            ..
        } => {
            assert_eq!(income_pct, 0);
            assert_eq!(expense_pct, -10);
        }
        _ => panic!("expected projection command"),
    }
}

#[test]
fn test_parse_ask_joins_words() {
    let cli = Cli::try_parse_from(["pace", "ask", "-u", "Sam", "what", "if", "I", "save"]).unwrap();
    match cli.command {
        Commands::Ask { message, .. } => assert_eq!(message.join(" "), "what if I save"),
        _ => panic!("expected ask command"),
    }
}

#[test]
fn test_parse_user_add_defaults() {
    let cli = Cli::try_parse_from(["pace", "user", "add", "Sam"]).unwrap();
    match cli.command {
        Commands::User {
            action: UserAction::Add { name, tone, plan },
        } => {
            assert_eq!(name, "Sam");
            assert_eq!(tone, "calm");
            assert_eq!(plan, "free");
        }
        _ => panic!("expected user add command"),
    }
}

// ========== User Command Tests ==========

#[test]
fn test_cmd_user_add_and_list() {
    let db = setup_test_db();
    commands::cmd_user_add(&db, "Sam", "coach", "pro").unwrap();

    let user = db.find_user_by_name("Sam").unwrap().unwrap();
    assert_eq!(user.tone, Tone::Coach);
    assert_eq!(user.plan, PlanTier::Pro);

    assert!(commands::cmd_user_list(&db, false).is_ok());
    assert!(commands::cmd_user_list(&db, true).is_ok());
}

#[test]
fn test_cmd_user_add_invalid_tone() {
    let db = setup_test_db();
    let err = commands::cmd_user_add(&db, "Sam", "grumpy", "free").unwrap_err();
    assert!(err.to_string().contains("Valid tones"));
    assert!(db.list_users().unwrap().is_empty());
}

#[test]
fn test_cmd_user_tone_and_plan() {
    let db = setup_test_db();
    commands::cmd_user_add(&db, "Sam", "calm", "free").unwrap();

    commands::cmd_user_tone(&db, "sam", "playful").unwrap();
    commands::cmd_user_plan(&db, "Sam", "pro").unwrap();

    let user = db.find_user_by_name("Sam").unwrap().unwrap();
    assert_eq!(user.tone, Tone::Playful);
    assert_eq!(user.plan, PlanTier::Pro);
}

#[test]
fn test_unknown_user_is_an_error() {
    let db = setup_test_db();
    let err = commands::cmd_user_tone(&db, "Nobody", "calm").unwrap_err();
    assert!(err.to_string().contains("not found"));
}

// ========== Check Command Tests ==========

#[test]
fn test_cmd_check_records_classified_check() {
    let db = setup_test_db();
    let id = user_with_checks(&db, "Sam", PlanTier::Free, &[90.0, 120.0, 180.0]);

    let checks = db.recent_checks(id, 10).unwrap();
    assert_eq!(checks.len(), 3);
    let mut statuses: Vec<Status> = checks.iter().map(|c| c.status).collect();
    statuses.sort_by_key(|s| s.as_str());
    assert_eq!(statuses, vec![Status::Caution, Status::Danger, Status::Ok]);
    assert!(checks.iter().all(|c| c.user_id == id));
}

#[test]
fn test_cmd_check_rejects_negative_amounts() {
    let db = setup_test_db();
    let id = user_with_checks(&db, "Sam", PlanTier::Free, &[]);
    let engine = ScoreEngine::default();

    let err = commands::cmd_check(&db, &engine, "Sam", &input(-5.0), false).unwrap_err();
    assert!(err.to_string().contains("--spend"));

    let bad_days = CheckInput {
        days_left: -1,
        ..input(10.0)
    };
    assert!(commands::cmd_check(&db, &engine, "Sam", &bad_days, false).is_err());
    assert_eq!(db.count_checks(id).unwrap(), 0);
}

#[test]
fn test_zero_days_left_is_recorded_as_danger() {
    let db = setup_test_db();
    let id = user_with_checks(&db, "Sam", PlanTier::Free, &[]);
    let engine = ScoreEngine::default();

    let last_day = CheckInput {
        days_left: 0,
        ..input(10.0)
    };
    commands::cmd_check(&db, &engine, "Sam", &last_day, true).unwrap();

    let checks = db.recent_checks(id, 1).unwrap();
    assert_eq!(checks[0].status, Status::Danger);
    assert_eq!(checks[0].daily_budget, 0.0);
}

#[test]
fn test_cmd_history() {
    let db = setup_test_db();
    user_with_checks(&db, "Sam", PlanTier::Free, &[90.0, 95.0]);

    assert!(commands::cmd_history(&db, "Sam", 20, false).is_ok());
    assert!(commands::cmd_history(&db, "Sam", 1, true).is_ok());
}

// ========== Health Command Tests ==========

#[test]
fn test_cmd_health_free_plan() {
    let db = setup_test_db();
    user_with_checks(&db, "Sam", PlanTier::Free, &[90.0, 90.0, 120.0]);
    let engine = ScoreEngine::default();

    assert!(commands::cmd_health(&db, &engine, "Sam", false, false).is_ok());
    assert!(commands::cmd_health(&db, &engine, "Sam", false, true).is_ok());
}

#[test]
fn test_cmd_health_save_snapshot() {
    let db = setup_test_db();
    let id = user_with_checks(&db, "Sam", PlanTier::Free, &[90.0, 90.0]);
    let engine = ScoreEngine::default();

    commands::cmd_health(&db, &engine, "Sam", true, false).unwrap();

    let snapshot = db.latest_snapshot(id).unwrap().unwrap();
    let history = db.recent_checks(id, 20).unwrap();
    assert_eq!(snapshot.score, engine.score(&history).score);
}

#[test]
fn test_health_with_no_checks() {
    let db = setup_test_db();
    user_with_checks(&db, "Sam", PlanTier::Free, &[]);
    let engine = ScoreEngine::default();

    assert!(commands::cmd_health(&db, &engine, "Sam", false, false).is_ok());
}

#[test]
fn test_pro_features_gated_on_free_plan() {
    let db = setup_test_db();
    user_with_checks(&db, "Sam", PlanTier::Free, &[90.0]);
    let engine = ScoreEngine::default();

    let err = commands::cmd_streaks(&db, &engine, "Sam", false).unwrap_err();
    assert!(err.to_string().contains("pace user plan"));
    assert!(commands::cmd_projection(&db, &engine, "Sam", 0, 0, false).is_err());
    assert!(commands::cmd_ask(&db, &engine, "Sam", "explain my score").is_err());
}

#[test]
fn test_pro_features_on_pro_plan() {
    let db = setup_test_db();
    user_with_checks(&db, "Sam", PlanTier::Pro, &[90.0, 90.0, 90.0, 180.0]);
    let engine = ScoreEngine::default();

    assert!(commands::cmd_streaks(&db, &engine, "Sam", false).is_ok());
    assert!(commands::cmd_streaks(&db, &engine, "Sam", true).is_ok());
    assert!(commands::cmd_projection(&db, &engine, "Sam", 0, 0, false).is_ok());
    assert!(commands::cmd_projection(&db, &engine, "Sam", 5, -10, true).is_ok());
    assert!(commands::cmd_ask(&db, &engine, "Sam", "what drives my risk?").is_ok());
}

// ========== Plans / Export / Policy Tests ==========

#[test]
fn test_cmd_plans() {
    assert!(commands::cmd_plans(false).is_ok());
    assert!(commands::cmd_plans(true).is_ok());
}

#[test]
fn test_cmd_export_to_file() {
    let db = setup_test_db();
    user_with_checks(&db, "Sam", PlanTier::Free, &[90.0, 120.0]);
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("checks.csv");
    commands::cmd_export(&db, "Sam", "csv", Some(csv_path.as_path()), None, None).unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.starts_with("date,"));

    let json_path = dir.path().join("sam.json");
    commands::cmd_export(&db, "Sam", "json", Some(json_path.as_path()), None, None).unwrap();
    let backup: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(backup["user"]["name"], "Sam");
    assert_eq!(backup["checks"].as_array().unwrap().len(), 2);
}

#[test]
fn test_cmd_export_rejects_bad_input() {
    let db = setup_test_db();
    user_with_checks(&db, "Sam", PlanTier::Free, &[90.0]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    assert!(commands::cmd_export(&db, "Sam", "xml", Some(path.as_path()), None, None).is_err());
    assert!(commands::cmd_export(&db, "Sam", "csv", Some(path.as_path()), Some("03/01/2026"), None).is_err());
}

#[test]
fn test_load_engine_with_policy_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.toml");
    std::fs::write(&path, "[classifier]\ncaution_multiplier = 2.0\n").unwrap();

    let engine = commands::load_engine(Some(path.as_path())).unwrap();
    assert_eq!(engine.policy().caution_multiplier, 2.0);

    assert!(commands::load_engine(Some(dir.path().join("missing.toml").as_path())).is_err());
}

#[test]
fn test_open_db_unencrypted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pace.db");

    assert!(commands::cmd_init(&path, true).is_ok());
    let db = commands::open_db(&path, true).unwrap();
    assert!(!db.is_encrypted());
    assert!(db.list_users().unwrap().is_empty());

    assert!(commands::cmd_status(&path, true).is_ok());
    assert!(commands::cmd_status(&dir.path().join("missing.db"), true).is_ok());
}
