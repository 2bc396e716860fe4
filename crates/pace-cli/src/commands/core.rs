//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `load_engine` - Build the score engine from the scoring policy
//! - `find_user` / `require_feature` - User lookup and plan gate
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use pace_core::models::User;
use pace_core::plans::{self, Feature};
use pace_core::{Database, ScoreEngine, ScoringPolicy};
use tracing::debug;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow!("Database path is not valid UTF-8: {}", db_path.display()))?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Load the scoring policy and wrap it in an engine
pub fn load_engine(policy_path: Option<&Path>) -> Result<ScoreEngine> {
    let policy = ScoringPolicy::load(policy_path).context("Failed to load scoring policy")?;
    debug!(
        caution_multiplier = policy.caution_multiplier,
        history_window = policy.history_window,
        "Loaded scoring policy"
    );
    Ok(ScoreEngine::new(policy))
}

/// Look up a user by name
pub fn find_user(db: &Database, name: &str) -> Result<User> {
    db.find_user_by_name(name)?.ok_or_else(|| {
        anyhow!(
            "User '{}' not found. Add one with: pace user add \"{}\"",
            name,
            name
        )
    })
}

/// Fail unless the user's plan includes the feature
pub fn require_feature(user: &User, feature: Feature) -> Result<()> {
    if !plans::allows(user.plan, feature) {
        bail!(
            "{} is not included in the {} plan. Upgrade with: pace user plan \"{}\" pro",
            feature,
            user.plan,
            user.name
        );
    }
    Ok(())
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let _db = open_db(db_path, no_encrypt)?;

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Add yourself: pace user add Sam");
    println!("  2. Log today: pace check -u Sam --income 3000 --fixed 1800 --spend 90 --days-left 12");
    println!("  3. See your score: pace health -u Sam");

    Ok(())
}
