//! User management commands

use anyhow::{anyhow, Result};
use pace_core::models::{PlanTier, Tone};
use pace_core::Database;

use super::find_user;

fn parse_tone(tone: &str) -> Result<Tone> {
    tone.parse()
        .map_err(|e: String| anyhow!("{}. Valid tones: calm, direct, playful, coach", e))
}

fn parse_plan(plan: &str) -> Result<PlanTier> {
    plan.parse()
        .map_err(|e: String| anyhow!("{}. Valid plans: free, pro", e))
}

pub fn cmd_user_add(db: &Database, name: &str, tone: &str, plan: &str) -> Result<()> {
    let tone = parse_tone(tone)?;
    let plan = parse_plan(plan)?;

    let id = db.create_user(name, tone, plan)?;
    println!("✅ Added user '{}' (id {}, tone {}, plan {})", name.trim(), id, tone, plan);

    Ok(())
}

pub fn cmd_user_list(db: &Database, json: bool) -> Result<()> {
    let users = db.list_users()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    if users.is_empty() {
        println!("No users yet. Add one with:");
        println!("  pace user add Sam");
        return Ok(());
    }

    println!();
    println!("👤 Users");
    println!("   ─────────────────────────────────────────");

    for user in users {
        let checks = db.count_checks(user.id)?;
        println!(
            "   {:<20} {:<8} {:<5} {} checks",
            user.name, user.tone, user.plan, checks
        );
    }

    println!();
    Ok(())
}

pub fn cmd_user_tone(db: &Database, name: &str, tone: &str) -> Result<()> {
    let user = find_user(db, name)?;
    let tone = parse_tone(tone)?;

    db.set_user_tone(user.id, tone)?;
    println!("✅ {} now hears the companion in a {} tone", user.name, tone);

    Ok(())
}

pub fn cmd_user_plan(db: &Database, name: &str, plan: &str) -> Result<()> {
    let user = find_user(db, name)?;
    let plan = parse_plan(plan)?;

    db.set_user_plan(user.id, plan)?;
    println!("✅ {} is now on the {} plan", user.name, plan);

    Ok(())
}
