//! Health commands (health, streaks, projection, ask)

use anyhow::Result;
use chrono::Utc;
use pace_core::companion::{self, CompanionContext};
use pace_core::models::Risk;
use pace_core::plans::Feature;
use pace_core::projection::BufferState;
use pace_core::streaks::is_highlight;
use pace_core::{Database, ScoreEngine};

use super::{find_user, require_feature};

fn risk_icon(risk: Risk) -> &'static str {
    match risk {
        Risk::Low => "🟢",
        Risk::Moderate => "🟡",
        Risk::High => "🔴",
    }
}

fn trend_arrow(trend: i32) -> String {
    match trend {
        t if t > 0 => format!("▲ +{}", t),
        t if t < 0 => format!("▼ {}", t),
        _ => "● 0".to_string(),
    }
}

pub fn cmd_health(
    db: &Database,
    engine: &ScoreEngine,
    user_name: &str,
    save: bool,
    json: bool,
) -> Result<()> {
    let user = find_user(db, user_name)?;
    require_feature(&user, Feature::HealthScore)?;

    let history = db.recent_checks(user.id, engine.policy().history_window)?;
    let assessment = engine.assess(&history);

    if save {
        let summary = engine.score(&history);
        db.save_snapshot(user.id, &summary, Utc::now())?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
        return Ok(());
    }

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│         💚 Pace Health Score            │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  {} {}/100  {}   trend {}",
        risk_icon(assessment.risk),
        assessment.score,
        assessment.label,
        trend_arrow(assessment.trend)
    );
    println!("  Risk: {}", assessment.risk);
    println!("  {}", assessment.reason);

    if !assessment.breakdown.is_empty() {
        println!();
        println!("  📊 Breakdown");
        println!("     ─────────────────────────────");
        for (metric, value) in assessment.breakdown.iter() {
            println!("     {:<16} {:>3}%", metric.as_str(), value);
        }
    }

    if !assessment.drivers.is_empty() {
        println!();
        println!("  🔎 Weakest areas");
        for driver in &assessment.drivers {
            println!("     {:<16} {}", driver.name, driver.value);
        }
    }

    println!();
    println!("  👉 Next steps");
    for step in &assessment.next_steps {
        println!("     • {}", step);
    }

    if save {
        println!();
        println!("  💾 Snapshot saved");
    } else if let Some(previous) = db.latest_snapshot(user.id)? {
        println!();
        println!(
            "  Last snapshot {}: {}/100",
            previous.created_at.format("%Y-%m-%d"),
            previous.score
        );
    }

    println!();
    Ok(())
}

pub fn cmd_streaks(db: &Database, engine: &ScoreEngine, user_name: &str, json: bool) -> Result<()> {
    let user = find_user(db, user_name)?;
    require_feature(&user, Feature::Streaks)?;

    let history = db.recent_checks(user.id, engine.policy().history_window)?;
    let assessment = engine.assess(&history);
    let streaks = assessment.streaks;

    if json {
        println!("{}", serde_json::to_string_pretty(&streaks)?);
        return Ok(());
    }

    let glow = |days: u32| if is_highlight(days) { " 🔥" } else { "" };

    println!();
    println!("🏁 Streaks for {}", user.name);
    println!("   ─────────────────────────────");
    println!("   Stable days:      {}{}", streaks.stable, glow(streaks.stable));
    println!("   Adjusting early:  {}{}", streaks.adjust, glow(streaks.adjust));
    println!("   Goal days:        {}{}", streaks.goal, glow(streaks.goal));
    if streaks.highlighted() {
        println!("   Keep the rhythm going.");
    }

    if let Some(tip) = companion::tips(&assessment.breakdown).first() {
        println!();
        println!("   💡 {}", tip);
    }

    println!();
    Ok(())
}

pub fn cmd_projection(
    db: &Database,
    engine: &ScoreEngine,
    user_name: &str,
    income_pct: i32,
    expense_pct: i32,
    json: bool,
) -> Result<()> {
    let user = find_user(db, user_name)?;
    require_feature(&user, Feature::Projection)?;

    let scenario = income_pct != 0 || expense_pct != 0;
    if scenario {
        require_feature(&user, Feature::Scenario)?;
    }

    let history = db.recent_checks(user.id, engine.policy().history_window)?;
    let base = engine.projection(&history);
    let shown = if scenario {
        base.with_scenario(income_pct, expense_pct)
    } else {
        base.clone()
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "base": base,
                "scenario": if scenario { Some(&shown) } else { None },
                "income_pct": income_pct,
                "expense_pct": expense_pct,
            }))?
        );
        return Ok(());
    }

    println!();
    println!("📈 Projection for {}", user.name);
    println!("   ─────────────────────────────");
    println!(
        "   Buffer: {}",
        match shown.buffer {
            BufferState::Stable => "stable",
            BufferState::Tight => "tight ⚠️",
        }
    );
    println!("   Drift:  {:+.1}%", shown.drift * 100.0);
    println!();

    for (week, (point, base_point)) in shown.points.iter().zip(&base.points).enumerate() {
        let bar = "█".repeat((*point as usize) / 5);
        if scenario {
            println!("   W{}  {:>3} {:<20} (was {})", week + 1, point, bar, base_point);
        } else {
            println!("   W{}  {:>3} {}", week + 1, point, bar);
        }
    }

    if scenario {
        println!();
        println!(
            "   Scenario: income {:+}%, expenses {:+}%",
            income_pct, expense_pct
        );
    }

    println!();
    Ok(())
}

pub fn cmd_ask(db: &Database, engine: &ScoreEngine, user_name: &str, message: &str) -> Result<()> {
    let user = find_user(db, user_name)?;
    require_feature(&user, Feature::Companion)?;

    let history = db.recent_checks(user.id, engine.policy().history_window)?;
    let assessment = engine.assess(&history);
    let ctx = CompanionContext::from_assessment(&user.name, user.tone, &assessment);

    println!("{}", companion::respond(message, &ctx));

    for tip in companion::tips(&assessment.breakdown) {
        println!("   💡 {}", tip);
    }

    Ok(())
}
