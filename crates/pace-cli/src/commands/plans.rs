//! Plan catalog command

use anyhow::Result;
use pace_core::plans;

pub fn cmd_plans(json: bool) -> Result<()> {
    let catalog = plans::catalog();

    if json {
        println!("{}", serde_json::to_string_pretty(catalog)?);
        return Ok(());
    }

    println!();
    println!("💳 Plans");
    println!("   ─────────────────────────────");

    for plan in catalog {
        println!();
        println!(
            "   {} - ${}/month or ${}/year",
            plan.name, plan.price_monthly, plan.price_yearly
        );
        for feature in plan.features {
            println!("     • {}", feature);
        }
    }

    println!();
    println!("   Switch plans with: pace user plan NAME pro");
    println!();
    Ok(())
}
