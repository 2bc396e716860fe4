//! Pace CLI - Daily budget pacing companion
//!
//! Usage:
//!   pace init                                   Initialize database
//!   pace user add Sam --tone coach              Add a user
//!   pace check -u Sam --income 3000 --fixed 1800 --spend 90 --days-left 12
//!   pace health -u Sam                          Show the health score

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Status => commands::cmd_status(&cli.db, cli.no_encrypt),
        Commands::Plans { json } => commands::cmd_plans(json),
        Commands::User { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                UserAction::Add { name, tone, plan } => {
                    commands::cmd_user_add(&db, &name, &tone, &plan)
                }
                UserAction::List { json } => commands::cmd_user_list(&db, json),
                UserAction::Tone { name, tone } => commands::cmd_user_tone(&db, &name, &tone),
                UserAction::Plan { name, plan } => commands::cmd_user_plan(&db, &name, &plan),
            }
        }
        Commands::Check {
            user,
            income,
            fixed,
            spend,
            days_left,
            json,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let engine = commands::load_engine(cli.policy.as_deref())?;
            let input = commands::CheckInput {
                income,
                fixed,
                spend,
                days_left,
            };
            commands::cmd_check(&db, &engine, &user, &input, json)
        }
        Commands::Health { user, save, json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let engine = commands::load_engine(cli.policy.as_deref())?;
            commands::cmd_health(&db, &engine, &user, save, json)
        }
        Commands::History { user, limit, json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_history(&db, &user, limit, json)
        }
        Commands::Streaks { user, json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let engine = commands::load_engine(cli.policy.as_deref())?;
            commands::cmd_streaks(&db, &engine, &user, json)
        }
        Commands::Projection {
            user,
            income_pct,
            expense_pct,
            json,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let engine = commands::load_engine(cli.policy.as_deref())?;
            commands::cmd_projection(&db, &engine, &user, income_pct, expense_pct, json)
        }
        Commands::Ask { user, message } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let engine = commands::load_engine(cli.policy.as_deref())?;
            commands::cmd_ask(&db, &engine, &user, &message.join(" "))
        }
        Commands::Export {
            user,
            format,
            output,
            from,
            to,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_export(
                &db,
                &user,
                &format,
                output.as_deref(),
                from.as_deref(),
                to.as_deref(),
            )
        }
    }
}
