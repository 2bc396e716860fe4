//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pace - Keep your daily spending on pace with your month
#[derive(Parser)]
#[command(name = "pace")]
#[command(about = "Daily budget pacing and financial health companion", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "pace.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended outside development)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set PACE_DB_KEY environment variable with your passphrase.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    /// Scoring policy file (defaults to the data dir override, then built-in)
    #[arg(long, global = true)]
    pub policy: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Classify today's spend and record the check
    Check {
        /// User name
        #[arg(short, long)]
        user: String,

        /// Net income for the period
        #[arg(long)]
        income: f64,

        /// Fixed expenses for the period (rent, bills, subscriptions)
        #[arg(long)]
        fixed: f64,

        /// What you spent today
        #[arg(long)]
        spend: f64,

        /// Days left in the period, including today
        #[arg(long)]
        days_left: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the health score with its breakdown and advice
    Health {
        /// User name
        #[arg(short, long)]
        user: String,

        /// Save a snapshot of this assessment
        #[arg(long)]
        save: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recent checks
    History {
        /// User name
        #[arg(short, long)]
        user: String,

        /// Maximum number of checks to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show behavioral streaks (Pro)
    Streaks {
        /// User name
        #[arg(short, long)]
        user: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the short-term projection curve (Pro)
    Projection {
        /// User name
        #[arg(short, long)]
        user: String,

        /// What-if: income change in percent
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        income_pct: i32,

        /// What-if: expense change in percent
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        expense_pct: i32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask the companion a question (Pro)
    Ask {
        /// User name
        #[arg(short, long)]
        user: String,

        /// Your message
        #[arg(required = true, trailing_var_arg = true)]
        message: Vec<String>,
    },

    /// Show available plans
    Plans {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export a user's check history
    Export {
        /// User name
        #[arg(short, long)]
        user: String,

        /// Output format: csv (checks only) or json (full user backup)
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<String>,
    },

    /// Show database status (encryption, size, etc.)
    Status,
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Add a user
    Add {
        /// Display name
        name: String,

        /// Companion tone: calm, direct, playful, coach
        #[arg(long, default_value = "calm")]
        tone: String,

        /// Plan: free, pro
        #[arg(long, default_value = "free")]
        plan: String,
    },

    /// List users
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a user's companion tone
    Tone {
        /// User name
        name: String,

        /// New tone: calm, direct, playful, coach
        tone: String,
    },

    /// Change a user's plan
    Plan {
        /// User name
        name: String,

        /// New plan: free, pro
        plan: String,
    },
}
