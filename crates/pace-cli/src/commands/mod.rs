//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db, load_engine, user lookup, plan gate)
//! - `users` - User management (add, list, tone, plan)
//! - `checks` - Record a check, list history
//! - `health` - Health score, streaks, projection, companion
//! - `plans` - Plan catalog
//! - `export` - CSV/JSON export
//! - `status` - Database status

pub mod checks;
pub mod core;
pub mod export;
pub mod health;
pub mod plans;
pub mod status;
pub mod users;

// Re-export command functions for main.rs
pub use checks::*;
pub use core::*;
pub use export::*;
pub use health::*;
pub use plans::*;
pub use status::*;
pub use users::*;
