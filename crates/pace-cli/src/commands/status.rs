//! Status command

use std::fs;
use std::path::Path;

use anyhow::Result;
use pace_core::db::DB_KEY_ENV;
use pace_core::policy::default_policy_path;

use super::open_db;

fn print_encryption(no_encrypt: bool, has_key: bool) {
    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else if has_key {
        println!("   🔒 Encryption: ENABLED ({}=***)", DB_KEY_ENV);
    } else {
        println!("   ❌ Encryption: REQUIRED but {} not set", DB_KEY_ENV);
    }
}

pub fn cmd_status(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!();
    println!("📊 Pace Status");
    println!("   ─────────────────────────────────────────────────────────────");

    println!("   Database: {}", db_path.display());

    if db_path.exists() {
        if let Ok(metadata) = fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }
    } else {
        println!("   Size: (database not initialized)");
    }

    let has_key = std::env::var(DB_KEY_ENV).is_ok();
    if !db_path.exists() {
        print_encryption(no_encrypt, has_key);
    }

    match default_policy_path() {
        Some(path) if path.exists() => println!("   Policy: {}", path.display()),
        _ => println!("   Policy: built-in defaults"),
    }

    if db_path.exists() {
        match open_db(db_path, no_encrypt) {
            Ok(db) => {
                if db.is_encrypted() {
                    println!("   🔒 Encryption: ENABLED ({}=***)", DB_KEY_ENV);
                } else {
                    println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
                }
                if let Ok(users) = db.list_users() {
                    println!();
                    println!("   Users: {}", users.len());
                    for user in users {
                        let checks = db.count_checks(user.id).unwrap_or(0);
                        let counts = db.status_counts(user.id).unwrap_or_default();
                        let breakdown: Vec<String> = counts
                            .iter()
                            .map(|(status, n)| format!("{} {}", n, status))
                            .collect();
                        println!(
                            "     {} ({}): {} checks [{}]",
                            user.name,
                            user.plan,
                            checks,
                            breakdown.join(", ")
                        );
                    }
                }
            }
            Err(e) => {
                print_encryption(no_encrypt, has_key);
                println!();
                println!("   ❌ Error opening database: {}", e);
                if !no_encrypt && !has_key {
                    println!("      Set {} or use --no-encrypt", DB_KEY_ENV);
                } else if has_key {
                    println!("      (Check if {} is correct)", DB_KEY_ENV);
                }
            }
        }
    }

    println!();
    Ok(())
}
