//! Export command

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use pace_core::export::{CheckExportOptions, ExportFormat};
use pace_core::Database;

use super::find_user;

fn parse_date(value: Option<&str>, flag: &str) -> Result<Option<NaiveDate>> {
    value
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .with_context(|| format!("Invalid --{} date format (use YYYY-MM-DD)", flag))
}

pub fn cmd_export(
    db: &Database,
    user_name: &str,
    format: &str,
    output: Option<&Path>,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<()> {
    let user = find_user(db, user_name)?;
    let format: ExportFormat = format.parse().map_err(|e: String| anyhow!(e))?;

    let opts = CheckExportOptions {
        from: parse_date(from, "from")?,
        to: parse_date(to, "to")?,
    };

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let written = db.export_user(user.id, format, &opts, BufWriter::new(file))?;
            println!(
                "✅ Exported {} checks for {} to {} ({})",
                written,
                user.name,
                path.display(),
                format.as_str()
            );
        }
        None => {
            db.export_user(user.id, format, &opts, io::stdout().lock())?;
        }
    }

    Ok(())
}
