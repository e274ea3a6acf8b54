//! Data transfer commands: export, import.

use std::fs;
use std::path::{Path, PathBuf};

use jiff::{Timestamp, tz::TimeZone};

use crate::store::LogStore;
use crate::transfer::{self, ImportError};

pub(super) fn cmd_export(store: &LogStore, out: Option<PathBuf>) -> Result<(), String> {
    let json = transfer::export_json(store.logs())
        .map_err(|e| format!("failed to serialize work logs: {e}"))?;

    let path = out.unwrap_or_else(|| default_export_path(Timestamp::now()));
    if path.as_os_str() == "-" {
        println!("{json}");
        return Ok(());
    }

    fs::write(&path, &json).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    eprintln!(
        "Exported {} log(s) → {}",
        store.logs().len(),
        path.display()
    );
    Ok(())
}

pub(super) fn cmd_import(store: &mut LogStore, file: &Path) -> Result<(), String> {
    let text = fs::read_to_string(file)
        .map_err(|e| format!("failed to read {}: {e}", file.display()))?;

    let batch = transfer::parse_import(&text).map_err(|e| describe_import_error(&e))?;

    for rejection in &batch.rejected {
        eprintln!("Skipped {rejection}");
    }

    let offered = batch.accepted.len();
    let imported = store
        .import(batch.accepted)
        .map_err(|e| format!("failed to save work logs: {e}"))?;

    eprintln!("Imported {imported} log(s)");
    if imported < offered {
        eprintln!("{} already present, kept existing", offered - imported);
    }
    Ok(())
}

/// `work-logs-<date>.json`, dated in UTC.
fn default_export_path(now: Timestamp) -> PathBuf {
    PathBuf::from(transfer::export_file_name(now.to_zoned(TimeZone::UTC).date()))
}

fn describe_import_error(err: &ImportError) -> String {
    let mut message = format!("import failed: {err}");
    if let ImportError::NoValidEntries(rejected) = err {
        for rejection in rejected {
            message.push_str("\n  ");
            message.push_str(&rejection.to_string());
        }
    }
    message
}
