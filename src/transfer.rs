//! JSON export and import of work logs.
//!
//! Exports are the full `logs` array, pretty-printed. Imports accept the
//! same shape, checked entry by entry: each rejected entry is reported with
//! its index and the reason, and the accepted ones pass through unmodified.

use std::fmt;

use jiff::civil::Date;
use serde_json::{Map, Value};

use crate::model::WorkLog;

/// Fields an imported entry must carry with a truthy value.
const REQUIRED_FIELDS: [&str; 4] = ["id", "requirement", "status", "createdAt"];

/// Serializes `logs` as indented JSON.
pub fn export_json(logs: &[WorkLog]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(logs)
}

/// The default export file name for `date`: `work-logs-YYYY-MM-DD.json`.
pub fn export_file_name(date: Date) -> String {
    format!("work-logs-{date}.json")
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of work logs")]
    NotAnArray,

    #[error("no valid work logs found ({} rejected)", .0.len())]
    NoValidEntries(Vec<Rejection>),
}

/// An import entry that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Position in the imported array.
    pub index: usize,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    NotAnObject,

    /// Required fields that were absent or falsy.
    MissingFields(Vec<&'static str>),

    /// Fields present but unusable (wrong type, unknown status, ...).
    Malformed(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry {}: ", self.index)?;
        match &self.reason {
            RejectReason::NotAnObject => f.write_str("not an object"),
            RejectReason::MissingFields(fields) => {
                write!(f, "missing {}", fields.join(", "))
            }
            RejectReason::Malformed(msg) => f.write_str(msg),
        }
    }
}

/// The outcome of parsing an import file with at least one usable entry.
#[derive(Debug)]
pub struct ImportBatch {
    pub accepted: Vec<WorkLog>,
    pub rejected: Vec<Rejection>,
}

/// Parses and validates an import file.
///
/// Fails if the text is not a JSON array or if no entry survives validation.
pub fn parse_import(text: &str) -> Result<ImportBatch, ImportError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(entries) = value else {
        return Err(ImportError::NotAnArray);
    };

    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for (index, entry) in entries.into_iter().enumerate() {
        match validate_entry(entry) {
            Ok(log) => accepted.push(log),
            Err(reason) => rejected.push(Rejection { index, reason }),
        }
    }

    if accepted.is_empty() {
        return Err(ImportError::NoValidEntries(rejected));
    }
    Ok(ImportBatch { accepted, rejected })
}

fn validate_entry(entry: Value) -> Result<WorkLog, RejectReason> {
    let Value::Object(mut fields) = entry else {
        return Err(RejectReason::NotAnObject);
    };

    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .into_iter()
        .filter(|name| !fields.get(*name).is_some_and(is_truthy))
        .collect();
    if !missing.is_empty() {
        return Err(RejectReason::MissingFields(missing));
    }

    default_updated_at(&mut fields);
    let log: WorkLog = serde_json::from_value(Value::Object(fields))
        .map_err(|e| RejectReason::Malformed(e.to_string()))?;

    if log.updated_at < log.created_at {
        return Err(RejectReason::Malformed(
            "updatedAt is earlier than createdAt".to_string(),
        ));
    }
    Ok(log)
}

// Older exports may lack `updatedAt`; treat such entries as never edited.
fn default_updated_at(fields: &mut Map<String, Value>) {
    if fields.get("updatedAt").is_none_or(Value::is_null)
        && let Some(created_at) = fields.get("createdAt").cloned()
    {
        fields.insert("updatedAt".to_string(), created_at);
    }
}

/// JSON truthiness: `null`, `false`, `0`, and `""` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
