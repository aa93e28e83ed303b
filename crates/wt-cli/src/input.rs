//! History export loading.
//!
//! Reads a Takeout-style JSON export into raw records. Individual records
//! that do not fit the expected shape are dropped here; only an input that
//! is unreadable or unparseable as a whole is a hard failure.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use wt_core::RawRecord;

/// Reads and parses a history export file.
///
/// This is the single fatal error path: a missing file or structurally
/// invalid JSON aborts the run, since no partial recovery is possible.
pub fn read_history(path: &Path) -> Result<Vec<RawRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read history export: {}", path.display()))?;
    parse_history(&raw)
        .with_context(|| format!("history export is not usable: {}", path.display()))
}

/// Parses export text into raw records.
///
/// Accepts the Takeout shape (`{"Browser History": [...]}`) or a bare
/// array of records. Records that fail to deserialize individually are
/// dropped and counted, not raised.
pub fn parse_history(raw: &str) -> Result<Vec<RawRecord>> {
    let root: Value = serde_json::from_str(raw).context("invalid JSON")?;

    let items = match root {
        Value::Object(mut map) => match map.remove("Browser History") {
            Some(Value::Array(items)) => items,
            Some(_) => bail!("\"Browser History\" is not an array"),
            None => bail!("missing \"Browser History\" key"),
        },
        Value::Array(items) => items,
        _ => bail!("expected a JSON object or array at the top level"),
    };

    let total = items.len();
    let records: Vec<RawRecord> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    let malformed = total - records.len();
    if malformed > 0 {
        tracing::debug!(malformed, total, "dropped records that do not fit the export shape");
    }

    Ok(records)
}
