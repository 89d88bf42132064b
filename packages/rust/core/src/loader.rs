//! Batch input loading.
//!
//! Reads the raw batch — an ordered JSON array of untyped records — from
//! disk and enforces only its outer shape: valid JSON, an array, every
//! element an object, at least one element. Field-level constraints are
//! the validator's job.

use std::path::Path;

use serde_json::{Map, Value};

use termsync_shared::{Result, TermSyncError};

/// An untyped input record, exactly as read from the batch file.
///
/// Ephemeral: raw records exist only until validation and are never
/// carried into the reconciliation phase.
pub type RawRecord = Map<String, Value>;

/// Read and parse a batch file into raw records.
pub fn load_batch(path: &Path) -> Result<Vec<RawRecord>> {
    let content = std::fs::read_to_string(path).map_err(|e| TermSyncError::io(path, e))?;
    parse_batch(&content)
}

/// Parse batch content into raw records.
pub fn parse_batch(content: &str) -> Result<Vec<RawRecord>> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| TermSyncError::input(format!("batch is not valid JSON: {e}")))?;

    let Value::Array(items) = value else {
        return Err(TermSyncError::input(format!(
            "batch must be a JSON array of records (found {})",
            json_type_name(&value)
        )));
    };

    if items.is_empty() {
        return Err(TermSyncError::input("batch contains no records"));
    }

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok(map),
            other => Err(TermSyncError::input(format!(
                "record {} is not an object (found {})",
                i + 1,
                json_type_name(&other)
            ))),
        })
        .collect()
}

/// Human-readable JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
