use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::usernames;

/// Top-level key of the "following" export shape
pub const FOLLOWING_KEY: &str = "relationships_following";

/// Per-entry list whose first item carries the username
pub const STRING_LIST_KEY: &str = "string_list_data";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid JSON structure")]
    InvalidStructure,

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// True when the failure came from the filesystem rather than the content
    pub fn is_io(&self) -> bool {
        match self {
            ExportError::Io(_) => true,
            ExportError::Csv(e) => e.is_io_error(),
            _ => false,
        }
    }
}

/// Extracts usernames from a JSON export.
///
/// Two shapes are accepted:
/// - followers: a top-level array of entries
/// - following: an object whose `relationships_following` key holds that array
///
/// Each entry contributes the `value` of the first item in its
/// `string_list_data`. Entries with no usable username there (key absent,
/// empty list, missing or empty `value`) are skipped.
pub fn extract_usernames(data: &[u8]) -> Result<Vec<String>, ExportError> {
    let document: Value = serde_json::from_slice(data)?;

    let entries = match &document {
        Value::Array(entries) => entries,
        Value::Object(map) => match map.get(FOLLOWING_KEY) {
            Some(Value::Array(entries)) => entries,
            _ => return Err(ExportError::InvalidStructure),
        },
        _ => return Err(ExportError::InvalidStructure),
    };

    let found = entries
        .iter()
        .filter_map(first_value)
        .map(str::to_string)
        .collect();

    Ok(found)
}

fn first_value(entry: &Value) -> Option<&str> {
    entry
        .get(STRING_LIST_KEY)?
        .as_array()?
        .first()?
        .get("value")?
        .as_str()
        .filter(|v| !v.is_empty())
}

/// Converts the JSON export at `path` into a headerless one-column CSV
/// written next to it (same path, `csv` extension) and returns the new path.
///
/// The source file is left in place.
pub fn convert_json_to_csv(path: &Path) -> Result<PathBuf, ExportError> {
    let data = std::fs::read(path)?;
    let found = extract_usernames(&data)?;

    let csv_path = path.with_extension("csv");
    usernames::write_csv(&csv_path, &found)?;

    tracing::debug!(
        "Extracted {} usernames from {} into {}",
        found.len(),
        path.display(),
        csv_path.display()
    );

    Ok(csv_path)
}
