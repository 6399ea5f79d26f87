//! Lenient accessors over TOML documents.
//!
//! Walker configs have no enforced schema. Every accessor here degrades a
//! missing or wrongly-typed member to an empty container instead of failing.

use std::path::Path;
use toml::{Table, Value};
use tracing::warn;

/// Borrow `value` as a sequence, or an empty slice if it is absent or not an array.
pub fn sequence(value: Option<&Value>) -> &[Value] {
    match value {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    }
}

/// Borrow `value` as a table if it is one.
pub fn table(value: Option<&Value>) -> Option<&Table> {
    value.and_then(Value::as_table)
}

/// Non-empty string field of a table record.
pub fn string_field<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record
        .as_table()?
        .get(key)?
        .as_str()
        .filter(|s| !s.is_empty())
}

/// Parse TOML text into a document.
///
/// Blank input is an empty document; unparseable input is logged and also
/// treated as empty.
pub fn parse_lenient(content: &str, origin: &Path) -> Table {
    if content.trim().is_empty() {
        return Table::new();
    }
    match toml::from_str::<Table>(content) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(
                path = %origin.display(),
                error = %e,
                "Unparseable TOML document, treating as empty"
            );
            Table::new()
        }
    }
}

/// Read a TOML document from disk. Missing or unreadable files yield an empty document.
pub fn read_lenient(path: &Path) -> Table {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_lenient(&content, path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Table::new(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read TOML document");
            Table::new()
        }
    }
}
