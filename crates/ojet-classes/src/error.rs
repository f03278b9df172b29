//! Errors raised while loading the class vocabulary and exclusion rules.
//!
//! These only surface through the `try_*` constructors. The soft loaders log
//! them and fall back to an empty (or built-in) value.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for vocabulary loading
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type for rule-set loading
pub type RuleResult<T> = Result<T, RuleError>;

/// Errors that can occur while reading the class-name vocabulary
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The backing file could not be read
    #[error("IO error reading {}: {1}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    /// The data is not valid JSON
    #[error("malformed class list: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON root is not an array of strings
    #[error("class list must be a JSON array of strings, found {0}")]
    Shape(&'static str),
}

/// Errors that can occur while reading an exclusion rule set
#[derive(Debug, Error)]
pub enum RuleError {
    /// The rule file could not be read
    #[error("IO error reading {}: {1}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    /// The rule file is not valid JSON
    #[error("malformed rule set: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON root is not an array of string arrays
    #[error("rule set must be a JSON array of string arrays, found {0}")]
    Shape(&'static str),

    /// A group cannot exclude anything with fewer than two members
    #[error("exclusion group {index} has {len} distinct member(s), need at least 2")]
    GroupTooSmall { index: usize, len: usize },
}

/// Names the JSON type of a value for shape errors.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
