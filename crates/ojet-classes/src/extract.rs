//! Class Extraction
//!
//! Pulls the classes already written in the open value, and the partial token
//! under the cursor, out of a line prefix.
//!
//! The value is located with the shared convention table, so the first
//! matching convention in [`crate::patterns::Convention::ALL`] order decides
//! where the value starts. Text with unbalanced quotes beyond what the table
//! recognizes gives unspecified (but never panicking) results.

use crate::patterns::find_open_value;

/// The token under the cursor and the classes written before it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extraction<'a> {
    /// Complete class tokens already present in the value, in order.
    pub existing: Vec<&'a str>,
    /// The partial token being typed; empty right after a delimiter.
    pub last_word: &'a str,
}

/// Extracts both the existing classes and the partial token.
pub fn extract(line_prefix: &str) -> Extraction<'_> {
    Extraction {
        existing: existing_classes(line_prefix),
        last_word: last_word(line_prefix),
    }
}

/// Returns the maximal trailing run of `[A-Za-z0-9_-]` characters.
pub fn last_word(line_prefix: &str) -> &str {
    let start = line_prefix
        .bytes()
        .rposition(|b| !is_class_byte(b))
        .map_or(0, |i| i + 1);
    &line_prefix[start..]
}

/// Returns the class tokens already written in the open value.
///
/// The token touching the cursor is still being typed, so it is not counted
/// as existing: `class="oj-flex oj-sm-` yields `["oj-flex"]`, while
/// `class="oj-flex oj-sm-flex ` yields both. Returns an empty list when no
/// convention matches.
pub fn existing_classes(line_prefix: &str) -> Vec<&str> {
    match find_open_value(line_prefix) {
        Some(open) => classes_in_value(open.value),
        None => Vec::new(),
    }
}

/// Splits an open value into its complete class tokens, leaving out the token
/// touching the end of the value.
pub(crate) fn classes_in_value(value: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = value.split_whitespace().collect();
    if !value.ends_with(char::is_whitespace) {
        tokens.pop();
    }
    tokens
}

/// Characters that can appear in a class name token.
pub fn is_class_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_class_byte(b: u8) -> bool {
    is_class_char(b as char)
}
