//! Class Context Detection
//!
//! Decides, from the text between the start of the line and the cursor,
//! whether the cursor sits inside a class-name value.
//!
//! Two policies exist and are never mixed:
//!
//! - [`ContextPolicy::Strict`] (default): some entry of the convention table
//!   in [`crate::patterns`] matches at the end of the prefix.
//! - [`ContextPolicy::Loose`]: additionally accepts any unterminated string
//!   literal, or any prefix mentioning `class="`, `class='` or `className`.
//!
//! Under both policies, lines that start with an import keyword are rejected.

use std::fmt;
use std::str::FromStr;

use crate::patterns::{find_open_value, OpenValue};

/// Keywords that introduce module references. Lines starting with one of these
/// never offer class completions.
const IMPORT_KEYWORDS: &[&str] = &["import", "@import"];

/// Which lines count as being in a class context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContextPolicy {
    /// Only the end-anchored convention table.
    #[default]
    Strict,
    /// The convention table plus broader substring heuristics.
    Loose,
}

impl FromStr for ContextPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(ContextPolicy::Strict),
            "loose" => Ok(ContextPolicy::Loose),
            other => Err(format!("unknown context policy '{other}'")),
        }
    }
}

impl fmt::Display for ContextPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextPolicy::Strict => f.write_str("strict"),
            ContextPolicy::Loose => f.write_str("loose"),
        }
    }
}

/// Where the cursor was found to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassContext<'a> {
    /// Inside a value opened by a known convention.
    Value(OpenValue<'a>),
    /// Accepted by the loose policy only; the value boundaries are unknown.
    Unbounded,
}

impl<'a> ClassContext<'a> {
    /// The open value, when a convention matched.
    pub fn open_value(&self) -> Option<&OpenValue<'a>> {
        match self {
            ClassContext::Value(open) => Some(open),
            ClassContext::Unbounded => None,
        }
    }
}

/// Detects class contexts under a fixed policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextDetector {
    policy: ContextPolicy,
}

impl ContextDetector {
    /// Creates a detector using the given policy.
    pub fn new(policy: ContextPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy in use.
    pub fn policy(&self) -> ContextPolicy {
        self.policy
    }

    /// Classifies the cursor position at the end of `line_prefix`.
    pub fn detect<'a>(&self, line_prefix: &'a str) -> Option<ClassContext<'a>> {
        if starts_with_import(line_prefix) {
            return None;
        }

        if let Some(open) = find_open_value(line_prefix) {
            return Some(ClassContext::Value(open));
        }

        match self.policy {
            ContextPolicy::Strict => None,
            ContextPolicy::Loose if loose_match(line_prefix) => Some(ClassContext::Unbounded),
            ContextPolicy::Loose => None,
        }
    }

    /// Returns true if the cursor sits inside a class value.
    pub fn is_in_class_context(&self, line_prefix: &str) -> bool {
        self.detect(line_prefix).is_some()
    }
}

/// Returns true if the cursor sits inside a class value, using the strict
/// policy.
pub fn is_in_class_context(line_prefix: &str) -> bool {
    ContextDetector::default().is_in_class_context(line_prefix)
}

fn starts_with_import(line_prefix: &str) -> bool {
    let trimmed = line_prefix.trim_start();
    IMPORT_KEYWORDS.iter().any(|keyword| {
        trimmed.strip_prefix(keyword).is_some_and(|rest| {
            !rest
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        })
    })
}

fn loose_match(line_prefix: &str) -> bool {
    let unterminated = ['"', '\'', '`']
        .iter()
        .any(|&quote| line_prefix.matches(quote).count() % 2 == 1);

    unterminated
        || line_prefix.contains("class=\"")
        || line_prefix.contains("class='")
        || line_prefix.contains("className")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::Convention;

    #[test]
    fn test_html_attribute_in_context() {
        assert!(is_in_class_context(r#"<div class="oj-"#));
        assert!(is_in_class_context(r#"<div class=""#));
        assert!(is_in_class_context("<div class='oj-flex "));
    }

    #[test]
    fn test_import_is_never_in_context() {
        assert!(!is_in_class_context(r#"import { class } from "x""#));
        assert!(!is_in_class_context(r#"  import x from "./class=""#));
        assert!(!is_in_class_context(r#"@import "class=""#));

        let loose = ContextDetector::new(ContextPolicy::Loose);
        assert!(!loose.is_in_class_context(r#"import { className } from "x"#));
    }

    #[test]
    fn test_import_guard_is_keyword_only() {
        // An identifier that merely starts with "import" is not a keyword.
        assert!(is_in_class_context(r#"importantEl.className = "oj-"#));
    }

    #[test]
    fn test_outside_class_value() {
        assert!(!is_in_class_context(r#"<div class="oj-flex">"#));
        assert!(!is_in_class_context(r#"<div id="main"#));
        assert!(!is_in_class_context("const x = 1;"));
        assert!(!is_in_class_context(""));
    }

    #[test]
    fn test_strict_rejects_loose_only_lines() {
        let strict = ContextDetector::default();
        assert!(!strict.is_in_class_context(r#"<div id="ma"#));
        assert!(!strict.is_in_class_context(r#"<div className={styles.root} title="x""#));
    }

    #[test]
    fn test_loose_accepts_unterminated_string() {
        let loose = ContextDetector::new(ContextPolicy::Loose);
        assert_eq!(loose.detect(r#"<div id="ma"#), Some(ClassContext::Unbounded));
        assert_eq!(
            loose.detect(r#"<div className={styles.root} title="x""#),
            Some(ClassContext::Unbounded)
        );
        assert_eq!(loose.detect("const x = 1;"), None);
    }

    #[test]
    fn test_detect_reports_convention() {
        let context = ContextDetector::default().detect(r#"<div className="oj-"#).unwrap();
        let open = context.open_value().unwrap();
        assert_eq!(open.convention, Convention::JsxDouble);
        assert_eq!(open.value, "oj-");
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("strict".parse::<ContextPolicy>(), Ok(ContextPolicy::Strict));
        assert_eq!("Loose".parse::<ContextPolicy>(), Ok(ContextPolicy::Loose));
        assert!("fuzzy".parse::<ContextPolicy>().is_err());
        assert_eq!(ContextPolicy::default().to_string(), "strict");
    }
}
