//! Class Attribute Conventions
//!
//! The single ordered table of textual conventions that open a class-name
//! value. Context detection and class extraction both consult this table, so
//! adding a convention here teaches both at once.
//!
//! This is a line-local heuristic, not a parser. Every pattern is anchored at
//! the end of the line prefix and captures the value typed so far, from just
//! after the opening delimiter up to the cursor.
//!
//! # Precedence
//!
//! Patterns are tried in [`Convention::ALL`] order and the first match wins.
//! They are not guaranteed to be mutually exclusive: `el.className="x` is
//! matched by [`Convention::JsxDouble`] before [`Convention::ClassNameAssign`]
//! gets a chance. Both capture the same value, but callers that care about the
//! convention must rely on the order.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::error;

/// A textual convention for attaching class names to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Convention {
    /// `class="…`
    HtmlDouble,
    /// `class='…`
    HtmlSingle,
    /// `className="…`
    JsxDouble,
    /// `className='…`
    JsxSingle,
    /// ``className={`…``
    JsxTemplate,
    /// `className={"…` or `className={cond ? 'a' : '…`
    JsxExpression,
    /// `classList.add("…`, earlier complete arguments allowed
    ClassListAdd,
    /// `.className = "…`
    ClassNameAssign,
    /// `classNames("…` or `clsx('…`, earlier complete arguments allowed
    ClassNamesHelper,
}

impl Convention {
    /// Every convention, in match precedence order.
    pub const ALL: [Convention; 9] = [
        Convention::HtmlDouble,
        Convention::HtmlSingle,
        Convention::JsxDouble,
        Convention::JsxSingle,
        Convention::JsxTemplate,
        Convention::JsxExpression,
        Convention::ClassListAdd,
        Convention::ClassNameAssign,
        Convention::ClassNamesHelper,
    ];

    /// The end-anchored pattern for this convention. The value is captured by
    /// whichever capture group participates in the match.
    fn source(self) -> &'static str {
        // Shared pieces: a complete string literal, and an unterminated one
        // whose contents are captured.
        macro_rules! open_string {
            () => {
                r#"(?:"([^"]*)|'([^']*))$"#
            };
        }
        macro_rules! call_args {
            () => {
                r#"\s*\((?:[^()"']|"[^"]*"|'[^']*')*"#
            };
        }

        match self {
            Convention::HtmlDouble => r#"(?:^|[^\w-])class\s*=\s*"([^"]*)$"#,
            Convention::HtmlSingle => r#"(?:^|[^\w-])class\s*=\s*'([^']*)$"#,
            Convention::JsxDouble => r#"(?:^|[^\w-])className="([^"]*)$"#,
            Convention::JsxSingle => r#"(?:^|[^\w-])className='([^']*)$"#,
            Convention::JsxTemplate => r#"(?:^|[^\w-])className\s*=\s*\{\s*`([^`]*)$"#,
            Convention::JsxExpression => concat!(
                r#"(?:^|[^\w-])className\s*=\s*\{(?:[^{}"'`]|"[^"]*"|'[^']*')*"#,
                open_string!()
            ),
            Convention::ClassListAdd => {
                concat!(r#"\bclassList\s*\.\s*add"#, call_args!(), open_string!())
            }
            Convention::ClassNameAssign => {
                concat!(r#"\.\s*className\s*=\s*"#, open_string!())
            }
            Convention::ClassNamesHelper => {
                concat!(r#"\b(?:classNames|clsx)"#, call_args!(), open_string!())
            }
        }
    }

    /// A short human-readable name, used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Convention::HtmlDouble | Convention::HtmlSingle => "class attribute",
            Convention::JsxDouble | Convention::JsxSingle => "className attribute",
            Convention::JsxTemplate => "className template literal",
            Convention::JsxExpression => "className expression",
            Convention::ClassListAdd => "classList.add call",
            Convention::ClassNameAssign => "className assignment",
            Convention::ClassNamesHelper => "classNames helper",
        }
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A compiled table entry.
struct ClassPattern {
    convention: Convention,
    regex: Regex,
}

static PATTERNS: LazyLock<Vec<ClassPattern>> = LazyLock::new(|| {
    Convention::ALL
        .iter()
        .filter_map(|&convention| match Regex::new(convention.source()) {
            Ok(regex) => Some(ClassPattern { convention, regex }),
            Err(e) => {
                error!("Invalid pattern for {}: {}", convention, e);
                None
            }
        })
        .collect()
});

/// An unterminated class value found at the end of a line prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenValue<'a> {
    /// The convention that matched.
    pub convention: Convention,
    /// The value typed so far, from the opening delimiter to the end.
    pub value: &'a str,
    /// Byte offset in the line prefix where the value starts.
    pub start: usize,
}

/// Finds the open class value at the end of `line_prefix`, trying each
/// convention in precedence order.
pub fn find_open_value(line_prefix: &str) -> Option<OpenValue<'_>> {
    PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.regex.captures(line_prefix)?;
        let value = caps.iter().skip(1).flatten().next()?;
        Some(OpenValue {
            convention: pattern.convention,
            value: value.as_str(),
            start: value.start(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn convention_of(line: &str) -> Option<Convention> {
        find_open_value(line).map(|v| v.convention)
    }

    #[test]
    fn test_all_patterns_compile() {
        for convention in Convention::ALL {
            assert!(
                Regex::new(convention.source()).is_ok(),
                "pattern for {convention:?} does not compile"
            );
        }
        assert_eq!(PATTERNS.len(), Convention::ALL.len());
    }

    #[test]
    fn test_html_conventions() {
        assert_eq!(convention_of(r#"<div class="oj-"#), Some(Convention::HtmlDouble));
        assert_eq!(convention_of("<div class='oj-"), Some(Convention::HtmlSingle));
        assert_eq!(convention_of(r#"<div class = "oj-"#), Some(Convention::HtmlDouble));
    }

    #[test]
    fn test_jsx_conventions() {
        assert_eq!(convention_of(r#"<div className="oj-"#), Some(Convention::JsxDouble));
        assert_eq!(convention_of("<div className='oj-"), Some(Convention::JsxSingle));
        assert_eq!(convention_of("<div className={`oj-flex "), Some(Convention::JsxTemplate));
        assert_eq!(convention_of(r#"<div className={"oj-"#), Some(Convention::JsxExpression));
        assert_eq!(
            convention_of(r#"<div className={active ? "oj-flex" : "oj-"#),
            Some(Convention::JsxExpression)
        );
    }

    #[test]
    fn test_script_conventions() {
        assert_eq!(convention_of(r#"el.classList.add("oj-"#), Some(Convention::ClassListAdd));
        assert_eq!(
            convention_of(r#"el.classList.add("oj-flex", 'oj-"#),
            Some(Convention::ClassListAdd)
        );
        assert_eq!(convention_of(r#"el.className = "oj-"#), Some(Convention::ClassNameAssign));
        assert_eq!(convention_of(r#"classNames("oj-flex", { 'oj-"#), Some(Convention::ClassNamesHelper));
        assert_eq!(convention_of("clsx('oj-"), Some(Convention::ClassNamesHelper));
    }

    #[test]
    fn test_precedence_first_match_wins() {
        // Both the className attribute and the assignment form match; the
        // attribute comes first in the table.
        assert_eq!(convention_of(r#"el.className="oj-"#), Some(Convention::JsxDouble));
    }

    #[test]
    fn test_closed_values_do_not_match() {
        assert_eq!(convention_of(r#"<div class="oj-flex">"#), None);
        assert_eq!(convention_of(r#"el.classList.add("oj-flex")"#), None);
        assert_eq!(convention_of(r#"classNames("oj-flex", "#), None);
        assert_eq!(convention_of(r#"<div className={active ? "a" : "#), None);
    }

    #[test]
    fn test_prefixed_attribute_names_do_not_match() {
        assert_eq!(convention_of(r#"<oj-button data-class="x"#), None);
        assert_eq!(convention_of(r#"<Icon iconClassName="x"#), None);
    }

    #[test]
    fn test_value_offsets() {
        let line = r#"<div class="oj-flex oj-sm-"#;
        let open = find_open_value(line).unwrap();
        assert_eq!(open.value, "oj-flex oj-sm-");
        assert_eq!(open.start, line.find('"').unwrap() + 1);
        assert_eq!(&line[open.start..], open.value);
    }

    #[test]
    fn test_empty_value() {
        let open = find_open_value(r#"<div class=""#).unwrap();
        assert_eq!(open.value, "");
    }
}
