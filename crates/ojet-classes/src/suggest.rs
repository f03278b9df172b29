//! Suggestion Engine
//!
//! Turns a line prefix into the list of classes to offer:
//!
//! ```text
//! line prefix
//!     |
//!     v
//! ContextDetector ---- not in a class value ----> []
//!     |
//!     v
//! existing classes + partial token
//!     |
//!     v
//! registry prefix match, minus existing
//!     |
//!     v
//! ValidationRules::filter
//!     |
//!     v
//! suggestions (registry order)
//! ```
//!
//! Results are not ranked. They come out in registry load order, and calling
//! the engine twice with the same input gives the same output.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::context::{ContextDetector, ContextPolicy};
use crate::docs::{completion_documentation, hover_documentation};
use crate::extract::{classes_in_value, last_word};
use crate::registry::{ClassName, ClassNameRegistry};
use crate::rules::ValidationRules;

/// The span a completion should replace, as offsets into the line. Offsets are
/// in whatever unit the cursor was given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplaceRange {
    /// Start of the partial token.
    pub start: usize,
    /// The cursor.
    pub end: usize,
}

impl ReplaceRange {
    /// Returns the number of units replaced.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the range is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A class to offer, with its documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub label: ClassName,
    pub documentation: String,
    /// Set when a partial token is being replaced.
    pub replace_range: Option<ReplaceRange>,
}

/// Computes the candidates for a partial token.
///
/// Every registered class that starts with `last_word` and is not already in
/// `existing` qualifies (all unused classes when `last_word` is empty); the
/// validation rules then remove conflicting ones.
pub fn suggest<'r, S: AsRef<str>>(
    registry: &'r ClassNameRegistry,
    rules: &ValidationRules,
    existing: &[S],
    last_word: &str,
) -> Vec<&'r ClassName> {
    let present: FxHashSet<&str> = existing.iter().map(|s| s.as_ref()).collect();
    let candidates = registry
        .all()
        .filter(|c| c.starts_with(last_word) && !present.contains(c.as_str()));
    rules.filter(candidates, existing)
}

/// The activated completion engine: a vocabulary, a rule set and a detection
/// policy, all fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine {
    registry: ClassNameRegistry,
    rules: ValidationRules,
    detector: ContextDetector,
}

impl SuggestionEngine {
    /// Creates an engine using the strict detection policy.
    pub fn new(registry: ClassNameRegistry, rules: ValidationRules) -> Self {
        Self {
            registry,
            rules,
            detector: ContextDetector::default(),
        }
    }

    /// Replaces the detection policy.
    pub fn with_policy(mut self, policy: ContextPolicy) -> Self {
        self.detector = ContextDetector::new(policy);
        self
    }

    /// Returns the vocabulary.
    pub fn registry(&self) -> &ClassNameRegistry {
        &self.registry
    }

    /// Returns the rule set.
    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Returns the detector.
    pub fn detector(&self) -> &ContextDetector {
        &self.detector
    }

    /// See [`suggest`].
    pub fn suggest<S: AsRef<str>>(&self, existing: &[S], last_word: &str) -> Vec<&ClassName> {
        suggest(&self.registry, &self.rules, existing, last_word)
    }

    /// Runs the whole pipeline for a cursor at the end of `line_prefix`.
    ///
    /// `cursor` is the cursor offset in the host's units. The partial token is
    /// ASCII, so its length is the same in bytes, chars and UTF-16 units.
    pub fn complete(&self, line_prefix: &str, cursor: usize) -> Vec<Suggestion> {
        let Some(context) = self.detector.detect(line_prefix) else {
            return Vec::new();
        };

        let existing = context
            .open_value()
            .map(|open| classes_in_value(open.value))
            .unwrap_or_default();
        let word = last_word(line_prefix);

        debug!(
            "Class context ({:?}): existing={:?}, partial={:?}",
            context.open_value().map(|open| open.convention),
            existing,
            word
        );

        let range = (!word.is_empty()).then(|| ReplaceRange {
            start: cursor.saturating_sub(word.len()),
            end: cursor,
        });

        self.suggest(&existing, word)
            .into_iter()
            .map(|label| Suggestion {
                label: label.clone(),
                documentation: completion_documentation(label),
                replace_range: range.filter(|_| label.starts_with(word)),
            })
            .collect()
    }

    /// Returns hover markdown for `class_name` if it is a known class.
    pub fn documentation(&self, class_name: &str) -> Option<String> {
        self.registry
            .contains(class_name)
            .then(|| hover_documentation(class_name))
    }
}
