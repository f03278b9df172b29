//! Oracle JET Utility Class Engine
//!
//! Decides whether a cursor sits inside a class-name value and, if so, which
//! utility classes to offer there.
//!
//! # Architecture
//!
//! Everything here is a pure function of a line prefix plus a vocabulary and a
//! rule set loaded once at startup:
//!
//! - **Patterns**: one ordered table of class-value conventions, shared by
//!   detection and extraction
//! - **Context**: is the cursor inside a class value?
//! - **Extraction**: classes already written, and the partial token
//! - **Suggestion**: prefix match against the registry, then exclusion rules
//!
//! Detection is a line-local heuristic, not a markup or script parser.
//!
//! # Modules
//!
//! - [`registry`]: the known class vocabulary
//! - [`patterns`]: class-value conventions and their precedence
//! - [`context`]: class-context detection policies
//! - [`extract`]: existing classes and partial token
//! - [`rules`]: mutually exclusive class groups
//! - [`suggest`]: the per-query pipeline
//! - [`docs`]: canned class documentation

pub mod context;
pub mod docs;
pub mod error;
pub mod extract;
pub mod patterns;
pub mod registry;
pub mod rules;
pub mod suggest;

pub use context::{is_in_class_context, ClassContext, ContextDetector, ContextPolicy};
pub use docs::documentation_for;
pub use error::{RegistryError, RuleError};
pub use extract::{existing_classes, extract, last_word, Extraction};
pub use patterns::{Convention, OpenValue};
pub use registry::{ClassName, ClassNameRegistry};
pub use rules::{ExclusionGroup, ValidationRules};
pub use suggest::{suggest, ReplaceRange, Suggestion, SuggestionEngine};
