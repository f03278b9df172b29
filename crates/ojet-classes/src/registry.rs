//! Class Name Registry
//!
//! The immutable vocabulary of known utility classes. It is built once when
//! the feature activates and shared read-only by every query afterwards.
//!
//! Membership checks are hash lookups; iteration follows load order, which is
//! the order suggestions come out in.

use indexmap::IndexSet;
use rustc_hash::FxHasher;
use smol_str::SmolStr;
use std::fs;
use std::hash::BuildHasherDefault;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{json_kind, RegistryError, RegistryResult};

/// A utility class token. Compared by exact string equality.
pub type ClassName = SmolStr;

type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;

/// The set of recognized class names, in load order.
#[derive(Debug, Clone, Default)]
pub struct ClassNameRegistry {
    names: FxIndexSet<ClassName>,
}

impl ClassNameRegistry {
    /// Creates a registry from the given names. Duplicates keep their first
    /// position; blank entries are dropped.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref();
                if name.trim().is_empty() {
                    None
                } else {
                    Some(ClassName::new(name))
                }
            })
            .collect();
        Self { names }
    }

    /// Creates an empty registry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the vocabulary from a JSON file.
    ///
    /// Never fails: a missing, unreadable or malformed file is logged and
    /// yields an empty registry.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(registry) => {
                info!("Loaded {} utility classes from {}", registry.len(), path.display());
                registry
            }
            Err(e) => {
                warn!("Failed to load utility classes: {}", e);
                Self::empty()
            }
        }
    }

    /// Parses the vocabulary from JSON text, degrading to an empty registry
    /// on malformed input.
    pub fn from_json_str(json: &str) -> Self {
        match Self::try_from_json_str(json) {
            Ok(registry) => registry,
            Err(e) => {
                warn!("Failed to parse utility classes: {}", e);
                Self::empty()
            }
        }
    }

    /// Loads the vocabulary from a JSON file, reporting why it failed.
    pub fn try_load(path: impl AsRef<Path>) -> RegistryResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| RegistryError::Io(path.to_path_buf(), e))?;
        Self::try_from_json_str(&text)
    }

    /// Parses a JSON document whose root is an array of strings.
    pub fn try_from_json_str(json: &str) -> RegistryResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let items = match value {
            serde_json::Value::Array(items) => items,
            other => return Err(RegistryError::Shape(json_kind(&other))),
        };

        let mut names = Vec::with_capacity(items.len());
        for item in &items {
            match item {
                serde_json::Value::String(name) => names.push(name.as_str()),
                other => return Err(RegistryError::Shape(json_kind(other))),
            }
        }

        let registry = Self::new(names);
        if registry.len() != items.len() {
            debug!(
                "Dropped {} duplicate or blank class names",
                items.len() - registry.len()
            );
        }
        Ok(registry)
    }

    /// Returns true if `name` is a known class.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Iterates every known class in load order. The iterator can be
    /// recreated any number of times.
    pub fn all(&self) -> impl Iterator<Item = &ClassName> + '_ {
        self.names.iter()
    }

    /// Returns the number of known classes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no classes are known.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ClassNameRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
