//! Validation Rules
//!
//! Mutually exclusive class groups. Once any member of a group is present in
//! the value, the other members stop being suggested.
//!
//! Groups are independent: the exclusions of every triggered group are
//! unioned, so a candidate removed by one group is not brought back by
//! another. Members that are already present are never removed.

use indexmap::IndexSet;
use rustc_hash::{FxHashSet, FxHasher};
use std::fs;
use std::hash::BuildHasherDefault;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{json_kind, RuleError, RuleResult};
use crate::registry::ClassName;

type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;

/// Responsive breakpoints used by the built-in JET groups.
const BREAKPOINTS: [&str; 4] = ["sm", "md", "lg", "xl"];

/// A set of classes of which at most one should be chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionGroup {
    members: FxIndexSet<ClassName>,
}

impl ExclusionGroup {
    /// Creates a group. Returns `None` when fewer than two distinct members
    /// are given, since such a group can never exclude anything.
    pub fn new<I, S>(members: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let members: FxIndexSet<ClassName> = members
            .into_iter()
            .map(|m| ClassName::new(m.as_ref()))
            .collect();
        (members.len() >= 2).then_some(Self { members })
    }

    /// Returns true if `name` belongs to this group.
    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    /// Iterates the members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = &ClassName> + '_ {
        self.members.iter()
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false; groups hold at least two members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// An ordered, immutable list of exclusion groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationRules {
    groups: Vec<ExclusionGroup>,
}

impl ValidationRules {
    /// Creates a rule set from the given groups.
    pub fn new(groups: Vec<ExclusionGroup>) -> Self {
        Self { groups }
    }

    /// A rule set that excludes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// The built-in rule set for Oracle JET utility classes.
    ///
    /// Covers the responsive flex containers and, per breakpoint, the flex
    /// direction, wrapping, item sizing, main-axis and cross-axis alignment
    /// families.
    pub fn jet_defaults() -> Self {
        let mut groups = Vec::new();

        groups.extend(ExclusionGroup::new(
            BREAKPOINTS.iter().map(|bp| format!("oj-{bp}-flex")),
        ));

        for bp in BREAKPOINTS {
            let families: [(&str, &[&str]); 5] = [
                ("flex-direction", &["column", "row"]),
                ("flex-wrap", &["", "nowrap"]),
                ("flex-items", &["initial", "1"]),
                (
                    "justify-content",
                    &["flex-start", "center", "flex-end", "space-between", "space-around"],
                ),
                (
                    "align-items",
                    &["flex-start", "center", "flex-end", "baseline", "stretch"],
                ),
            ];

            for (family, values) in families {
                groups.extend(ExclusionGroup::new(values.iter().map(|value| {
                    if value.is_empty() {
                        format!("oj-{bp}-{family}")
                    } else {
                        format!("oj-{bp}-{family}-{value}")
                    }
                })));
            }
        }

        Self::new(groups)
    }

    /// Loads a rule set from a JSON file, falling back to
    /// [`ValidationRules::jet_defaults`] when the file cannot be used.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(rules) => {
                info!("Loaded {} exclusion groups from {}", rules.len(), path.display());
                rules
            }
            Err(e) => {
                warn!("Failed to load exclusion rules, using built-in set: {}", e);
                Self::jet_defaults()
            }
        }
    }

    /// Loads a rule set from a JSON file.
    pub fn try_load(path: impl AsRef<Path>) -> RuleResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| RuleError::Io(path.to_path_buf(), e))?;
        Self::try_from_json_str(&text)
    }

    /// Parses a JSON document whose root is an array of string arrays, one
    /// array per group.
    pub fn try_from_json_str(json: &str) -> RuleResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let items = match value {
            serde_json::Value::Array(items) => items,
            other => return Err(RuleError::Shape(json_kind(&other))),
        };

        let mut groups = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let members = match item {
                serde_json::Value::Array(members) => members,
                other => return Err(RuleError::Shape(json_kind(other))),
            };

            let mut names = Vec::with_capacity(members.len());
            for member in members {
                match member {
                    serde_json::Value::String(name) => names.push(name.as_str()),
                    other => return Err(RuleError::Shape(json_kind(other))),
                }
            }

            let distinct = names.iter().collect::<FxHashSet<_>>().len();
            let group = ExclusionGroup::new(names)
                .ok_or(RuleError::GroupTooSmall { index, len: distinct })?;
            groups.push(group);
        }

        Ok(Self::new(groups))
    }

    /// Returns the groups in declaration order.
    pub fn groups(&self) -> &[ExclusionGroup] {
        &self.groups
    }

    /// Returns the number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns every class ruled out by the classes already present.
    pub fn excluded<'r>(&'r self, present: &FxHashSet<&str>) -> FxHashSet<&'r str> {
        let mut excluded = FxHashSet::default();
        for group in &self.groups {
            if !group.members().any(|m| present.contains(m.as_str())) {
                continue;
            }
            excluded.extend(
                group
                    .members()
                    .map(|m| m.as_str())
                    .filter(|m| !present.contains(m)),
            );
        }
        excluded
    }

    /// Removes candidates that conflict with the existing classes, keeping the
    /// order of the remaining candidates.
    pub fn filter<T, S>(&self, candidates: T, existing: &[S]) -> Vec<T::Item>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        S: AsRef<str>,
    {
        let present: FxHashSet<&str> = existing.iter().map(|s| s.as_ref()).collect();
        let excluded = self.excluded(&present);
        candidates
            .into_iter()
            .filter(|c| !excluded.contains(c.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rules(groups: &[&[&str]]) -> ValidationRules {
        ValidationRules::new(
            groups
                .iter()
                .map(|g| ExclusionGroup::new(g.iter()).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_group_needs_two_members() {
        assert!(ExclusionGroup::new(["a"]).is_none());
        assert!(ExclusionGroup::new(["a", "a"]).is_none());
        assert_eq!(ExclusionGroup::new(["a", "b"]).unwrap().len(), 2);
    }

    #[test]
    fn test_filter_removes_other_members() {
        let rules = rules(&[&["oj-sm-flex", "oj-md-flex", "oj-lg-flex"]]);
        let filtered = rules.filter(
            vec!["oj-md-flex", "oj-lg-flex", "oj-sm-padding-1x"],
            &["oj-sm-flex"],
        );
        assert_eq!(filtered, vec!["oj-sm-padding-1x"]);
    }

    #[test]
    fn test_filter_keeps_present_members() {
        let rules = rules(&[&["a", "b", "c"]]);
        let filtered = rules.filter(vec!["a", "b", "c"], &["a", "b"]);
        assert_eq!(filtered, vec!["a", "b"]);
    }

    #[test]
    fn test_untriggered_group_excludes_nothing() {
        let rules = rules(&[&["a", "b"]]);
        let filtered = rules.filter(vec!["a", "b", "c"], &["c"]);
        assert_eq!(filtered, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_exclusion_cannot_be_rescued_by_other_group() {
        // "b" is excluded by the first group; the second group is not
        // triggered and cannot bring it back.
        let rules = rules(&[&["a", "b"], &["b", "c"]]);
        let filtered = rules.filter(vec!["b", "c", "d"], &["a"]);
        assert_eq!(filtered, vec!["c", "d"]);
    }

    #[test]
    fn test_filter_preserves_order() {
        let rules = rules(&[&["x", "y"]]);
        let filtered = rules.filter(vec!["d", "y", "c", "b"], &["x"]);
        assert_eq!(filtered, vec!["d", "c", "b"]);
    }

    #[test]
    fn test_jet_defaults() {
        let rules = ValidationRules::jet_defaults();
        assert!(!rules.is_empty());
        assert!(rules.groups()[0].contains("oj-sm-flex"));
        assert!(rules.groups()[0].contains("oj-xl-flex"));

        let filtered = rules.filter(
            vec!["oj-md-justify-content-center", "oj-md-justify-content-flex-end", "oj-sm-flex-wrap"],
            &["oj-md-justify-content-space-between"],
        );
        assert_eq!(filtered, vec!["oj-sm-flex-wrap"]);

        let filtered = rules.filter(vec!["oj-sm-flex-wrap"], &["oj-sm-flex-wrap-nowrap"]);
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_parse_rule_file() {
        let rules = ValidationRules::try_from_json_str(r#"[["a", "b"], ["c", "d", "e"]]"#).unwrap();
        assert_eq!(rules.len(), 2);
        assert!(rules.groups()[1].contains("e"));
    }

    #[test]
    fn test_parse_rejects_small_group() {
        let err = ValidationRules::try_from_json_str(r#"[["a", "b"], ["c"]]"#).unwrap_err();
        assert!(matches!(err, RuleError::GroupTooSmall { index: 1, len: 1 }));
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(matches!(
            ValidationRules::try_from_json_str(r#"["a", "b"]"#),
            Err(RuleError::Shape("a string"))
        ));
        assert!(matches!(
            ValidationRules::try_from_json_str(r#"[["a", 1]]"#),
            Err(RuleError::Shape("a number"))
        ));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let rules = ValidationRules::load_or_default(dir.path().join("rules.json"));
        assert_eq!(rules, ValidationRules::jet_defaults());
    }
}
