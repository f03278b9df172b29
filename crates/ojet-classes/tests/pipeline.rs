use ojet_classes::{
    existing_classes, is_in_class_context, last_word, suggest, ClassNameRegistry, ExclusionGroup,
    ReplaceRange, SuggestionEngine, ValidationRules,
};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn registry() -> ClassNameRegistry {
    ClassNameRegistry::new([
        "oj-sm-flex",
        "oj-md-flex",
        "oj-lg-flex",
        "oj-sm-padding-1x",
        "oj-sm-padding-2x",
    ])
}

fn flex_rules() -> ValidationRules {
    ValidationRules::new(
        ExclusionGroup::new(["oj-sm-flex", "oj-md-flex", "oj-lg-flex"])
            .into_iter()
            .collect(),
    )
}

fn labels<T: AsRef<str>>(items: &[T]) -> Vec<&str> {
    items.iter().map(|c| c.as_ref()).collect()
}

#[test]
fn test_extraction_example() {
    let line = r#"class="oj-flex oj-sm-"#;
    assert_eq!(existing_classes(line), vec!["oj-flex"]);
    assert_eq!(last_word(line), "oj-sm-");
}

#[test]
fn test_context_examples() {
    assert!(is_in_class_context(r#"<div class="oj-"#));
    assert!(!is_in_class_context(r#"import { class } from "x""#));
}

#[test]
fn test_exclusion_scenario_without_partial() {
    let registry = registry();
    let suggestions = suggest(&registry, &flex_rules(), &["oj-sm-flex"], "");
    assert_eq!(labels(&suggestions), vec!["oj-sm-padding-1x", "oj-sm-padding-2x"]);
}

#[test]
fn test_exclusion_scenario_with_partial() {
    let registry = registry();
    let suggestions = suggest(&registry, &flex_rules(), &["oj-sm-flex"], "oj-sm-p");
    assert_eq!(labels(&suggestions), vec!["oj-sm-padding-1x", "oj-sm-padding-2x"]);
}

#[test]
fn test_every_prefix_finds_its_class() {
    let registry = registry();
    let rules = ValidationRules::none();
    let none: [&str; 0] = [];

    for class in registry.all() {
        for end in 1..=class.len() {
            let prefix = &class[..end];
            let suggestions = suggest(&registry, &rules, &none, prefix);
            assert!(
                suggestions.iter().any(|s| *s == class),
                "{class} missing for prefix {prefix}"
            );
        }
    }
}

#[test]
fn test_existing_classes_never_resuggested() {
    let registry = registry();
    let existing = ["oj-sm-padding-1x", "oj-lg-flex"];
    for word in ["", "oj", "oj-sm-", "oj-lg-flex"] {
        let suggestions = suggest(&registry, &ValidationRules::none(), &existing, word);
        for class in &existing {
            assert!(!labels(&suggestions).contains(class), "{class} re-suggested for {word:?}");
        }
    }
}

#[test]
fn test_exclusion_group_law() {
    let registry = registry();
    let rules = flex_rules();
    for present in ["oj-sm-flex", "oj-md-flex", "oj-lg-flex"] {
        let suggestions = suggest(&registry, &rules, &[present], "");
        let labels = labels(&suggestions);
        for member in ["oj-sm-flex", "oj-md-flex", "oj-lg-flex"] {
            assert!(!labels.contains(&member), "{member} offered next to {present}");
        }
    }
}

#[test]
fn test_engine_is_idempotent() {
    let engine = SuggestionEngine::new(registry(), flex_rules());
    let line = r#"<div class="oj-sm-flex oj-"#;
    assert_eq!(engine.complete(line, line.len()), engine.complete(line, line.len()));
}

#[test]
fn test_replace_range_law() {
    let engine = SuggestionEngine::new(registry(), flex_rules());
    // The cursor is given in UTF-16 units; the accented title shifts it away
    // from the byte length.
    let line = r#"<div title="é" className="oj-sm-pa"#;
    let cursor = line.encode_utf16().count();
    let suggestions = engine.complete(line, cursor);

    assert_eq!(suggestions.len(), 2);
    for suggestion in &suggestions {
        let range = suggestion.replace_range.unwrap();
        assert_eq!(range, ReplaceRange { start: cursor - "oj-sm-pa".len(), end: cursor });
        assert_eq!(range.len(), "oj-sm-pa".len());
    }
}

#[test]
fn test_full_pipeline_across_conventions() {
    let engine = SuggestionEngine::new(registry(), flex_rules());
    let lines = [
        r#"<div class="oj-sm-flex "#,
        "<div class='oj-sm-flex ",
        r#"<div className="oj-sm-flex "#,
        "<div className={`oj-sm-flex ",
        r#"el.classList.add("oj-sm-flex "#,
        r#"el.className = "oj-sm-flex "#,
        r#"classNames("oj-sm-flex "#,
    ];

    for line in lines {
        let suggestions = engine.complete(line, line.len());
        let labels: Vec<&str> = suggestions.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["oj-sm-padding-1x", "oj-sm-padding-2x"], "line: {line}");
    }
}

#[test]
fn test_vocabulary_and_rules_from_disk() {
    let dir = TempDir::new().unwrap();
    let classes = dir.path().join("utility-ojet.json");
    let rules = dir.path().join("rules.json");
    fs::write(&classes, r#"["oj-flex", "oj-flex-item", "oj-sm-flex"]"#).unwrap();
    fs::write(&rules, r#"[["oj-flex", "oj-sm-flex"]]"#).unwrap();

    let engine = SuggestionEngine::new(
        ClassNameRegistry::load(&classes),
        ValidationRules::load_or_default(&rules),
    );

    let line = r#"<div class="oj-flex oj-"#;
    let suggestions = engine.complete(line, line.len());
    let labels: Vec<&str> = suggestions.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["oj-flex-item"]);
}

#[test]
fn test_missing_vocabulary_yields_no_suggestions() {
    let dir = TempDir::new().unwrap();
    let engine = SuggestionEngine::new(
        ClassNameRegistry::load(dir.path().join("missing.json")),
        ValidationRules::jet_defaults(),
    );
    assert!(engine.complete(r#"<div class=""#, 12).is_empty());
}
