//! Class documentation lookup.
//!
//! Picks a canned explanation by matching substrings of the class name. This
//! is a stand-in for a real per-class documentation table and does not try to
//! be exhaustive.

/// Explanations keyed by a substring of the class name. The first needle found
/// in the name wins, so more specific needles come first.
const EXPLANATIONS: &[(&str, &str)] = &[
    ("flex-direction", "Sets the direction in which flex items are laid out."),
    ("justify-content", "Aligns flex items along the main axis of the container."),
    ("align-items", "Aligns flex items along the cross axis of the container."),
    ("flex-wrap", "Controls whether flex items wrap onto multiple lines."),
    ("flex-item", "Controls how a flex item grows and shrinks."),
    ("flex", "Makes the element a flex container for its children."),
    ("padding", "Adds padding inside the element using the theme spacing scale."),
    ("margin", "Adds margin around the element using the theme spacing scale."),
    ("bg", "Sets the background color from the theme palette."),
    ("text-color", "Sets the text color from the theme palette."),
    ("typography", "Applies a theme typography preset."),
    ("border", "Adds a border using the theme border tokens."),
    ("hide", "Hides the element at the matching screen sizes."),
];

/// Screen-size prefixes and the breakpoint they start at.
const BREAKPOINTS: &[(&str, &str)] = &[
    ("oj-sm-", "small"),
    ("oj-md-", "medium"),
    ("oj-lg-", "large"),
    ("oj-xl-", "extra large"),
];

/// Returns the explanation for `class_name`, or an empty string when nothing
/// is known about it.
pub fn documentation_for(class_name: &str) -> String {
    let Some((_, explanation)) = EXPLANATIONS
        .iter()
        .find(|(needle, _)| class_name.contains(needle))
    else {
        return String::new();
    };

    match BREAKPOINTS
        .iter()
        .find(|(prefix, _)| class_name.starts_with(prefix))
    {
        Some((_, size)) => format!("{explanation} Applies from the {size} breakpoint up."),
        None => (*explanation).to_string(),
    }
}

/// Markdown shown next to a completion item.
pub fn completion_documentation(class_name: &str) -> String {
    let explanation = documentation_for(class_name);
    if explanation.is_empty() {
        format!("Oracle JET class: `{class_name}`")
    } else {
        format!("Oracle JET class: `{class_name}`\n\n{explanation}")
    }
}

/// Markdown shown when hovering a known class.
pub fn hover_documentation(class_name: &str) -> String {
    let explanation = documentation_for(class_name);
    if explanation.is_empty() {
        format!("**`{class_name}`**\n\nOracle JET utility class.")
    } else {
        format!("**`{class_name}`**\n\nOracle JET utility class. {explanation}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_families() {
        assert!(documentation_for("oj-flex").contains("flex container"));
        assert!(documentation_for("oj-sm-padding-2x").contains("padding"));
        assert!(documentation_for("oj-sm-margin-4x-top").contains("margin"));
        assert!(documentation_for("oj-bg-neutral-0").contains("background"));
    }

    #[test]
    fn test_specific_needle_wins() {
        assert!(documentation_for("oj-sm-flex-direction-column").contains("direction"));
        assert!(documentation_for("oj-sm-justify-content-center").contains("main axis"));
    }

    #[test]
    fn test_breakpoint_note() {
        assert!(documentation_for("oj-md-flex").contains("medium breakpoint"));
        assert!(!documentation_for("oj-flex").contains("breakpoint"));
    }

    #[test]
    fn test_unknown_class_is_empty() {
        assert_eq!(documentation_for("oj-unknown"), "");
        assert_eq!(documentation_for(""), "");
    }

    #[test]
    fn test_completion_documentation() {
        assert_eq!(completion_documentation("oj-unknown"), "Oracle JET class: `oj-unknown`");
        assert!(completion_documentation("oj-flex").starts_with("Oracle JET class: `oj-flex`\n\n"));
    }

    #[test]
    fn test_hover_documentation() {
        let hover = hover_documentation("oj-sm-padding-2x");
        assert!(hover.starts_with("**`oj-sm-padding-2x`**"));
        assert!(hover.contains("padding"));
    }
}
