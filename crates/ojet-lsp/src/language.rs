//! Supported Document Kinds
//!
//! Completion and hover are only offered in markup and script documents. The
//! server never looks at a document's kind beyond this filter.

use std::fmt;

/// A document kind the server serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Plain markup.
    Html,
    /// Script.
    JavaScript,
    /// Typed script.
    TypeScript,
    /// Script with embedded markup.
    JavaScriptReact,
    /// Typed script with embedded markup.
    TypeScriptReact,
}

impl DocumentKind {
    /// Every supported kind.
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::Html,
        DocumentKind::JavaScript,
        DocumentKind::TypeScript,
        DocumentKind::JavaScriptReact,
        DocumentKind::TypeScriptReact,
    ];

    /// Maps an LSP `languageId` to a supported kind.
    pub fn from_language_id(language_id: &str) -> Option<Self> {
        match language_id {
            "html" => Some(DocumentKind::Html),
            "javascript" => Some(DocumentKind::JavaScript),
            "typescript" => Some(DocumentKind::TypeScript),
            "javascriptreact" => Some(DocumentKind::JavaScriptReact),
            "typescriptreact" => Some(DocumentKind::TypeScriptReact),
            _ => None,
        }
    }

    /// Returns the LSP `languageId` for this kind.
    pub fn language_id(self) -> &'static str {
        match self {
            DocumentKind::Html => "html",
            DocumentKind::JavaScript => "javascript",
            DocumentKind::TypeScript => "typescript",
            DocumentKind::JavaScriptReact => "javascriptreact",
            DocumentKind::TypeScriptReact => "typescriptreact",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.language_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_id_round_trip() {
        for kind in DocumentKind::ALL {
            assert_eq!(DocumentKind::from_language_id(kind.language_id()), Some(kind));
        }
    }

    #[test]
    fn test_unsupported_languages() {
        assert_eq!(DocumentKind::from_language_id("css"), None);
        assert_eq!(DocumentKind::from_language_id("rust"), None);
        assert_eq!(DocumentKind::from_language_id("HTML"), None);
    }
}
