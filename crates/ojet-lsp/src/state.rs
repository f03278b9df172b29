//! Server State Management
//!
//! Centralized state for the language server: open documents, configuration,
//! workspace folders and, once the project has been detected, the completion
//! engine.
//!
//! # Architecture
//!
//! The state is shared between async tasks:
//!
//! - **Documents**: thread-safe storage using `DashMap`
//! - **Configuration**: read once from `initializationOptions`
//! - **Engine**: installed once on activation, read-only afterwards. While it
//!   is absent the server is dormant and answers every query with nothing.

use dashmap::DashMap;
use ojet_classes::{ContextPolicy, SuggestionEngine};
use ropey::{Rope, RopeSlice};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_lsp::lsp_types::*;
use tracing::warn;

use crate::language::DocumentKind;
use crate::project::DEFAULT_PROJECT_MARKER;

/// A stored document with its content and metadata.
#[derive(Debug, Clone)]
pub struct Document {
    /// The document URI.
    pub uri: Url,

    /// The document content as a rope for efficient editing.
    pub content: Rope,

    /// The document version from the client.
    pub version: i32,

    /// The language ID reported by the client.
    pub language_id: String,

    /// The supported kind, if the language is one the server serves.
    pub kind: Option<DocumentKind>,
}

impl Document {
    /// Creates a new document from the given parameters.
    pub fn new(uri: Url, content: String, version: i32, language_id: String) -> Self {
        let kind = DocumentKind::from_language_id(&language_id);
        Self {
            uri,
            content: Rope::from_str(&content),
            version,
            language_id,
            kind,
        }
    }

    /// Returns the document content as a string.
    pub fn text(&self) -> String {
        self.content.to_string()
    }

    /// Returns true if completion and hover apply to this document.
    pub fn is_served(&self) -> bool {
        self.kind.is_some() && self.uri.scheme() == "file"
    }

    /// Returns the text of a line without its line ending.
    pub fn line_text(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.content.len_lines() {
            return None;
        }
        let line = self.content.line(line_idx);
        Some(line.slice(..content_len(line)).to_string())
    }

    /// Returns the text from the start of the position's line up to the
    /// position.
    pub fn line_prefix(&self, position: Position) -> Option<String> {
        let cursor = self.position_to_char(position)?;
        let line_start = self.content.line_to_char(position.line as usize);
        Some(self.content.slice(line_start..cursor).to_string())
    }

    /// Converts an LSP position (UTF-16 columns) to a char index. Columns past
    /// the end of the line are clamped to it.
    fn position_to_char(&self, position: Position) -> Option<usize> {
        let line_idx = position.line as usize;
        if line_idx >= self.content.len_lines() {
            return None;
        }

        let line_start = self.content.line_to_char(line_idx);
        let line_end = line_start + content_len(self.content.line(line_idx));

        let start_cu = self.content.char_to_utf16_cu(line_start);
        let end_cu = self.content.char_to_utf16_cu(line_end);
        let target_cu = (start_cu + position.character as usize).min(end_cu);

        Some(self.content.utf16_cu_to_char(target_cu))
    }

    /// Converts an LSP position to a byte offset.
    pub fn position_to_offset(&self, position: Position) -> Option<usize> {
        self.position_to_char(position)
            .map(|char_idx| self.content.char_to_byte(char_idx))
    }

    /// Applies incremental text changes to the document.
    pub fn apply_changes(&mut self, changes: Vec<TextDocumentContentChangeEvent>, version: i32) {
        for change in changes {
            if let Some(range) = change.range {
                // Incremental change
                let start = self.position_to_char(range.start);
                let end = self.position_to_char(range.end);

                if let (Some(start), Some(end)) = (start, end) {
                    self.content.remove(start..end.max(start));
                    self.content.insert(start, &change.text);
                }
            } else {
                // Full document replacement
                self.content = Rope::from_str(&change.text);
            }
        }

        self.version = version;
    }
}

/// Length of a line in chars, excluding its line ending.
fn content_len(line: RopeSlice<'_>) -> usize {
    let mut len = line.len_chars();
    for _ in 0..2 {
        if len > 0 && matches!(line.char(len - 1), '\n' | '\r') {
            len -= 1;
        }
    }
    len
}

/// Server configuration settings, read from `initializationOptions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    /// Context detection policy: "strict" or "loose".
    pub context_policy: String,

    /// JSON class list to load instead of the bundled one.
    pub classes_path: Option<PathBuf>,

    /// JSON exclusion rules to load instead of the built-in set.
    pub rules_path: Option<PathBuf>,

    /// Maximum completion items to return.
    pub max_completion_items: usize,

    /// File whose presence at a workspace root activates the server.
    pub project_marker: String,

    /// Stay dormant unless the project marker is found.
    pub require_project_marker: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            context_policy: ContextPolicy::Strict.to_string(),
            classes_path: None,
            rules_path: None,
            max_completion_items: 500,
            project_marker: DEFAULT_PROJECT_MARKER.to_string(),
            require_project_marker: true,
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from `initializationOptions`. Unknown or
    /// malformed options fall back to the defaults.
    pub fn from_initialization_options(options: Option<serde_json::Value>) -> Self {
        let Some(options) = options else {
            return Self::default();
        };

        match serde_json::from_value(options) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed initialization options: {}", e);
                Self::default()
            }
        }
    }

    /// Returns the context detection policy.
    pub fn policy(&self) -> ContextPolicy {
        self.context_policy.parse().unwrap_or_else(|e| {
            warn!("{}, using strict", e);
            ContextPolicy::Strict
        })
    }
}

/// The server state containing all runtime data.
///
/// This struct is designed to be wrapped in an `Arc` for shared access
/// across async tasks.
pub struct ServerState {
    /// Open documents, keyed by URI.
    documents: DashMap<Url, Document>,

    /// Server configuration.
    config: parking_lot::RwLock<ServerConfig>,

    /// Whether the server has been initialized.
    initialized: AtomicBool,

    /// Workspace folders.
    workspace_folders: parking_lot::RwLock<Vec<WorkspaceFolder>>,

    /// The completion engine; `None` while dormant.
    engine: parking_lot::RwLock<Option<Arc<SuggestionEngine>>>,
}

impl ServerState {
    /// Creates a new server state.
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
            config: parking_lot::RwLock::new(ServerConfig::default()),
            initialized: AtomicBool::new(false),
            workspace_folders: parking_lot::RwLock::new(Vec::new()),
            engine: parking_lot::RwLock::new(None),
        }
    }

    /// Marks the server as initialized.
    pub fn set_initialized(&self, initialized: bool) {
        self.initialized.store(initialized, Ordering::SeqCst);
    }

    /// Returns whether the server has been initialized.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Sets the workspace folders.
    pub fn set_workspace_folders(&self, folders: Vec<WorkspaceFolder>) {
        *self.workspace_folders.write() = folders;
    }

    /// Returns the workspace folders.
    pub fn workspace_folders(&self) -> Vec<WorkspaceFolder> {
        self.workspace_folders.read().clone()
    }

    /// Installs the completion engine, leaving the dormant state.
    pub fn activate(&self, engine: SuggestionEngine) {
        *self.engine.write() = Some(Arc::new(engine));
    }

    /// Returns the completion engine, or `None` while dormant.
    pub fn engine(&self) -> Option<Arc<SuggestionEngine>> {
        self.engine.read().clone()
    }

    /// Opens a document and stores it.
    pub fn open_document(&self, uri: Url, text: String, version: i32, language_id: String) {
        let doc = Document::new(uri.clone(), text, version, language_id);
        self.documents.insert(uri, doc);
    }

    /// Updates a document with incremental changes.
    pub fn update_document(
        &self,
        uri: &Url,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> bool {
        if let Some(mut doc) = self.documents.get_mut(uri) {
            doc.apply_changes(changes, version);
            true
        } else {
            false
        }
    }

    /// Closes a document and removes it from storage.
    pub fn close_document(&self, uri: &Url) -> Option<Document> {
        self.documents.remove(uri).map(|(_, doc)| doc)
    }

    /// Gets a document by URI.
    pub fn get_document(&self, uri: &Url) -> Option<Document> {
        self.documents.get(uri).map(|r| r.clone())
    }

    /// Returns the number of open documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Gets the current configuration.
    pub fn config(&self) -> ServerConfig {
        self.config.read().clone()
    }

    /// Updates the configuration.
    pub fn update_config(&self, config: ServerConfig) {
        *self.config.write() = config;
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
