//! Text Document Synchronization Handlers
//!
//! This module handles document lifecycle events:
//!
//! - `didOpen`: Document opened in the editor
//! - `didChange`: Document content changed
//! - `didSave`: Document saved to disk
//! - `didClose`: Document closed in the editor
//!
//! These keep the in-memory document store current so that each completion
//! or hover request can read the line under the cursor.

use tower_lsp::lsp_types::*;
use tracing::{debug, info, warn};

use crate::OjetLanguageServer;

/// Handles the `textDocument/didOpen` notification.
pub async fn handle_did_open(server: &OjetLanguageServer, params: DidOpenTextDocumentParams) {
    let uri = params.text_document.uri;
    let version = params.text_document.version;
    let language_id = params.text_document.language_id;
    let text = params.text_document.text;

    info!("Document opened: {}", uri);
    debug!(
        "Document version: {}, language: {}, length: {} bytes",
        version,
        language_id,
        text.len()
    );

    server.state().open_document(uri, text, version, language_id);
}

/// Handles the `textDocument/didChange` notification.
pub async fn handle_did_change(server: &OjetLanguageServer, params: DidChangeTextDocumentParams) {
    let uri = params.text_document.uri;
    let version = params.text_document.version;

    debug!("Document changed: {} (version {})", uri, version);

    let updated = server
        .state()
        .update_document(&uri, params.content_changes, version);

    if !updated {
        warn!("Received change for unknown document: {}", uri);
    }
}

/// Handles the `textDocument/didSave` notification.
///
/// When the client includes the saved text, the stored copy is replaced if it
/// drifted.
pub async fn handle_did_save(server: &OjetLanguageServer, params: DidSaveTextDocumentParams) {
    let uri = params.text_document.uri;

    debug!("Document saved: {}", uri);

    let Some(text) = params.text else {
        return;
    };

    if let Some(doc) = server.state().get_document(&uri) {
        if doc.text() != text {
            debug!("Syncing document content from save");
            let changes = vec![TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text,
            }];
            server.state().update_document(&uri, changes, doc.version + 1);
        }
    }
}

/// Handles the `textDocument/didClose` notification.
pub async fn handle_did_close(server: &OjetLanguageServer, params: DidCloseTextDocumentParams) {
    let uri = params.text_document.uri;

    info!("Document closed: {}", uri);

    if server.state().close_document(&uri).is_none() {
        warn!("Closed document was not in store: {}", uri);
    }
}
