//! Completion Handler
//!
//! This module handles the `textDocument/completion` request.
//!
//! # Completion Triggers
//!
//! Completion is triggered by:
//! - ` ` - Start of the next class in a value
//! - `"` and `'` - Opening of a class value
//! - Manual invocation (Ctrl+Space)
//!
//! The line prefix up to the cursor is handed to the engine; items replace the
//! partial class name under the cursor and keep the engine's order.

use ojet_classes::Suggestion;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::debug;

use crate::state::ServerState;
use crate::OjetLanguageServer;

/// Handles the `textDocument/completion` request.
///
/// # Arguments
///
/// * `server` - The language server instance
/// * `params` - The completion parameters containing position and trigger
///
/// # Returns
///
/// A list of completion items or None if the cursor is not in a class value
pub async fn handle_completion(
    server: &OjetLanguageServer,
    params: CompletionParams,
) -> Result<Option<CompletionResponse>> {
    let uri = &params.text_document_position.text_document.uri;
    let position = params.text_document_position.position;
    let trigger = params.context.as_ref().and_then(|c| c.trigger_character.as_deref());

    debug!(
        "Completion request at {}:{}:{} (trigger: {:?})",
        uri, position.line, position.character, trigger
    );

    Ok(completion_response(server.state(), uri, position))
}

/// Computes the completion response for a position.
pub fn completion_response(
    state: &ServerState,
    uri: &Url,
    position: Position,
) -> Option<CompletionResponse> {
    let Some(engine) = state.engine() else {
        debug!("Dormant, no completions");
        return None;
    };

    let doc = match state.get_document(uri) {
        Some(doc) => doc,
        None => {
            debug!("Document not found: {}", uri);
            return None;
        }
    };

    if !doc.is_served() {
        debug!("Language {} is not served", doc.language_id);
        return None;
    }

    let prefix = doc.line_prefix(position)?;
    let cursor = prefix.encode_utf16().count();
    let suggestions = engine.complete(&prefix, cursor);

    if suggestions.is_empty() {
        return None;
    }

    let max_items = state.config().max_completion_items;
    let is_incomplete = suggestions.len() > max_items;

    let items = suggestions
        .into_iter()
        .take(max_items)
        .enumerate()
        .map(|(index, suggestion)| to_completion_item(suggestion, position.line, index))
        .collect();

    Some(CompletionResponse::List(CompletionList {
        is_incomplete,
        items,
    }))
}

/// Converts a suggestion to an LSP completion item on the given line.
fn to_completion_item(suggestion: Suggestion, line: u32, index: usize) -> CompletionItem {
    let label = suggestion.label.to_string();

    let text_edit = suggestion.replace_range.map(|range| {
        CompletionTextEdit::Edit(TextEdit {
            range: Range {
                start: Position {
                    line,
                    character: range.start as u32,
                },
                end: Position {
                    line,
                    character: range.end as u32,
                },
            },
            new_text: label.clone(),
        })
    });

    CompletionItem {
        label,
        kind: Some(CompletionItemKind::VALUE),
        documentation: Some(Documentation::MarkupContent(MarkupContent {
            kind: MarkupKind::Markdown,
            value: suggestion.documentation,
        })),
        // Clients sort by label otherwise
        sort_text: Some(format!("{index:05}")),
        text_edit,
        ..Default::default()
    }
}
