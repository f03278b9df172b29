//! Hover Handler
//!
//! This module handles the `textDocument/hover` request. Hovering over a known
//! Oracle JET class inside a class value shows its description.

use ojet_classes::extract::is_class_char;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::debug;

use crate::state::ServerState;
use crate::OjetLanguageServer;

/// Handles the `textDocument/hover` request.
pub async fn handle_hover(server: &OjetLanguageServer, params: HoverParams) -> Result<Option<Hover>> {
    let uri = &params.text_document_position_params.text_document.uri;
    let position = params.text_document_position_params.position;

    debug!(
        "Hover request at {}:{}:{}",
        uri, position.line, position.character
    );

    Ok(hover_at(server.state(), uri, position))
}

/// Computes the hover for a position, if it rests on a known class.
pub fn hover_at(state: &ServerState, uri: &Url, position: Position) -> Option<Hover> {
    let engine = state.engine()?;
    let doc = state.get_document(uri)?;
    if !doc.is_served() {
        return None;
    }

    let line = doc.line_text(position.line as usize)?;
    let token = class_token_at(&line, position.character as usize)?;

    // The value must still be open where the token ends.
    if !engine.detector().is_in_class_context(&line[..token.end]) {
        debug!("Token {:?} is not inside a class value", token.text(&line));
        return None;
    }

    let documentation = engine.documentation(token.text(&line))?;

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: documentation,
        }),
        range: Some(Range {
            start: Position {
                line: position.line,
                character: token.start_utf16 as u32,
            },
            end: Position {
                line: position.line,
                character: token.end_utf16 as u32,
            },
        }),
    })
}

/// A class-name token within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token {
    /// Byte offsets into the line.
    start: usize,
    end: usize,
    /// UTF-16 columns.
    start_utf16: usize,
    end_utf16: usize,
}

impl Token {
    fn text<'a>(&self, line: &'a str) -> &'a str {
        &line[self.start..self.end]
    }
}

/// Finds the class token touching the UTF-16 column `column`.
///
/// A cursor right after the last character of a token still selects it.
fn class_token_at(line: &str, column: usize) -> Option<Token> {
    // (byte offset, utf16 column, char) for every char
    let mut chars = Vec::with_capacity(line.len());
    let mut utf16 = 0;
    for (byte, c) in line.char_indices() {
        chars.push((byte, utf16, c));
        utf16 += c.len_utf16();
    }

    let cursor = chars
        .iter()
        .position(|&(_, col, _)| col >= column)
        .unwrap_or(chars.len());

    // Prefer the char under the cursor, then the one just before it.
    let anchor = [Some(cursor), cursor.checked_sub(1)]
        .into_iter()
        .flatten()
        .find(|&i| chars.get(i).is_some_and(|&(_, _, c)| is_class_char(c)))?;

    let first = chars[..anchor]
        .iter()
        .rposition(|&(_, _, c)| !is_class_char(c))
        .map_or(0, |i| i + 1);
    let last = chars[anchor..]
        .iter()
        .position(|&(_, _, c)| !is_class_char(c))
        .map_or(chars.len(), |i| anchor + i);

    let (start, start_utf16, _) = chars[first];
    let (end, end_utf16) = chars.get(last).map_or((line.len(), utf16), |&(b, u, _)| (b, u));

    Some(Token {
        start,
        end,
        start_utf16,
        end_utf16,
    })
}
