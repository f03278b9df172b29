//! Server Capability Declarations
//!
//! The capabilities advertised to the client during the initialization
//! handshake: document sync, completion inside class values, and hover over
//! known classes.

use tower_lsp::lsp_types::*;

/// Characters after which the client should ask for completions again.
pub const TRIGGER_CHARACTERS: [&str; 3] = [" ", "\"", "'"];

/// Creates the server capabilities to advertise to the client.
pub fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Options(
            text_document_sync_options(),
        )),
        hover_provider: Some(HoverProviderCapability::Simple(true)),
        completion_provider: Some(completion_options()),
        workspace: Some(workspace_server_capabilities()),
        ..Default::default()
    }
}

/// Text document synchronization options.
///
/// Incremental sync: only the changed ranges are sent.
fn text_document_sync_options() -> TextDocumentSyncOptions {
    TextDocumentSyncOptions {
        open_close: Some(true),
        change: Some(TextDocumentSyncKind::INCREMENTAL),
        save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
            include_text: Some(true),
        })),
        will_save: Some(false),
        will_save_wait_until: Some(false),
    }
}

/// Completion provider options.
fn completion_options() -> CompletionOptions {
    CompletionOptions {
        trigger_characters: Some(TRIGGER_CHARACTERS.iter().map(|c| c.to_string()).collect()),
        all_commit_characters: None,
        // Items are sent complete, documentation included
        resolve_provider: Some(false),
        work_done_progress_options: WorkDoneProgressOptions {
            work_done_progress: Some(false),
        },
        completion_item: None,
    }
}

/// Workspace server capabilities.
fn workspace_server_capabilities() -> WorkspaceServerCapabilities {
    WorkspaceServerCapabilities {
        workspace_folders: Some(WorkspaceFoldersServerCapabilities {
            supported: Some(true),
            change_notifications: Some(OneOf::Left(false)),
        }),
        file_operations: None,
    }
}
