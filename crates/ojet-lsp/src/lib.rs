//! Oracle JET Utility Class Language Server
//!
//! Offers completion and hover documentation for Oracle JET utility classes
//! inside class attributes and class-list expressions of markup and script
//! files.
//!
//! # Architecture
//!
//! - **State Management**: open documents, configuration and the activated
//!   engine
//! - **Project Detection**: the server stays dormant unless the workspace is
//!   an Oracle JET project
//! - **Handlers**: request/notification handlers for the LSP protocol
//!
//! The class-context and suggestion logic lives in `ojet-classes`; this crate
//! only adapts it to the protocol.
//!
//! # Modules
//!
//! - [`capabilities`]: Server capability declarations
//! - [`handlers`]: LSP request and notification handlers
//! - [`language`]: Supported document kinds
//! - [`project`]: Project detection and engine activation
//! - [`state`]: Server state and document management

pub mod capabilities;
pub mod handlers;
pub mod language;
pub mod project;
pub mod state;

use std::sync::Arc;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{info, instrument};

use crate::state::ServerState;

/// The Oracle JET utility class language server.
pub struct OjetLanguageServer {
    /// The LSP client handle.
    client: Client,
    /// The server state containing documents and the engine.
    state: Arc<ServerState>,
}

impl OjetLanguageServer {
    /// Creates a new server instance.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            state: Arc::new(ServerState::new()),
        }
    }

    /// Returns a reference to the server state.
    pub fn state(&self) -> &ServerState {
        &self.state
    }

    /// Returns a reference to the LSP client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for OjetLanguageServer {
    #[instrument(skip(self))]
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handlers::initialize::handle_initialize(self, params).await
    }

    #[instrument(skip(self))]
    async fn initialized(&self, params: InitializedParams) {
        handlers::initialize::handle_initialized(self, params).await
    }

    #[instrument(skip(self))]
    async fn shutdown(&self) -> Result<()> {
        handlers::shutdown::handle_shutdown(self).await
    }

    #[instrument(skip(self, params))]
    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        handlers::document::handle_did_open(self, params).await
    }

    #[instrument(skip(self, params))]
    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handlers::document::handle_did_change(self, params).await
    }

    #[instrument(skip(self, params))]
    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        handlers::document::handle_did_close(self, params).await
    }

    #[instrument(skip(self, params))]
    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        handlers::document::handle_did_save(self, params).await
    }

    #[instrument(skip(self))]
    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        handlers::hover::handle_hover(self, params).await
    }

    #[instrument(skip(self))]
    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        handlers::completion::handle_completion(self, params).await
    }
}

/// Creates the LSP service and IO transport.
pub fn create_server() -> (LspService<OjetLanguageServer>, tower_lsp::ClientSocket) {
    LspService::build(OjetLanguageServer::new).finish()
}

/// Runs the language server over stdio.
///
/// # Example
///
/// ```ignore
/// #[tokio::main]
/// async fn main() {
///     ojet_lsp::run_server().await;
/// }
/// ```
pub async fn run_server() {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = create_server();

    info!("Oracle JET language server starting...");

    Server::new(stdin, stdout, socket).serve(service).await;

    info!("Oracle JET language server stopped.");
}
