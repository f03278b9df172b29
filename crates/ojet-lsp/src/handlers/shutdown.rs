//! Shutdown Handler
//!
//! The shutdown sequence is:
//! 1. Client sends `shutdown` request
//! 2. Server responds
//! 3. Client sends `exit` notification
//! 4. Server process terminates

use tower_lsp::jsonrpc::Result;
use tracing::info;

use crate::OjetLanguageServer;

/// Handles the `shutdown` request.
///
/// The engine and documents are plain memory and need no cleanup; the server
/// is only marked as no longer initialized.
pub async fn handle_shutdown(server: &OjetLanguageServer) -> Result<()> {
    info!("Oracle JET language server shutting down");

    server.state().set_initialized(false);

    Ok(())
}
