//! Initialization and Initialized Handlers
//!
//! This module handles the LSP initialization handshake:
//!
//! 1. Client sends `initialize` request with its options and workspace folders
//! 2. Server stores them and responds with its capabilities
//! 3. Client sends `initialized` notification
//! 4. Server probes the workspace for an Oracle JET project and, if one is
//!    found, loads the class vocabulary; otherwise it stays dormant

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::{debug, info};

use crate::capabilities::server_capabilities;
use crate::project::{self, folder_paths};
use crate::state::{ServerConfig, ServerState};
use crate::OjetLanguageServer;

/// Handles the `initialize` request.
///
/// # Arguments
///
/// * `server` - The language server instance
/// * `params` - Initialization parameters from the client
///
/// # Returns
///
/// The initialization result containing server capabilities
pub async fn handle_initialize(
    server: &OjetLanguageServer,
    params: InitializeParams,
) -> Result<InitializeResult> {
    info!("Initializing Oracle JET language server");

    let config = ServerConfig::from_initialization_options(params.initialization_options.clone());
    debug!("Configuration: {:?}", config);
    server.state().update_config(config);

    let folders = workspace_folders(&params);
    info!(
        "Workspace folders: {:?}",
        folders.iter().map(|f| f.uri.as_str()).collect::<Vec<_>>()
    );
    server.state().set_workspace_folders(folders);

    if let Some(client_info) = &params.client_info {
        info!(
            "Client: {} {}",
            client_info.name,
            client_info.version.as_deref().unwrap_or("unknown")
        );
    }

    Ok(InitializeResult {
        capabilities: server_capabilities(),
        server_info: Some(ServerInfo {
            name: "ojet-lsp".to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
    })
}

/// Handles the `initialized` notification.
///
/// Activation happens here, once per session.
pub async fn handle_initialized(server: &OjetLanguageServer, _params: InitializedParams) {
    let active = activate_workspace(server.state()).await;
    server.state().set_initialized(true);

    if active {
        server
            .client()
            .log_message(MessageType::INFO, "Oracle JET utility class support active")
            .await;
    }
}

/// Probes the stored workspace folders and installs the engine if the
/// workspace is an Oracle JET project. Returns whether the server is active.
pub async fn activate_workspace(state: &ServerState) -> bool {
    let config = state.config();
    let folders = folder_paths(&state.workspace_folders());

    match project::activate(&config, &folders).await {
        Some(engine) => {
            info!(
                "Serving {} utility classes with {} exclusion groups ({} context policy)",
                engine.registry().len(),
                engine.rules().len(),
                engine.detector().policy()
            );
            state.activate(engine);
            true
        }
        None => false,
    }
}

/// Workspace folders from the request, falling back to the root URI for
/// clients that do not send folders.
#[allow(deprecated)]
fn workspace_folders(params: &InitializeParams) -> Vec<WorkspaceFolder> {
    match &params.workspace_folders {
        Some(folders) if !folders.is_empty() => folders.clone(),
        _ => params
            .root_uri
            .clone()
            .map(|uri| {
                vec![WorkspaceFolder {
                    name: uri.path().to_string(),
                    uri,
                }]
            })
            .unwrap_or_default(),
    }
}
