//! Project Detection and Activation
//!
//! The server only wakes up inside an Oracle JET project, recognized by a
//! marker file at the root of one of the workspace folders. Activation then
//! loads the class vocabulary and the exclusion rules once and builds the
//! engine that serves every later query.
//!
//! Probing errors (permission denied, folder removed mid-scan) count as
//! "marker absent". A missing or malformed vocabulary leaves the server active
//! but with nothing to suggest.

use ojet_classes::{ClassNameRegistry, SuggestionEngine, ValidationRules};
use std::path::{Path, PathBuf};
use tower_lsp::lsp_types::WorkspaceFolder;
use tracing::{debug, info};

use crate::state::ServerConfig;

/// Marker file identifying an Oracle JET project.
pub const DEFAULT_PROJECT_MARKER: &str = "oraclejetconfig.json";

/// The class list shipped with the server.
const BUNDLED_CLASSES: &str = include_str!("../data/utility-ojet.json");

/// Returns the local paths of the given workspace folders, skipping any that
/// are not on the file system.
pub fn folder_paths(folders: &[WorkspaceFolder]) -> Vec<PathBuf> {
    folders
        .iter()
        .filter_map(|folder| folder.uri.to_file_path().ok())
        .collect()
}

/// Returns the first folder containing `marker`.
pub async fn find_project_root(folders: &[PathBuf], marker: &str) -> Option<PathBuf> {
    for folder in folders {
        let candidate = folder.join(marker);
        match tokio::fs::try_exists(&candidate).await {
            Ok(true) => return Some(folder.clone()),
            Ok(false) => {}
            Err(e) => debug!("Could not probe {}: {}", candidate.display(), e),
        }
    }
    None
}

/// Loads the vocabulary and rules named by `config` and builds the engine.
/// Relative paths are resolved against `root`.
pub fn build_engine(config: &ServerConfig, root: Option<&Path>) -> SuggestionEngine {
    let resolve = |path: &Path| match root {
        Some(root) if path.is_relative() => root.join(path),
        _ => path.to_path_buf(),
    };

    let registry = match &config.classes_path {
        Some(path) => ClassNameRegistry::load(resolve(path)),
        None => {
            let registry = ClassNameRegistry::from_json_str(BUNDLED_CLASSES);
            info!("Loaded {} bundled utility classes", registry.len());
            registry
        }
    };

    let rules = match &config.rules_path {
        Some(path) => ValidationRules::load_or_default(resolve(path)),
        None => ValidationRules::jet_defaults(),
    };

    SuggestionEngine::new(registry, rules).with_policy(config.policy())
}

/// Decides whether the server should activate for these folders and, if so,
/// builds the engine.
pub async fn activate(config: &ServerConfig, folders: &[PathBuf]) -> Option<SuggestionEngine> {
    let root = if config.require_project_marker {
        match find_project_root(folders, &config.project_marker).await {
            Some(root) => {
                info!("Oracle JET project detected at {}", root.display());
                Some(root)
            }
            None => {
                info!("Oracle JET project not detected");
                return None;
            }
        }
    } else {
        folders.first().cloned()
    };

    Some(build_engine(config, root.as_deref()))
}
