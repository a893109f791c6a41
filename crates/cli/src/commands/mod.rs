//! Subcommand implementations.

pub mod brief;
pub mod config_cmd;
pub mod context;
pub mod memory;
pub mod resolve;
pub mod route;
pub mod status;

use arete_config::AppConfig;
use arete_core::WorkspacePaths;
use std::path::PathBuf;

/// Configuration plus the workspace a command operates on.
pub struct Session {
    pub config: AppConfig,
    pub workspace: Option<WorkspacePaths>,
}

impl Session {
    /// Load config and locate the workspace; `--workspace` beats config.
    pub fn open(explicit: Option<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
        if explicit.is_some() {
            config.workspace = explicit;
        }
        let cwd = std::env::current_dir()?;
        let workspace = config.resolve_workspace(&cwd).map(WorkspacePaths::new);
        Ok(Self { config, workspace })
    }

    /// The workspace, or an error telling the user how to point at one.
    pub fn require_workspace(&self) -> Result<&WorkspacePaths, Box<dyn std::error::Error>> {
        self.workspace.as_ref().ok_or_else(|| {
            "Not inside an Arete workspace (run from a workspace or pass --workspace)".into()
        })
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
