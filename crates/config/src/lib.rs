//! Configuration loading and validation for Arete.
//!
//! Loads configuration from `~/.arete/config.toml` with environment
//! variable overrides. Every section is optional; a missing file yields
//! the defaults.

use arete_core::workspace::{find_workspace_root, is_workspace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit workspace root.
pub const WORKSPACE_ENV: &str = "ARETE_WORKSPACE";

/// The root configuration structure.
///
/// Maps directly to `~/.arete/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Explicit workspace root; otherwise discovered from the current directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<PathBuf>,

    #[serde(default)]
    pub memory: MemoryConfig,

    #[serde(default)]
    pub briefing: BriefingConfig,

    #[serde(default)]
    pub context: ContextConfig,

    #[serde(default)]
    pub skills: SkillsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Result cap for `arete memory search` when `--limit` is absent.
    #[serde(default = "default_memory_limit")]
    pub default_limit: usize,
}

fn default_memory_limit() -> usize {
    10
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            default_limit: default_memory_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BriefingConfig {
    /// Memory excerpts included in a briefing.
    #[serde(default = "default_briefing_memory_limit")]
    pub memory_limit: usize,

    /// Entities resolved per extracted reference.
    #[serde(default = "default_entity_limit")]
    pub entity_limit: usize,
}

fn default_briefing_memory_limit() -> usize {
    5
}
fn default_entity_limit() -> usize {
    3
}

impl Default for BriefingConfig {
    fn default() -> Self {
        Self {
            memory_limit: default_briefing_memory_limit(),
            entity_limit: default_entity_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextConfig {
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

fn default_max_files() -> usize {
    15
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_files: default_max_files(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillsConfig {
    /// Routed skill id ⇒ preferred installed skill id.
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.arete/config.toml).
    ///
    /// `ARETE_WORKSPACE` overrides the `workspace` setting.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(workspace) = std::env::var(WORKSPACE_ENV)
            && !workspace.trim().is_empty()
        {
            config.workspace = Some(PathBuf::from(workspace));
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".arete")
    }

    /// The workspace root to operate on.
    ///
    /// An explicit `workspace` wins when it is a workspace; otherwise the
    /// root is searched for upward from `cwd`.
    pub fn resolve_workspace(&self, cwd: &Path) -> Option<PathBuf> {
        if let Some(explicit) = &self.workspace {
            if is_workspace(explicit) {
                return Some(explicit.clone());
            }
            tracing::warn!(
                path = %explicit.display(),
                "Configured workspace is not an Arete workspace, searching from current directory"
            );
        }
        find_workspace_root(cwd)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory.default_limit == 0 {
            return Err(ConfigError::ValidationError(
                "memory.default_limit must be > 0".into(),
            ));
        }
        if self.briefing.memory_limit == 0 || self.briefing.entity_limit == 0 {
            return Err(ConfigError::ValidationError(
                "briefing.memory_limit and briefing.entity_limit must be > 0".into(),
            ));
        }
        if self.context.max_files == 0 {
            return Err(ConfigError::ValidationError(
                "context.max_files must be > 0".into(),
            ));
        }
        if let Some((from, _)) = self.skills.defaults.iter().find(|(from, to)| from == to) {
            return Err(ConfigError::ValidationError(format!(
                "skills.defaults maps '{from}' to itself"
            )));
        }
        Ok(())
    }

    /// Generate a default config TOML string (for `config init`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
