//! Error types for the Arete domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! "Nothing found" is never an error in this domain: empty queries, missing
//! stores and unmatched references all produce empty results. These types
//! cover genuine failures (unreadable files, malformed documents) that the
//! collaborators choose to surface.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all Arete operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Memory errors ---
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    // --- Context injection errors ---
    #[error("Context error: {0}")]
    Context(#[from] ContextError),

    // --- Entity resolution errors ---
    #[error("Entity error: {0}")]
    Entity(#[from] EntityError),

    // --- Skill/tool catalog errors ---
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Failed to read memory store {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Failed to read context file {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(String),

    #[error("Unknown primitive: {0}")]
    InvalidPrimitive(String),
}

#[derive(Debug, Error)]
pub enum EntityError {
    #[error("Failed to scan {path}: {reason}")]
    ScanFailed { path: PathBuf, reason: String },

    #[error("Invalid entity type: {0}")]
    InvalidType(String),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog directory {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Malformed frontmatter in {path}: {reason}")]
    MalformedFrontmatter { path: PathBuf, reason: String },

    #[error("Unknown work type: {0}")]
    UnknownWorkType(String),

    #[error("Unknown skill category: {0}")]
    UnknownCategory(String),

    #[error("Unknown tool lifecycle: {0}")]
    UnknownLifecycle(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_error_displays_path() {
        let err = Error::Memory(MemoryError::ReadFailed {
            path: PathBuf::from("/ws/.arete/memory/items/decisions.md"),
            reason: "permission denied".into(),
        });
        assert!(err.to_string().contains("decisions.md"));
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn entity_error_converts_into_top_level() {
        let err: Error = EntityError::InvalidType("planet".into()).into();
        assert!(matches!(err, Error::Entity(_)));
        assert!(err.to_string().contains("planet"));
    }
}
