//! File-backed memory store — reads `.arete/memory/items/*.md`.
//!
//! Documents are read fresh on every load so edits made between queries
//! are always visible. A missing file is not an error.

use async_trait::async_trait;
use arete_core::error::MemoryError;
use arete_core::memory::{MemoryKind, MemoryStore};
use arete_core::workspace::WorkspacePaths;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Memory store over a directory of markdown logs.
pub struct FileMemoryStore {
    dir: PathBuf,
}

impl FileMemoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the workspace's memory items directory.
    pub fn for_workspace(workspace: &WorkspacePaths) -> Self {
        Self::new(workspace.memory_items.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, kind: MemoryKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }
}

#[async_trait]
impl MemoryStore for FileMemoryStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn load(&self, kind: MemoryKind) -> Result<Option<String>, MemoryError> {
        let path = self.path_for(kind);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                debug!(path = %path.display(), bytes = text.len(), "Loaded memory document");
                Ok(Some(text))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MemoryError::ReadFailed {
                path,
                reason: e.to_string(),
            }),
        }
    }
}
