//! No-op memory store — a workspace with memory disabled.

use async_trait::async_trait;
use arete_core::error::MemoryError;
use arete_core::memory::{MemoryKind, MemoryStore};

/// A store with no documents; every search comes back empty.
pub struct NoopStore;

#[async_trait]
impl MemoryStore for NoopStore {
    fn name(&self) -> &str {
        "none"
    }

    async fn load(&self, _kind: MemoryKind) -> Result<Option<String>, MemoryError> {
        Ok(None)
    }
}
