//! In-memory store — useful for testing and ephemeral sessions.

use async_trait::async_trait;
use arete_core::error::MemoryError;
use arete_core::memory::{MemoryKind, MemoryStore};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Memory documents held in a map keyed by kind.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    documents: Arc<RwLock<HashMap<MemoryKind, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_documents(documents: impl IntoIterator<Item = (MemoryKind, String)>) -> Self {
        Self {
            documents: Arc::new(RwLock::new(documents.into_iter().collect())),
        }
    }

    /// Builder form of [`insert`](Self::insert) for fixtures.
    pub fn with_document(self, kind: MemoryKind, text: impl Into<String>) -> Self {
        let mut documents = match Arc::try_unwrap(self.documents) {
            Ok(lock) => lock.into_inner(),
            Err(shared) => shared.try_read().map(|d| (*d).clone()).unwrap_or_default(),
        };
        documents.insert(kind, text.into());
        Self::from_documents(documents)
    }

    /// Replace the document for `kind`.
    pub async fn insert(&self, kind: MemoryKind, text: impl Into<String>) {
        self.documents.write().await.insert(kind, text.into());
    }

    /// Append a section to the document for `kind`, creating it if needed.
    pub async fn append(&self, kind: MemoryKind, section: &str) {
        let mut documents = self.documents.write().await;
        let doc = documents.entry(kind).or_default();
        if !doc.is_empty() && !doc.ends_with('\n') {
            doc.push('\n');
        }
        doc.push_str(section);
    }
}

#[async_trait]
impl MemoryStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn load(&self, kind: MemoryKind) -> Result<Option<String>, MemoryError> {
        Ok(self.documents.read().await.get(&kind).cloned())
    }
}
