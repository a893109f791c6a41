//! Memory trait and types — append-only, section-structured memory logs.
//!
//! A memory store is a markdown document segmented into `###` sections,
//! each optionally prefixed with an ISO date:
//!
//! ```markdown
//! ### 2026-01-20: Onboarding flow redesign
//! **Decision**: Redesign the onboarding wizard.
//! ```
//!
//! Every value here is produced fresh per query and never persisted.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MemoryError;

/// Which memory log a section came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryKind {
    Decisions,
    Learnings,
    Observations,
}

impl MemoryKind {
    pub const ALL: [MemoryKind; 3] = [Self::Decisions, Self::Learnings, Self::Observations];

    /// File name of the backing document under `.arete/memory/items/`.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Decisions => "decisions.md",
            Self::Learnings => "learnings.md",
            Self::Observations => "agent-observations.md",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Decisions => "decisions",
            Self::Learnings => "learnings",
            Self::Observations => "observations",
        }
    }

    /// Display label with a leading capital, e.g. `Decisions`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Decisions => "Decisions",
            Self::Learnings => "Learnings",
            Self::Observations => "Observations",
        }
    }
}

impl fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemoryKind {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "decisions" | "decision" => Ok(Self::Decisions),
            "learnings" | "learning" => Ok(Self::Learnings),
            "observations" | "observation" => Ok(Self::Observations),
            other => Err(MemoryError::Storage(format!("unknown memory type: {other}"))),
        }
    }
}

/// One `###`-headed section of a memory document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySection {
    pub title: String,
    /// ISO date (`YYYY-MM-DD`) from the heading prefix, if any.
    pub date: Option<String>,
    /// All lines after the heading up to the next heading or EOF.
    pub body: String,
    /// Full section text including the heading line.
    pub raw: String,
}

/// A single scored memory excerpt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryResult {
    /// Raw section text, heading included.
    pub content: String,
    /// Store file identifier, e.g. `decisions.md`.
    pub source: String,
    #[serde(rename = "type")]
    pub kind: MemoryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Human-readable explanation of what matched.
    pub relevance: String,
    /// Unbounded integer score; only the relative order is meaningful.
    pub score: u32,
}

/// Ranked results of one memory search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemorySearchResult {
    pub query: String,
    pub results: Vec<MemoryResult>,
    /// Match count before `limit` was applied.
    pub total: usize,
}

impl MemorySearchResult {
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            results: Vec::new(),
            total: 0,
        }
    }
}

/// Options for a memory search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySearchOptions {
    /// Stores to search; empty means all three.
    pub kinds: Vec<MemoryKind>,
    pub limit: usize,
}

impl MemorySearchOptions {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }
}

impl Default for MemorySearchOptions {
    fn default() -> Self {
        Self {
            kinds: Vec::new(),
            limit: 10,
        }
    }
}

/// Resolves a memory kind to the text of its backing document.
///
/// Implementations: workspace files, in-memory (for testing), none (no-op).
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// The store name (e.g., "file", "in_memory", "none").
    fn name(&self) -> &str;

    /// Load the document for `kind`. `Ok(None)` means it does not exist.
    async fn load(&self, kind: MemoryKind) -> Result<Option<String>, MemoryError>;

    /// Identifier reported as `MemoryResult::source`.
    fn source_id(&self, kind: MemoryKind) -> String {
        kind.file_name().to_string()
    }
}
