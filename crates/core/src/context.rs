//! Context injection — the contextual files and coverage gaps for a task.
//!
//! The briefing assembler treats [`ContextBundle`] as opaque apart from
//! iterating files, gaps and primitives; producing it is the job of a
//! [`ContextProvider`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ContextError;
use crate::skill::WorkType;
use crate::workspace::WorkspacePaths;

/// The five building blocks of product knowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductPrimitive {
    Problem,
    User,
    Solution,
    Market,
    Risk,
}

impl ProductPrimitive {
    pub const ALL: [ProductPrimitive; 5] = [
        Self::Problem,
        Self::User,
        Self::Solution,
        Self::Market,
        Self::Risk,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Problem => "Problem",
            Self::User => "User",
            Self::Solution => "Solution",
            Self::Market => "Market",
            Self::Risk => "Risk",
        }
    }
}

impl fmt::Display for ProductPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductPrimitive {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ContextError::InvalidPrimitive(s.to_string()))
    }
}

/// How much substantive context backs a briefing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        })
    }
}

/// Which part of the workspace a context file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextCategory {
    Context,
    Goals,
    Projects,
    People,
    Resources,
    Memory,
}

/// A workspace file selected as context for a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextFile {
    /// Path relative to the workspace root, forward slashes.
    pub relative_path: String,
    pub category: ContextCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primitive: Option<ProductPrimitive>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f32>,
}

/// A primitive for which no substantive context was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextGap {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primitive: Option<ProductPrimitive>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// The assembled context for one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextBundle {
    pub query: String,
    /// Primitives actually considered, in briefing order.
    pub primitives: Vec<ProductPrimitive>,
    pub files: Vec<ContextFile>,
    pub gaps: Vec<ContextGap>,
    pub confidence: Confidence,
    pub assembled_at: DateTime<Utc>,
}

impl ContextBundle {
    /// The "no signal" bundle: nothing found, low confidence.
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            primitives: Vec::new(),
            files: Vec::new(),
            gaps: Vec::new(),
            confidence: Confidence::Low,
            assembled_at: Utc::now(),
        }
    }
}

/// Request for context assembly.
#[derive(Debug, Clone, Default)]
pub struct ContextRequest {
    pub query: String,
    /// Primitives to cover; empty means all five.
    pub primitives: Vec<ProductPrimitive>,
    pub work_type: Option<WorkType>,
}

/// The context-injection collaborator.
///
/// Must not fail for "nothing found": an empty workspace yields
/// [`ContextBundle::empty`]-like output with `Confidence::Low`.
#[async_trait]
pub trait ContextProvider: Send + Sync {
    async fn relevant_context(
        &self,
        request: &ContextRequest,
        workspace: &WorkspacePaths,
    ) -> Result<ContextBundle, ContextError>;
}
