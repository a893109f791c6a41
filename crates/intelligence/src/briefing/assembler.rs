//! Briefing assembler — combines context, memory and entities for a task.
//!
//! Assembly runs the collaborators in sequence:
//! 1. Context injection for the task (files, gaps, confidence)
//! 2. Memory search over the task text
//! 3. Entity-reference extraction from the task text
//! 4. Entity resolution per reference, deduplicated by path
//! 5. Document build and markdown render
//!
//! Confidence is taken from the context bundle as-is.

use arete_core::{
    Confidence, ContextBundle, ContextProvider, ContextRequest, EntityResolver, EntityType,
    MemorySearchOptions, MemorySearchResult, MemoryStore, ProductPrimitive, ResolvedEntity,
    Result, WorkType, WorkspacePaths,
};
use arete_memory::search_memory;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use super::document::{BriefingDocument, BriefingHeader, MEMORY_SECTION_LIMIT};
use super::references::extract_entity_references;

/// Entities resolved per extracted reference.
pub const DEFAULT_ENTITY_LIMIT: usize = 3;

// ── Types ──────────────────────────────────────────────────────────────────

/// Caller-supplied shaping of a briefing.
#[derive(Debug, Clone, Default)]
pub struct BriefingOptions {
    /// Primitives to cover; empty lets the context provider pick all five.
    pub primitives: Vec<ProductPrimitive>,
    pub work_type: Option<WorkType>,
    /// Skill the briefing is prepared for, shown in the header.
    pub skill: Option<String>,
}

/// Everything gathered for a task, plus its markdown rendering.
#[derive(Debug, Clone, Serialize)]
pub struct PrimitiveBriefing {
    pub task: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    pub assembled_at: DateTime<Utc>,
    pub confidence: Confidence,
    pub context: ContextBundle,
    pub memory: MemorySearchResult,
    /// Resolved entities, unique by path, in reference order.
    pub entities: Vec<ResolvedEntity>,
    pub markdown: String,
    /// The section layout `markdown` was rendered from.
    #[serde(skip)]
    pub document: BriefingDocument,
}

// ── Assembler ──────────────────────────────────────────────────────────────

/// Holds the three collaborators; stateless across calls, so one instance
/// can serve every briefing for a process.
pub struct BriefingAssembler {
    context: Arc<dyn ContextProvider>,
    memory: Arc<dyn MemoryStore>,
    entities: Arc<dyn EntityResolver>,
    memory_limit: usize,
    entity_limit: usize,
}

impl BriefingAssembler {
    pub fn new(
        context: Arc<dyn ContextProvider>,
        memory: Arc<dyn MemoryStore>,
        entities: Arc<dyn EntityResolver>,
    ) -> Self {
        Self {
            context,
            memory,
            entities,
            memory_limit: MEMORY_SECTION_LIMIT,
            entity_limit: DEFAULT_ENTITY_LIMIT,
        }
    }

    /// Cap on memory results fetched for the briefing.
    pub fn with_memory_limit(mut self, limit: usize) -> Self {
        self.memory_limit = limit;
        self
    }

    /// Cap on entities resolved per reference.
    pub fn with_entity_limit(mut self, limit: usize) -> Self {
        self.entity_limit = limit;
        self
    }

    /// Assemble a briefing for `task`.
    ///
    /// An empty task or an empty workspace still yields a briefing (header
    /// only, `Confidence::Low`). Errors come only from the collaborators.
    pub async fn assemble_briefing(
        &self,
        task: &str,
        workspace: &WorkspacePaths,
        options: BriefingOptions,
    ) -> Result<PrimitiveBriefing> {
        let assembled_at = Utc::now();

        let request = ContextRequest {
            query: task.to_string(),
            primitives: options.primitives,
            work_type: options.work_type,
        };
        let context = self.context.relevant_context(&request, workspace).await?;

        let memory = search_memory(
            task,
            self.memory.as_ref(),
            &MemorySearchOptions::with_limit(self.memory_limit),
        )
        .await;

        let entities = self.resolve_references(task, workspace).await?;

        let header = BriefingHeader {
            task: task.to_string(),
            assembled_at,
            skill: options.skill.clone(),
            confidence: context.confidence,
        };
        let document = BriefingDocument::build(header, &context, &memory, &entities);
        let markdown = document.render_markdown();

        info!(
            files = context.files.len(),
            gaps = context.gaps.len(),
            memories = memory.results.len(),
            entities = entities.len(),
            confidence = %context.confidence,
            "Briefing assembled"
        );

        Ok(PrimitiveBriefing {
            task: task.to_string(),
            skill: options.skill,
            assembled_at,
            confidence: context.confidence,
            context,
            memory,
            entities,
            markdown,
            document,
        })
    }

    async fn resolve_references(
        &self,
        task: &str,
        workspace: &WorkspacePaths,
    ) -> Result<Vec<ResolvedEntity>> {
        let mut seen = HashSet::new();
        let mut entities = Vec::new();

        for reference in extract_entity_references(task) {
            let resolved = self
                .entities
                .resolve_entities(&reference, EntityType::Any, workspace, self.entity_limit)
                .await?;
            debug!(reference = %reference, matches = resolved.len(), "Resolved entity reference");
            for entity in resolved {
                if seen.insert(entity.path.clone()) {
                    entities.push(entity);
                }
            }
        }
        Ok(entities)
    }
}
