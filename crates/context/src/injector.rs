//! File-backed context injection.
//!
//! Selection order:
//! 1. Strategy and quarter goals, always.
//! 2. The context files mapped to each requested primitive; a primitive
//!    with no substantive file becomes a gap.
//! 3. People notes overlapping the query (User).
//! 4. Active project READMEs overlapping the query (Solution).
//! 5. Decision and learning logs overlapping the query (Risk).
//!
//! Files are deduplicated by path, sorted by relevance, and capped.

use arete_core::context::{
    Confidence, ContextBundle, ContextCategory, ContextFile, ContextGap, ContextProvider,
    ContextRequest, ProductPrimitive,
};
use arete_core::error::ContextError;
use arete_core::memory::MemoryKind;
use arete_core::tokenize;
use arete_core::workspace::WorkspacePaths;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::fs::{list_markdown, list_subdirs, read_optional};
use crate::summary::{extract_summary, has_token_overlap, is_placeholder};

/// Relevance given to every statically selected file.
const STATIC_SCORE: f32 = 0.5;

pub const DEFAULT_MAX_FILES: usize = 15;

const ALWAYS_INCLUDE: [&str; 2] = ["goals/strategy.md", "goals/quarter.md"];

const PEOPLE_CATEGORIES: [&str; 3] = ["internal", "customers", "users"];

/// Workspace files that back each primitive.
pub fn primitive_files(primitive: ProductPrimitive) -> &'static [&'static str] {
    match primitive {
        ProductPrimitive::Problem => &["context/business-overview.md"],
        ProductPrimitive::User => &["context/users-personas.md"],
        ProductPrimitive::Solution => &["context/products-services.md", "context/technology-overview.md"],
        ProductPrimitive::Market => &["context/competitive-landscape.md"],
        ProductPrimitive::Risk => &[],
    }
}

/// What to do about a missing primitive.
pub fn gap_suggestion(primitive: ProductPrimitive) -> &'static str {
    match primitive {
        ProductPrimitive::Problem => {
            "Add problem context to context/business-overview.md or start a discovery project"
        }
        ProductPrimitive::User => {
            "Add user/persona details to context/users-personas.md or create people files in people/"
        }
        ProductPrimitive::Solution => "Add product details to context/products-services.md",
        ProductPrimitive::Market => "Add competitive landscape to context/competitive-landscape.md",
        ProductPrimitive::Risk => {
            "Risks are often scattered across memory and projects; use arete memory search to find past decisions and learnings"
        }
    }
}

/// Coverage-based confidence.
///
/// High: every primitive covered and at least two `context/` files.
/// Medium: at least half covered, or any `context/` file. Otherwise Low.
pub fn assess_confidence(requested: usize, gaps: usize, context_files: usize) -> Confidence {
    let covered = requested.saturating_sub(gaps);
    if covered >= requested && context_files >= 2 {
        Confidence::High
    } else if covered * 2 >= requested || context_files >= 1 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Context provider reading the workspace's markdown files.
pub struct FileContextProvider {
    max_files: usize,
}

impl FileContextProvider {
    pub fn new() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
        }
    }

    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }
}

impl Default for FileContextProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates selected files, first selection of a path wins.
struct Selection<'a> {
    workspace: &'a WorkspacePaths,
    seen: HashSet<String>,
    files: Vec<ContextFile>,
}

impl<'a> Selection<'a> {
    fn new(workspace: &'a WorkspacePaths) -> Self {
        Self {
            workspace,
            seen: HashSet::new(),
            files: Vec::new(),
        }
    }

    fn add(
        &mut self,
        path: &Path,
        content: &str,
        category: ContextCategory,
        primitive: Option<ProductPrimitive>,
    ) {
        let relative_path = self.workspace.relative(path);
        if !self.seen.insert(relative_path.clone()) {
            return;
        }
        self.files.push(ContextFile {
            relative_path,
            category,
            primitive,
            summary: extract_summary(content),
            relevance_score: Some(STATIC_SCORE),
        });
    }
}

#[async_trait]
impl ContextProvider for FileContextProvider {
    async fn relevant_context(
        &self,
        request: &ContextRequest,
        workspace: &WorkspacePaths,
    ) -> Result<ContextBundle, ContextError> {
        let tokens = tokenize(&request.query);
        let primitives: Vec<ProductPrimitive> = if request.primitives.is_empty() {
            ProductPrimitive::ALL.to_vec()
        } else {
            request.primitives.clone()
        };
        let wants = |p: ProductPrimitive| primitives.contains(&p);

        let mut selection = Selection::new(workspace);
        let mut gaps = Vec::new();

        for rel in ALWAYS_INCLUDE {
            let path = workspace.root.join(rel);
            if let Some(content) = read_optional(&path).await {
                selection.add(&path, &content, ContextCategory::Goals, None);
            }
        }

        for &primitive in &primitives {
            let mut covered = false;
            for rel in primitive_files(primitive) {
                let path = workspace.root.join(rel);
                let Some(content) = read_optional(&path).await else {
                    continue;
                };
                if is_placeholder(&content) {
                    debug!(path = %rel, "Ignoring placeholder context file");
                    continue;
                }
                selection.add(&path, &content, ContextCategory::Context, Some(primitive));
                covered = true;
            }
            if !covered {
                gaps.push(ContextGap {
                    primitive: Some(primitive),
                    description: format!("No substantive context found for {primitive} primitive"),
                    suggestion: Some(gap_suggestion(primitive).to_string()),
                });
            }
        }

        if wants(ProductPrimitive::User) {
            for category in PEOPLE_CATEGORIES {
                for path in list_markdown(&workspace.people.join(category)).await {
                    if let Some(content) = read_optional(&path).await
                        && has_token_overlap(&content, &tokens)
                    {
                        selection.add(&path, &content, ContextCategory::People, Some(ProductPrimitive::User));
                    }
                }
            }
        }

        let project_primitive = wants(ProductPrimitive::Solution).then_some(ProductPrimitive::Solution);
        for project in list_subdirs(&workspace.projects.join("active")).await {
            let readme = project.join("README.md");
            if let Some(content) = read_optional(&readme).await
                && has_token_overlap(&content, &tokens)
            {
                selection.add(&readme, &content, ContextCategory::Projects, project_primitive);
            }
        }

        let memory_primitive = wants(ProductPrimitive::Risk).then_some(ProductPrimitive::Risk);
        for kind in [MemoryKind::Decisions, MemoryKind::Learnings] {
            let path = workspace.memory_items.join(kind.file_name());
            if let Some(content) = read_optional(&path).await
                && has_token_overlap(&content, &tokens)
            {
                selection.add(&path, &content, ContextCategory::Memory, memory_primitive);
            }
        }

        let mut files = selection.files;
        files.sort_by(|a, b| {
            let a = a.relevance_score.unwrap_or(0.0);
            let b = b.relevance_score.unwrap_or(0.0);
            b.total_cmp(&a)
        });
        files.truncate(self.max_files);

        let context_files = files
            .iter()
            .filter(|f| f.category == ContextCategory::Context)
            .count();
        let confidence = assess_confidence(primitives.len(), gaps.len(), context_files);
        debug!(
            query = %request.query,
            files = files.len(),
            gaps = gaps.len(),
            %confidence,
            "Context assembled"
        );

        Ok(ContextBundle {
            query: request.query.clone(),
            primitives,
            files,
            gaps,
            confidence,
            assembled_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBSTANTIVE: &str = "We help product teams ship faster with less process overhead.";

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    async fn context(ws: &WorkspacePaths, query: &str, primitives: &[ProductPrimitive]) -> ContextBundle {
        let request = ContextRequest {
            query: query.into(),
            primitives: primitives.to_vec(),
            work_type: None,
        };
        FileContextProvider::new().relevant_context(&request, ws).await.unwrap()
    }

    #[tokio::test]
    async fn empty_workspace_is_all_gaps_and_low_confidence() {
        let root = tempfile::tempdir().unwrap();
        let ws = WorkspacePaths::new(root.path());
        let bundle = context(&ws, "plan the launch", &[]).await;
        assert!(bundle.files.is_empty());
        assert_eq!(bundle.primitives, ProductPrimitive::ALL.to_vec());
        assert_eq!(bundle.gaps.len(), 5);
        assert_eq!(bundle.confidence, Confidence::Low);
    }

    #[tokio::test]
    async fn goals_are_always_included_untagged() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), "goals/strategy.md", "# Strategy\n\nWin the mid-market.\n");
        let ws = WorkspacePaths::new(root.path());
        let bundle = context(&ws, "anything", &[ProductPrimitive::Market]).await;
        assert_eq!(bundle.files.len(), 1);
        assert_eq!(bundle.files[0].relative_path, "goals/strategy.md");
        assert_eq!(bundle.files[0].primitive, None);
        assert_eq!(bundle.files[0].summary.as_deref(), Some("Win the mid-market."));
    }

    #[tokio::test]
    async fn placeholder_context_file_leaves_a_gap() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), "context/users-personas.md", "# Personas\n\n[Add your personas]\n");
        write(root.path(), "context/business-overview.md", &format!("# Overview\n\n{SUBSTANTIVE}\n"));
        let ws = WorkspacePaths::new(root.path());
        let bundle = context(&ws, "roadmap", &[ProductPrimitive::Problem, ProductPrimitive::User]).await;

        assert_eq!(bundle.files.len(), 1);
        assert_eq!(bundle.files[0].primitive, Some(ProductPrimitive::Problem));
        assert_eq!(bundle.gaps.len(), 1);
        assert_eq!(bundle.gaps[0].primitive, Some(ProductPrimitive::User));
        assert!(bundle.gaps[0].suggestion.as_deref().unwrap().contains("users-personas.md"));
        assert_eq!(bundle.confidence, Confidence::Medium);
    }

    #[tokio::test]
    async fn full_coverage_with_two_context_files_is_high() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), "context/products-services.md", SUBSTANTIVE);
        write(root.path(), "context/technology-overview.md", SUBSTANTIVE);
        let ws = WorkspacePaths::new(root.path());
        let bundle = context(&ws, "architecture", &[ProductPrimitive::Solution]).await;
        assert_eq!(bundle.files.len(), 2);
        assert!(bundle.gaps.is_empty());
        assert_eq!(bundle.confidence, Confidence::High);
    }

    #[tokio::test]
    async fn people_and_projects_need_query_overlap() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), "people/internal/jane-doe.md", "---\nname: Jane Doe\n---\nOwns onboarding.\n");
        write(root.path(), "people/internal/index.md", "onboarding index");
        write(root.path(), "people/customers/bob.md", "Buys pricing plans.\n");
        write(root.path(), "projects/active/onboarding-v2/README.md", "# Onboarding v2\n\nRedo the wizard.\n");
        write(root.path(), "projects/active/pricing/README.md", "# Pricing\n");
        let ws = WorkspacePaths::new(root.path());
        let bundle = context(&ws, "onboarding", &[ProductPrimitive::User, ProductPrimitive::Solution]).await;

        let paths: Vec<&str> = bundle.files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["people/internal/jane-doe.md", "projects/active/onboarding-v2/README.md"]);
        assert_eq!(bundle.files[0].primitive, Some(ProductPrimitive::User));
        assert_eq!(bundle.files[1].primitive, Some(ProductPrimitive::Solution));
        assert_eq!(bundle.files[1].category, ContextCategory::Projects);
    }

    #[tokio::test]
    async fn memory_logs_tagged_risk_only_when_requested() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), ".arete/memory/items/decisions.md", "### 2026-01-20: Onboarding redesign\n");
        let ws = WorkspacePaths::new(root.path());

        let with_risk = context(&ws, "onboarding", &[ProductPrimitive::Risk]).await;
        assert_eq!(with_risk.files[0].primitive, Some(ProductPrimitive::Risk));
        assert_eq!(with_risk.files[0].category, ContextCategory::Memory);

        let without = context(&ws, "onboarding", &[ProductPrimitive::Market]).await;
        assert_eq!(without.files[0].primitive, None);
    }

    #[tokio::test]
    async fn max_files_caps_selection() {
        let root = tempfile::tempdir().unwrap();
        for name in ["a", "b", "c"] {
            write(root.path(), &format!("people/users/{name}.md"), "Talks about onboarding.\n");
        }
        let ws = WorkspacePaths::new(root.path());
        let request = ContextRequest {
            query: "onboarding".into(),
            primitives: vec![ProductPrimitive::User],
            work_type: None,
        };
        let bundle = FileContextProvider::new()
            .with_max_files(2)
            .relevant_context(&request, &ws)
            .await
            .unwrap();
        assert_eq!(bundle.files.len(), 2);
    }

    #[test]
    fn confidence_thresholds() {
        assert_eq!(assess_confidence(2, 0, 2), Confidence::High);
        assert_eq!(assess_confidence(2, 0, 1), Confidence::Medium);
        assert_eq!(assess_confidence(4, 2, 0), Confidence::Medium);
        assert_eq!(assess_confidence(5, 4, 0), Confidence::Low);
        assert_eq!(assess_confidence(5, 5, 1), Confidence::Medium);
    }
}
