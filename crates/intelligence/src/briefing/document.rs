//! Briefing document — typed sections first, markdown last.
//!
//! [`BriefingDocument::build`] decides what goes in the briefing;
//! [`BriefingDocument::render_markdown`] decides how it looks. A section is
//! only ever built with at least one line, so the rendered markdown never
//! carries an empty header.

use arete_core::{
    Confidence, ContextBundle, ContextFile, ContextGap, EntityType, MemoryResult,
    MemorySearchResult, ProductPrimitive, ResolvedEntity,
};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Memory results shown in a briefing, regardless of how many were found.
pub const MEMORY_SECTION_LIMIT: usize = 5;

const SNIPPET_CHARS: usize = 80;

const LOW_CONFIDENCE_NOTE: &str = "**Note**: Low confidence indicates that limited relevant content was found for this task. Consider adding more context to the workspace or refining the task description.";

static MEMORY_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^###\s+(?:\d{4}-\d{2}-\d{2}:\s*)?(.+)").expect("static memory title pattern")
});

// ── Lines ──────────────────────────────────────────────────────────────────

/// One context file, listed under its primitive or under strategic context.
#[derive(Debug, Clone, PartialEq)]
pub struct FileLine {
    pub summary: Option<String>,
    pub source: String,
}

/// A missing piece of context and what to do about it.
#[derive(Debug, Clone, PartialEq)]
pub struct GapLine {
    pub description: String,
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryLine {
    pub label: String,
    pub date: Option<String>,
    pub title: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityLine {
    pub kind: EntityType,
    pub name: String,
    pub metadata: Vec<String>,
    pub path: String,
}

// ── Sections ───────────────────────────────────────────────────────────────

/// A briefing section, in the order it renders.
#[derive(Debug, Clone, PartialEq)]
pub enum BriefingSection {
    /// Files tagged with one primitive, plus that primitive's gap if any.
    Primitive {
        primitive: ProductPrimitive,
        files: Vec<FileLine>,
        gap: Option<GapLine>,
    },
    /// Files with no primitive tag.
    StrategicContext { files: Vec<FileLine> },
    RelevantMemory { items: Vec<MemoryLine> },
    ResolvedEntities { entities: Vec<EntityLine> },
    /// Every gap across all primitives.
    Gaps {
        gaps: Vec<GapLine>,
        low_confidence: bool,
    },
}

impl BriefingSection {
    pub fn title(&self) -> String {
        match self {
            Self::Primitive { primitive, .. } => primitive.to_string(),
            Self::StrategicContext { .. } => "Strategic Context".into(),
            Self::RelevantMemory { .. } => "Relevant Memory".into(),
            Self::ResolvedEntities { .. } => "Resolved Entities".into(),
            Self::Gaps { .. } => "Gaps".into(),
        }
    }

    fn render(&self, lines: &mut Vec<String>) {
        lines.push(format!("### {}", self.title()));
        match self {
            Self::Primitive { files, gap, .. } => {
                lines.extend(files.iter().map(render_file));
                if let Some(gap) = gap {
                    if !files.is_empty() {
                        lines.push(String::new());
                    }
                    lines.push(format!("**Gap**: {}", gap.description));
                    if let Some(suggestion) = &gap.suggestion {
                        lines.push(format!("  - Suggestion: {suggestion}"));
                    }
                }
            }
            Self::StrategicContext { files } => lines.extend(files.iter().map(render_file)),
            Self::RelevantMemory { items } => {
                for item in items {
                    let date = item
                        .date
                        .as_deref()
                        .map(|d| format!("[{d}] "))
                        .unwrap_or_default();
                    lines.push(format!(
                        "- **{}**: {date}{} — Source: `{}`",
                        item.label, item.title, item.source
                    ));
                }
            }
            Self::ResolvedEntities { entities } => {
                for entity in entities {
                    let meta = if entity.metadata.is_empty() {
                        String::new()
                    } else {
                        format!(" ({})", entity.metadata.join(", "))
                    };
                    lines.push(format!(
                        "- **{}**: {}{meta} — `{}`",
                        entity.kind, entity.name, entity.path
                    ));
                }
            }
            Self::Gaps {
                gaps,
                low_confidence,
            } => {
                lines.push("**What's missing that this task might need:**".into());
                for gap in gaps {
                    match &gap.suggestion {
                        Some(s) => lines.push(format!("- {} — Suggestion: {s}", gap.description)),
                        None => lines.push(format!("- {}", gap.description)),
                    }
                }
                if *low_confidence {
                    lines.push(String::new());
                    lines.push(LOW_CONFIDENCE_NOTE.into());
                }
            }
        }
        lines.push(String::new());
    }
}

// ── Document ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct BriefingHeader {
    pub task: String,
    pub assembled_at: DateTime<Utc>,
    pub skill: Option<String>,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BriefingDocument {
    pub header: BriefingHeader,
    pub sections: Vec<BriefingSection>,
}

impl BriefingDocument {
    /// Lay out the collected material as ordered sections.
    ///
    /// Order: one section per primitive in `context.primitives`, strategic
    /// context, relevant memory, resolved entities, gaps. Sections with
    /// nothing to show are left out.
    pub fn build(
        header: BriefingHeader,
        context: &ContextBundle,
        memory: &MemorySearchResult,
        entities: &[ResolvedEntity],
    ) -> Self {
        let mut sections = Vec::new();

        for &primitive in &context.primitives {
            let tagged: Vec<&ContextFile> = context
                .files
                .iter()
                .filter(|f| f.primitive == Some(primitive))
                .collect();
            let gap = context
                .gaps
                .iter()
                .find(|g| g.primitive == Some(primitive))
                .map(gap_line);
            if tagged.is_empty() && gap.is_none() {
                continue;
            }
            sections.push(BriefingSection::Primitive {
                primitive,
                files: file_lines(tagged),
                gap,
            });
        }

        let untagged: Vec<&ContextFile> =
            context.files.iter().filter(|f| f.primitive.is_none()).collect();
        if !untagged.is_empty() {
            sections.push(BriefingSection::StrategicContext {
                files: file_lines(untagged),
            });
        }

        if !memory.results.is_empty() {
            sections.push(BriefingSection::RelevantMemory {
                items: memory
                    .results
                    .iter()
                    .take(MEMORY_SECTION_LIMIT)
                    .map(memory_line)
                    .collect(),
            });
        }

        if !entities.is_empty() {
            sections.push(BriefingSection::ResolvedEntities {
                entities: entities.iter().map(entity_line).collect(),
            });
        }

        if !context.gaps.is_empty() {
            sections.push(BriefingSection::Gaps {
                gaps: context.gaps.iter().map(gap_line).collect(),
                low_confidence: header.confidence == Confidence::Low,
            });
        }

        Self { header, sections }
    }

    pub fn section(&self, title: &str) -> Option<&BriefingSection> {
        self.sections.iter().find(|s| s.title() == title)
    }

    pub fn render_markdown(&self) -> String {
        let h = &self.header;
        let mut lines = vec![
            format!("## Primitive Briefing: {}", h.task),
            String::new(),
            format!("**Assembled**: {}", h.assembled_at.format("%Y-%m-%d %H:%M")),
        ];
        if let Some(skill) = &h.skill {
            lines.push(format!("**Skill**: {skill}"));
        }
        lines.push(format!("**Confidence**: {}", h.confidence));
        lines.push(String::new());

        for section in &self.sections {
            section.render(&mut lines);
        }
        lines.join("\n")
    }
}

// ── Helpers ────────────────────────────────────────────────────────────────

/// Files by relevance, highest first; unscored files count as zero.
fn file_lines(mut files: Vec<&ContextFile>) -> Vec<FileLine> {
    files.sort_by(|a, b| {
        let (a, b) = (a.relevance_score.unwrap_or(0.0), b.relevance_score.unwrap_or(0.0));
        b.total_cmp(&a)
    });
    files
        .into_iter()
        .map(|f| FileLine {
            summary: f.summary.clone().filter(|s| !s.trim().is_empty()),
            source: f.relative_path.clone(),
        })
        .collect()
}

fn render_file(file: &FileLine) -> String {
    let summary = file.summary.as_deref().unwrap_or("(no summary)");
    format!("- {summary} — Source: `{}`", file.source)
}

fn gap_line(gap: &ContextGap) -> GapLine {
    GapLine {
        description: gap.description.clone(),
        suggestion: gap.suggestion.clone(),
    }
}

fn memory_line(result: &MemoryResult) -> MemoryLine {
    MemoryLine {
        label: result.kind.label().to_string(),
        date: result.date.clone(),
        title: memory_title(&result.content),
        source: result.source.clone(),
    }
}

/// Title of the first `### [date:] Title` heading, else a content snippet.
pub fn memory_title(content: &str) -> String {
    match MEMORY_TITLE.captures(content).and_then(|c| c.get(1)) {
        Some(m) => m.as_str().trim().to_string(),
        None => content.chars().take(SNIPPET_CHARS).collect(),
    }
}

fn entity_line(entity: &ResolvedEntity) -> EntityLine {
    EntityLine {
        kind: entity.kind,
        name: entity.name.clone(),
        metadata: entity
            .display_metadata()
            .into_iter()
            .map(str::to_string)
            .collect(),
        path: entity.path.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arete_core::{ContextCategory, MemoryKind};
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn header(confidence: Confidence) -> BriefingHeader {
        BriefingHeader {
            task: "Prep for Jane Doe meeting".into(),
            assembled_at: Utc.with_ymd_and_hms(2026, 2, 10, 9, 30, 12).unwrap(),
            skill: None,
            confidence,
        }
    }

    fn file(path: &str, primitive: Option<ProductPrimitive>, summary: Option<&str>, score: f32) -> ContextFile {
        ContextFile {
            relative_path: path.into(),
            category: ContextCategory::Context,
            primitive,
            summary: summary.map(str::to_string),
            relevance_score: Some(score),
        }
    }

    fn gap(primitive: ProductPrimitive) -> ContextGap {
        ContextGap {
            primitive: Some(primitive),
            description: format!("No substantive context found for {primitive} primitive"),
            suggestion: Some("Add competitive analysis".into()),
        }
    }

    fn bundle(files: Vec<ContextFile>, gaps: Vec<ContextGap>, confidence: Confidence) -> ContextBundle {
        ContextBundle {
            primitives: vec![ProductPrimitive::Problem, ProductPrimitive::User, ProductPrimitive::Market],
            files,
            gaps,
            confidence,
            ..ContextBundle::empty("task")
        }
    }

    fn memory(results: Vec<MemoryResult>) -> MemorySearchResult {
        MemorySearchResult {
            query: "task".into(),
            total: results.len(),
            results,
        }
    }

    fn decision(title: &str, date: Option<&str>) -> MemoryResult {
        let heading = match date {
            Some(d) => format!("### {d}: {title}"),
            None => format!("### {title}"),
        };
        MemoryResult {
            content: format!("{heading}\n\nBody."),
            source: "decisions.md".into(),
            kind: MemoryKind::Decisions,
            date: date.map(str::to_string),
            relevance: "Title matches".into(),
            score: 4,
        }
    }

    #[test]
    fn empty_inputs_render_header_only() {
        let doc = BriefingDocument::build(
            header(Confidence::Low),
            &ContextBundle::empty("task"),
            &memory(vec![]),
            &[],
        );
        assert!(doc.sections.is_empty());
        let md = doc.render_markdown();
        assert!(md.starts_with("## Primitive Briefing: Prep for Jane Doe meeting"));
        assert!(md.contains("**Assembled**: 2026-02-10 09:30"));
        assert!(md.contains("**Confidence**: Low"));
        assert!(!md.contains("###"));
        assert!(!md.contains("**Skill**"));
    }

    #[test]
    fn primitive_without_files_or_gap_is_omitted() {
        let ctx = bundle(
            vec![file("context/business-overview.md", Some(ProductPrimitive::Problem), Some("We sell widgets."), 0.5)],
            vec![],
            Confidence::Medium,
        );
        let doc = BriefingDocument::build(header(Confidence::Medium), &ctx, &memory(vec![]), &[]);
        let titles: Vec<String> = doc.sections.iter().map(BriefingSection::title).collect();
        assert_eq!(titles, vec!["Problem"]);
        assert!(!doc.render_markdown().contains("### User"));
    }

    #[test]
    fn sections_follow_fixed_order() {
        let ctx = bundle(
            vec![
                file("goals/strategy.md", None, Some("Grow revenue."), 0.5),
                file("context/users-personas.md", Some(ProductPrimitive::User), None, 0.5),
            ],
            vec![gap(ProductPrimitive::Market)],
            Confidence::Medium,
        );
        let jane = ResolvedEntity {
            kind: EntityType::Person,
            path: "people/internal/jane-doe.md".into(),
            name: "Jane Doe".into(),
            slug: "jane-doe".into(),
            metadata: BTreeMap::from([("role".to_string(), "PM".to_string())]),
            score: 100,
        };
        let doc = BriefingDocument::build(
            header(Confidence::Medium),
            &ctx,
            &memory(vec![decision("Onboarding redesign", Some("2026-01-20"))]),
            &[jane],
        );
        let titles: Vec<String> = doc.sections.iter().map(BriefingSection::title).collect();
        assert_eq!(
            titles,
            vec!["User", "Market", "Strategic Context", "Relevant Memory", "Resolved Entities", "Gaps"]
        );

        let md = doc.render_markdown();
        assert!(md.contains("- (no summary) — Source: `context/users-personas.md`"));
        assert!(md.contains("- Grow revenue. — Source: `goals/strategy.md`"));
        assert!(md.contains("- **Decisions**: [2026-01-20] Onboarding redesign — Source: `decisions.md`"));
        assert!(md.contains("- **person**: Jane Doe (PM) — `people/internal/jane-doe.md`"));
        assert!(md.contains("**Gap**: No substantive context found for Market primitive"));
        assert!(md.contains("  - Suggestion: Add competitive analysis"));
    }

    #[test]
    fn files_sorted_by_relevance_within_primitive() {
        let ctx = bundle(
            vec![
                file("people/users/a.md", Some(ProductPrimitive::User), Some("Low"), 0.2),
                file("context/users-personas.md", Some(ProductPrimitive::User), Some("High"), 0.9),
            ],
            vec![],
            Confidence::High,
        );
        let doc = BriefingDocument::build(header(Confidence::High), &ctx, &memory(vec![]), &[]);
        let Some(BriefingSection::Primitive { files, .. }) = doc.section("User") else {
            panic!("missing User section");
        };
        assert_eq!(files[0].source, "context/users-personas.md");
    }

    #[test]
    fn memory_section_caps_at_five() {
        let results = (1..=7)
            .map(|i| decision(&format!("Decision {i}"), None))
            .collect();
        let doc = BriefingDocument::build(
            header(Confidence::Low),
            &ContextBundle::empty("task"),
            &memory(results),
            &[],
        );
        let Some(BriefingSection::RelevantMemory { items }) = doc.section("Relevant Memory") else {
            panic!("missing memory section");
        };
        assert_eq!(items.len(), 5);
        assert!(doc.render_markdown().contains("- **Decisions**: Decision 1 — Source"));
    }

    #[test]
    fn blank_summary_renders_as_missing() {
        let ctx = bundle(
            vec![file("context/business-overview.md", Some(ProductPrimitive::Problem), Some(""), 0.5)],
            vec![],
            Confidence::Medium,
        );
        let md = BriefingDocument::build(header(Confidence::Medium), &ctx, &memory(vec![]), &[])
            .render_markdown();
        assert!(md.contains("- (no summary) — Source: `context/business-overview.md`"));
    }

    #[test]
    fn memory_title_falls_back_to_snippet() {
        assert_eq!(memory_title("### 2026-01-15: Use Elasticsearch\nbody"), "Use Elasticsearch");
        let long = "x".repeat(120);
        assert_eq!(memory_title(&long).len(), 80);
    }

    #[test]
    fn low_confidence_gaps_carry_note() {
        let ctx = bundle(vec![], vec![gap(ProductPrimitive::Problem)], Confidence::Low);
        let md = BriefingDocument::build(header(Confidence::Low), &ctx, &memory(vec![]), &[])
            .render_markdown();
        assert!(md.contains("### Gaps\n**What's missing that this task might need:**"));
        assert!(md.contains("- No substantive context found for Problem primitive — Suggestion: Add competitive analysis"));
        assert!(md.contains("**Note**: Low confidence"));
    }

    #[test]
    fn rendered_headers_always_have_content() {
        let ctx = bundle(vec![], vec![gap(ProductPrimitive::User)], Confidence::Low);
        let md = BriefingDocument::build(header(Confidence::Low), &ctx, &memory(vec![]), &[])
            .render_markdown();
        let lines: Vec<&str> = md.lines().collect();
        for (i, line) in lines.iter().enumerate() {
            if line.starts_with("### ") {
                let next = lines.get(i + 1).copied().unwrap_or("");
                assert!(!next.is_empty() && !next.starts_with('#'), "empty section: {line}");
            }
        }
    }
}
