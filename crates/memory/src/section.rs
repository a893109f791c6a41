//! Memory document parsing.
//!
//! A section starts at a line matching `### [YYYY-MM-DD: ]Title` and runs
//! until the next such heading or EOF. Text before the first heading (the
//! `# Decisions` preamble) belongs to no section.

use arete_core::memory::MemorySection;
use regex::Regex;
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^###\s+(?:(\d{4}-\d{2}-\d{2}):\s*)?(.+)$").expect("static heading pattern")
});

/// Parsed heading line: `(date, title)`.
pub fn parse_heading(line: &str) -> Option<(Option<String>, String)> {
    let caps = HEADING.captures(line.trim_end())?;
    let date = caps.get(1).map(|m| m.as_str().to_string());
    let title = caps.get(2)?.as_str().trim().to_string();
    Some((date, title))
}

/// Split a memory document into its sections, in document order.
pub fn parse_sections(text: &str) -> Vec<MemorySection> {
    let mut sections = Vec::new();
    let mut current: Option<(Option<String>, String, String, Vec<&str>)> = None;

    for line in text.lines() {
        if let Some((date, title)) = parse_heading(line) {
            if let Some(open) = current.take() {
                sections.push(finish(open));
            }
            current = Some((date, title, line.trim_end().to_string(), Vec::new()));
        } else if let Some((_, _, _, body)) = current.as_mut() {
            body.push(line);
        }
    }
    if let Some(open) = current {
        sections.push(finish(open));
    }
    sections
}

fn finish((date, title, heading, body_lines): (Option<String>, String, String, Vec<&str>)) -> MemorySection {
    let body = body_lines.join("\n").trim().to_string();
    let raw = if body.is_empty() {
        heading
    } else {
        format!("{heading}\n\n{body}")
    };
    MemorySection {
        title,
        date,
        body,
        raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECISIONS: &str = "# Decisions\n\nPreamble text.\n\n### 2026-01-15: Use Elasticsearch for search\n\n**Context**: We needed a search solution.\n**Decision**: Elasticsearch.\n\n### Undated insight\nBody line.\n";

    #[test]
    fn splits_on_level_three_headings() {
        let sections = parse_sections(DECISIONS);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Use Elasticsearch for search");
        assert_eq!(sections[0].date.as_deref(), Some("2026-01-15"));
        assert!(sections[0].body.starts_with("**Context**"));
        assert!(sections[0].raw.starts_with("### 2026-01-15: Use Elasticsearch"));
    }

    #[test]
    fn undated_heading_has_no_date() {
        let sections = parse_sections(DECISIONS);
        assert_eq!(sections[1].title, "Undated insight");
        assert_eq!(sections[1].date, None);
        assert_eq!(sections[1].body, "Body line.");
    }

    #[test]
    fn preamble_is_not_a_section() {
        let sections = parse_sections(DECISIONS);
        assert!(sections.iter().all(|s| !s.body.contains("Preamble")));
    }

    #[test]
    fn deeper_headings_stay_in_body() {
        let sections = parse_sections("### Parent\n#### Child detail\ntext\n");
        assert_eq!(sections.len(), 1);
        assert!(sections[0].body.contains("#### Child detail"));
    }

    #[test]
    fn heading_with_bare_date_keeps_it_as_title() {
        assert_eq!(
            parse_heading("### 2026-02-01:"),
            Some((None, "2026-02-01:".to_string()))
        );
        assert_eq!(parse_heading("## Not a section"), None);
    }

    #[test]
    fn empty_document_has_no_sections() {
        assert!(parse_sections("").is_empty());
        assert!(parse_sections("# Learnings\n\nNothing yet.").is_empty());
    }
}
