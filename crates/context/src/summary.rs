//! Text heuristics over workspace markdown: summaries, placeholder
//! detection, and query overlap.

use arete_core::frontmatter;

/// Summaries longer than this are cut and suffixed with `...`.
pub const MAX_SUMMARY_CHARS: usize = 300;

/// Substantive text shorter than this marks a file as a placeholder.
const MIN_SUBSTANTIVE_CHARS: usize = 20;

const PLACEHOLDER_MARKERS: [&str; 3] = ["TODO", "[Add ", "Add your "];

/// First non-heading paragraph after any frontmatter.
pub fn extract_summary(content: &str) -> Option<String> {
    let mut paragraph: Vec<&str> = Vec::new();
    for line in frontmatter::body(content).lines() {
        let line = line.trim();
        if line.is_empty() {
            if !paragraph.is_empty() {
                break;
            }
        } else if !line.starts_with('#') {
            paragraph.push(line);
        }
    }
    if paragraph.is_empty() {
        return None;
    }
    Some(truncate(&paragraph.join(" ")))
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_SUMMARY_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(MAX_SUMMARY_CHARS - 3).collect();
    format!("{cut}...")
}

/// Whether a file holds only template scaffolding.
pub fn is_placeholder(content: &str) -> bool {
    let text: Vec<&str> = frontmatter::body(content)
        .lines()
        .filter(|line| !is_heading(line))
        .collect();
    let text = text.join("\n");
    let text = text.trim();
    text.chars().count() < MIN_SUBSTANTIVE_CHARS
        || PLACEHOLDER_MARKERS.iter().any(|marker| text.contains(marker))
}

fn is_heading(line: &str) -> bool {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    hashes > 0 && line[hashes..].starts_with(char::is_whitespace)
}

/// Whether any query token occurs in `text`, case-insensitively.
pub fn has_token_overlap(text: &str, tokens: &[String]) -> bool {
    let lower = text.to_lowercase();
    tokens.iter().any(|t| lower.contains(t.as_str()))
}
