//! Section scoring against query tokens.
//!
//! Per query token (duplicates included): `+3` if it is a substring of the
//! lowercased title, else `+1` if it is a substring of the lowercased body.
//! When more than one query token occurs anywhere in title + body, the
//! count of such tokens is added again as a multi-term bonus.

use arete_core::memory::MemorySection;

pub const TITLE_WEIGHT: u32 = 3;
pub const BODY_WEIGHT: u32 = 1;

/// Score of one section plus the tokens credited to title and body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionScore {
    pub score: u32,
    /// Unique tokens matched in the title, in query order.
    pub title_matches: Vec<String>,
    /// Unique tokens matched only in the body, in query order.
    pub body_matches: Vec<String>,
}

impl SectionScore {
    /// Human-readable explanation of the score.
    pub fn relevance(&self) -> String {
        let mut parts = Vec::new();
        if !self.title_matches.is_empty() {
            parts.push(format!("Title matches: {}", self.title_matches.join(", ")));
        }
        if !self.body_matches.is_empty() {
            parts.push(format!("Body matches: {}", self.body_matches.join(", ")));
        }
        if parts.is_empty() {
            "Token match".to_string()
        } else {
            parts.join("; ")
        }
    }
}

pub fn score_section(section: &MemorySection, tokens: &[String]) -> SectionScore {
    let title = section.title.to_lowercase();
    let body = section.body.to_lowercase();
    let combined = format!("{title} {body}");

    let mut result = SectionScore::default();
    for token in tokens {
        if title.contains(token.as_str()) {
            result.score += TITLE_WEIGHT;
            push_unique(&mut result.title_matches, token);
        } else if body.contains(token.as_str()) {
            result.score += BODY_WEIGHT;
            push_unique(&mut result.body_matches, token);
        }
    }

    let overlap = tokens
        .iter()
        .filter(|t| combined.contains(t.as_str()))
        .count() as u32;
    if overlap > 1 {
        result.score += overlap;
    }
    result
}

fn push_unique(list: &mut Vec<String>, token: &str) {
    if !list.iter().any(|t| t == token) {
        list.push(token.to_string());
    }
}
