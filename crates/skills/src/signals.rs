//! Routing signals — one function per additive scoring rule.
//!
//! The weights are empirical tuning knobs. Only the relative order of the
//! final scores matters.

use arete_core::skill::{SkillCategory, WorkType};
use arete_core::tokenize;
use std::collections::HashSet;

pub const ID_MATCH: u32 = 20;
pub const SLUG_MATCH: u32 = 15;
pub const TRIGGER_MATCH: u32 = 18;
pub const DESCRIPTION_TOKEN: u32 = 4;
pub const DESCRIPTION_CHUNK: u32 = 10;
pub const WORK_TYPE_MATCH: u32 = 6;
pub const ESSENTIAL_CATEGORY: u32 = 2;
pub const DEFAULT_CATEGORY: u32 = 1;

/// Description boilerplate that carries no intent.
const BOILERPLATE: &str = "use when the user wants to";

/// Minimum length of a description chunk worth matching.
const MIN_CHUNK_LEN: usize = 5;

/// A query prepared once and scored against every candidate.
#[derive(Debug, Clone)]
pub struct QueryTerms {
    /// Lowercased, trimmed query text.
    pub text: String,
    pub tokens: Vec<String>,
    token_set: HashSet<String>,
}

impl QueryTerms {
    pub fn new(query: &str) -> Self {
        let text = query.trim().to_lowercase();
        let tokens = tokenize(&text);
        let token_set = tokens.iter().cloned().collect();
        Self {
            text,
            tokens,
            token_set,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn has_token(&self, word: &str) -> bool {
        self.token_set.contains(word)
    }
}

/// `+20` when the id and the query name each other.
///
/// The id is compared with hyphens read as spaces: the query contains it,
/// it contains the whole joined query, or it contains any single token.
pub fn id_score(query: &QueryTerms, id: &str) -> u32 {
    let normalized = id.to_lowercase().replace('-', " ");
    if normalized.is_empty() {
        return 0;
    }
    let joined = query.tokens.join(" ");
    let matched = query.text.contains(&normalized)
        || normalized.contains(&joined)
        || query.tokens.iter().any(|t| normalized.contains(t.as_str()));
    if matched { ID_MATCH } else { 0 }
}

/// `+15` when the query, written as a slug, contains the raw id.
pub fn slug_score(query: &QueryTerms, id: &str) -> u32 {
    let id = id.to_lowercase();
    if id.is_empty() {
        return 0;
    }
    let slug = query.text.split_whitespace().collect::<Vec<_>>().join("-");
    if slug.contains(&id) { SLUG_MATCH } else { 0 }
}

/// `+18` per trigger phrase found verbatim or as whole words in the query.
///
/// Whole-word matching uses the token set, so a trigger word never matches
/// inside a longer query word ("prep" is not in "prepare").
pub fn trigger_score(query: &QueryTerms, triggers: &[String]) -> u32 {
    triggers
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|phrase| !phrase.is_empty())
        .filter(|phrase| {
            query.text.contains(phrase.as_str())
                || phrase.split_whitespace().all(|word| query.has_token(word))
        })
        .map(|_| TRIGGER_MATCH)
        .sum()
}

/// `+4` per query token that also occurs among the description tokens.
pub fn description_overlap_score(query: &QueryTerms, description: &str) -> u32 {
    let description_tokens: HashSet<String> = tokenize(&description.to_lowercase()).into_iter().collect();
    let overlap = query
        .tokens
        .iter()
        .filter(|t| description_tokens.contains(t.as_str()))
        .count() as u32;
    overlap * DESCRIPTION_TOKEN
}

/// `+10` per description chunk whose every token appears in the query text.
///
/// Chunks are the comma/period-separated phrases of the description with
/// the "use when the user wants to" boilerplate removed. A chunk needs at
/// least five characters and two tokens to count.
pub fn description_chunk_score(query: &QueryTerms, description: &str) -> u32 {
    description_chunks(description)
        .iter()
        .filter(|chunk| {
            let words = tokenize(chunk);
            words.len() >= 2 && words.iter().all(|w| query.text.contains(w.as_str()))
        })
        .map(|_| DESCRIPTION_CHUNK)
        .sum()
}

/// `+6` when any query token is one of the work type's intent keywords.
pub fn work_type_score(query: &QueryTerms, work_type: Option<WorkType>) -> u32 {
    let Some(work_type) = work_type else {
        return 0;
    };
    let keywords = work_type.keywords();
    if query.tokens.iter().any(|t| keywords.contains(&t.as_str())) {
        WORK_TYPE_MATCH
    } else {
        0
    }
}

/// Small bonus that breaks ties in favour of bundled skills.
pub fn category_score(category: Option<SkillCategory>) -> u32 {
    match category {
        Some(SkillCategory::Essential) => ESSENTIAL_CATEGORY,
        Some(SkillCategory::Default) => DEFAULT_CATEGORY,
        Some(SkillCategory::Community) | None => 0,
    }
}

pub(crate) fn description_chunks(description: &str) -> Vec<String> {
    description
        .to_lowercase()
        .replace(BOILERPLATE, "")
        .split([',', '.'])
        .map(str::trim)
        .filter(|chunk| chunk.chars().count() >= MIN_CHUNK_LEN)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(text: &str) -> QueryTerms {
        QueryTerms::new(text)
    }

    #[test]
    fn id_matches_on_any_query_token() {
        assert_eq!(id_score(&q("prep me for my meeting"), "meeting-prep"), ID_MATCH);
        assert_eq!(id_score(&q("what is the weather"), "meeting-prep"), 0);
    }

    #[test]
    fn id_matches_when_query_contains_normalized_id() {
        assert_eq!(id_score(&q("make a daily plan"), "daily-plan"), ID_MATCH);
    }

    #[test]
    fn slug_matches_hyphenated_query() {
        assert_eq!(slug_score(&q("daily plan"), "daily-plan"), SLUG_MATCH);
        assert_eq!(slug_score(&q("onboarding at my new company"), "onboarding"), SLUG_MATCH);
        assert_eq!(slug_score(&q("plan my day"), "daily-plan"), 0);
    }

    #[test]
    fn trigger_matches_verbatim_phrase() {
        let triggers = vec!["I'm starting a new job".to_string()];
        assert_eq!(trigger_score(&q("I'm starting a new job"), &triggers), TRIGGER_MATCH);
    }

    #[test]
    fn trigger_matches_whole_words_in_any_order() {
        let triggers = vec!["meeting prep".to_string()];
        assert_eq!(trigger_score(&q("prep me for my meeting with Jane"), &triggers), TRIGGER_MATCH);
    }

    #[test]
    fn trigger_word_does_not_match_inside_longer_word() {
        let triggers = vec!["prep for meeting".to_string()];
        assert_eq!(
            trigger_score(&q("prepare a meeting agenda for the kickoff call"), &triggers),
            0
        );
    }

    #[test]
    fn each_matching_trigger_counts() {
        let triggers = vec!["give me a tour".to_string(), "tour of".to_string(), String::new()];
        assert_eq!(
            trigger_score(&q("give me a tour of the workspace"), &triggers),
            2 * TRIGGER_MATCH
        );
    }

    #[test]
    fn description_overlap_counts_query_tokens() {
        let desc = "Build a prep brief before a meeting";
        assert_eq!(description_overlap_score(&q("prep for meeting"), desc), 2 * DESCRIPTION_TOKEN);
    }

    #[test]
    fn boilerplate_is_stripped_from_chunks() {
        let chunks = description_chunks(
            "Build a prep brief. Use when the user wants to prepare for a meeting, get context before a call.",
        );
        assert_eq!(
            chunks,
            vec!["build a prep brief", "prepare for a meeting", "get context before a call"]
        );
    }

    #[test]
    fn chunk_matches_when_all_tokens_appear_in_query() {
        let desc = "Capture a conversation, summarize notes";
        assert_eq!(
            description_chunk_score(&q("capture this conversation"), desc),
            DESCRIPTION_CHUNK
        );
        assert_eq!(description_chunk_score(&q("capture this"), desc), 0);
    }

    #[test]
    fn single_token_chunks_never_score() {
        assert_eq!(description_chunk_score(&q("contribute"), "Learn, contribute, lead"), 0);
    }

    #[test]
    fn work_type_keyword_bonus() {
        assert_eq!(work_type_score(&q("roadmap planning"), Some(WorkType::Planning)), WORK_TYPE_MATCH);
        assert_eq!(work_type_score(&q("roadmap planning"), Some(WorkType::Delivery)), 0);
        assert_eq!(work_type_score(&q("roadmap planning"), None), 0);
    }

    #[test]
    fn category_bonus_favours_essential() {
        assert_eq!(category_score(Some(SkillCategory::Essential)), 2);
        assert_eq!(category_score(Some(SkillCategory::Default)), 1);
        assert_eq!(category_score(Some(SkillCategory::Community)), 0);
    }
}
