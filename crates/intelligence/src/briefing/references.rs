//! Entity-reference extraction from free-text task descriptions.
//!
//! Two heuristics, applied in order:
//! 1. Quoted substrings (`"..."` or `'...'`) are taken verbatim.
//! 2. Runs of consecutive capitalized words form one reference, unless the
//!    word is a common sentence starter or verb ("Plan", "Review", ...),
//!    which ends the run instead.
//!
//! The result is deduplicated in first-seen order and drops one-character
//! references.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)"|'([^']+)'"#).expect("static quote pattern"));

/// Capitalized words that start sentences or name actions, never entities.
const SKIP_WORDS: &[&str] = &[
    "I", "A", "The", "This", "That", "What", "How", "When", "Where", "Why", "Create", "Build",
    "Start", "Run", "Help", "Prep", "Plan", "Review", "Write", "Make", "Do", "Set", "Get", "Find",
    "Show", "Update", "For", "With", "About", "From", "Into", "Before", "After",
];

/// Candidate entity names mentioned in `task`, in order of appearance.
pub fn extract_entity_references(task: &str) -> Vec<String> {
    let mut refs: Vec<String> = QUOTED
        .find_iter(task)
        .map(|m| m.as_str().replace(['"', '\''], ""))
        .collect();

    let mut run: Vec<String> = Vec::new();
    for raw in task.split_whitespace() {
        let word: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphabetic() || *c == '\'' || *c == '-')
            .collect();

        if starts_capitalized(&word) && !SKIP_WORDS.contains(&word.as_str()) {
            run.push(word);
            continue;
        }
        flush(&mut run, &mut refs);
    }
    flush(&mut run, &mut refs);

    let mut seen = HashSet::new();
    refs.into_iter()
        .filter(|r| r.chars().count() > 1)
        .filter(|r| seen.insert(r.clone()))
        .collect()
}

fn starts_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

fn flush(run: &mut Vec<String>, refs: &mut Vec<String>) {
    if !run.is_empty() {
        refs.push(run.join(" "));
        run.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_and_unquoted_mentions_dedupe() {
        let refs = extract_entity_references(r#"Prep for "Jane Doe" meeting with Jane Doe"#);
        assert_eq!(refs, vec!["Jane Doe"]);
    }

    #[test]
    fn single_quotes_are_references_too() {
        let refs = extract_entity_references("summarize 'search revamp' notes");
        assert_eq!(refs, vec!["search revamp"]);
    }

    #[test]
    fn skip_words_break_runs() {
        let refs = extract_entity_references("Plan Acme Corp onboarding Before Launch Day");
        assert_eq!(refs, vec!["Acme Corp", "Launch Day"]);
    }

    #[test]
    fn leading_skip_word_is_not_a_reference() {
        assert!(extract_entity_references("Create a PRD for checkout").contains(&"PRD".to_string()));
        assert!(extract_entity_references("Review the plan").is_empty());
    }

    #[test]
    fn punctuation_is_stripped_from_words() {
        let refs = extract_entity_references("Meeting prep: Jane Doe, Bob Smith.");
        assert_eq!(refs, vec!["Meeting", "Jane Doe Bob Smith"]);
    }

    #[test]
    fn numbers_end_a_run() {
        let refs = extract_entity_references("Acme 2026 Roadmap");
        assert_eq!(refs, vec!["Acme", "Roadmap"]);
    }

    #[test]
    fn single_letters_are_dropped() {
        assert_eq!(extract_entity_references("Option B is better"), vec!["Option B"]);
        assert!(!extract_entity_references("x Q y").contains(&"Q".to_string()));
    }

    #[test]
    fn lowercase_task_has_no_references() {
        assert!(extract_entity_references("prepare for the weekly sync").is_empty());
        assert!(extract_entity_references("").is_empty());
    }
}
