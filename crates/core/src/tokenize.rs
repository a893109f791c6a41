//! Shared query tokenizer.
//!
//! Lowercases, replaces everything that is not a word character, whitespace
//! or hyphen with a space, splits on whitespace, then drops single-character
//! tokens and stop words. Order is preserved and duplicates are kept: the
//! scorers downstream count repeated tokens on purpose.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Words that carry no retrieval signal: articles, pronouns, and the
/// imperative verbs users open almost every request with.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "for", "with", "my", "me", "i", "to", "and", "or", "is", "it", "in", "on",
    "at", "of", "this", "that", "what", "how", "can", "you", "please", "want", "need", "create",
    "build", "start", "run", "do", "help",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

/// Returns `true` if `word` (already lowercased) is a stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORD_SET.contains(word)
}

/// Tokenize free text for scoring.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if is_word_char(c) || c.is_whitespace() || c == '-' { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|t| t.chars().count() > 1 && !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

/// Word characters: letters, digits, underscore.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
