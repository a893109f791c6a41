//! Memory search — rank sections from every requested store.
//!
//! 1. Tokenize the query; no tokens means an empty result, not an error.
//! 2. Load each requested store once, in store order (missing or
//!    unreadable ⇒ skipped).
//! 3. Parse sections and score them; zero scores are dropped.
//! 4. Sort by score descending, then date descending (undated last on ties).
//! 5. Record `total`, then truncate to `limit`.

use arete_core::memory::{MemoryKind, MemoryResult, MemorySearchOptions, MemorySearchResult, MemoryStore};
use arete_core::tokenize;
use tracing::{debug, warn};

use crate::scoring::score_section;
use crate::section::parse_sections;

/// Search `store` for sections matching `query`.
///
/// Never fails: store errors are logged and treated as absent documents.
pub async fn search_memory(
    query: &str,
    store: &dyn MemoryStore,
    options: &MemorySearchOptions,
) -> MemorySearchResult {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        debug!(query, "Memory query has no searchable tokens");
        return MemorySearchResult::empty(query);
    }

    let kinds = MemoryKind::ALL
        .into_iter()
        .filter(|kind| options.kinds.is_empty() || options.kinds.contains(kind));

    let mut results = Vec::new();
    for kind in kinds {
        let text = match store.load(kind).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!(store = store.name(), kind = %kind, "Memory store not present, skipping");
                continue;
            }
            Err(e) => {
                warn!(store = store.name(), kind = %kind, error = %e, "Skipping unreadable memory store");
                continue;
            }
        };

        let source = store.source_id(kind);
        for section in parse_sections(&text) {
            let scored = score_section(&section, &tokens);
            if scored.score == 0 {
                continue;
            }
            results.push(MemoryResult {
                relevance: scored.relevance(),
                content: section.raw,
                source: source.clone(),
                kind,
                date: section.date,
                score: scored.score,
            });
        }
    }

    results.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| date_key(b).cmp(date_key(a)))
    });

    let total = results.len();
    results.truncate(options.limit);
    debug!(query, total, returned = results.len(), "Memory search complete");

    MemorySearchResult {
        query: query.to_string(),
        results,
        total,
    }
}

fn date_key(result: &MemoryResult) -> &str {
    result.date.as_deref().unwrap_or("")
}
