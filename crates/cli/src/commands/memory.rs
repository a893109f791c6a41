//! `arete memory` — Memory search.

use arete_core::{MemoryKind, MemorySearchOptions};
use arete_intelligence::briefing::document::memory_title;
use arete_memory::{FileMemoryStore, search_memory};
use std::path::PathBuf;

use super::{Session, print_json};

pub async fn search(
    workspace: Option<PathBuf>,
    query: &str,
    types: Vec<MemoryKind>,
    limit: Option<usize>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(workspace)?;
    let paths = session.require_workspace()?;

    let store = FileMemoryStore::for_workspace(paths);
    let options = MemorySearchOptions {
        kinds: types,
        limit: limit.unwrap_or(session.config.memory.default_limit),
    };
    let result = search_memory(query, &store, &options).await;

    if json {
        return print_json(&result);
    }

    println!("🔍 Memory search: \"{query}\"");
    if result.results.is_empty() {
        println!("   No matching memory.");
        return Ok(());
    }
    println!("   Showing {} of {} matches", result.results.len(), result.total);
    println!();
    for (i, item) in result.results.iter().enumerate() {
        let date = item.date.as_deref().unwrap_or("undated");
        println!(
            "  {:>2}. [{}] {date} — {}",
            i + 1,
            item.kind.label(),
            memory_title(&item.content)
        );
        println!("      {} (score: {}, {})", item.relevance, item.score, item.source);
    }

    Ok(())
}
