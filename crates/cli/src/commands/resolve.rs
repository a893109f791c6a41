//! `arete resolve` — Map a reference to workspace entities.

use arete_context::FileEntityResolver;
use arete_core::{EntityResolver, EntityType};
use std::path::PathBuf;

use super::{Session, print_json};

const DEFAULT_LIMIT: usize = 5;

pub async fn run(
    workspace: Option<PathBuf>,
    reference: &str,
    kind: EntityType,
    limit: Option<usize>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(workspace)?;
    let paths = session.require_workspace()?;

    let entities = FileEntityResolver::new()
        .resolve_entities(reference, kind, paths, limit.unwrap_or(DEFAULT_LIMIT))
        .await?;

    if json {
        return print_json(&entities);
    }

    if entities.is_empty() {
        println!("No matches for \"{reference}\" (type: {kind})");
        return Ok(());
    }
    for entity in &entities {
        let meta = entity.display_metadata();
        let meta = if meta.is_empty() {
            String::new()
        } else {
            format!(" ({})", meta.join(", "))
        };
        println!("  [{}] {}{meta} — {}", entity.kind, entity.name, entity.path);
        println!("      score: {}", entity.score);
    }
    Ok(())
}
