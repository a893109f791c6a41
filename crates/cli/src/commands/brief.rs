//! `arete brief` — Assemble a primitive briefing.

use arete_context::{FileContextProvider, FileEntityResolver};
use arete_core::{ProductPrimitive, WorkType};
use arete_intelligence::{BriefingAssembler, BriefingOptions};
use arete_memory::FileMemoryStore;
use std::path::PathBuf;
use std::sync::Arc;

use super::{Session, print_json};

pub async fn run(
    workspace: Option<PathBuf>,
    task: &str,
    skill: Option<String>,
    primitives: Vec<ProductPrimitive>,
    work_type: Option<WorkType>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(workspace)?;
    let paths = session.require_workspace()?;

    let assembler = BriefingAssembler::new(
        Arc::new(FileContextProvider::new().with_max_files(session.config.context.max_files)),
        Arc::new(FileMemoryStore::for_workspace(paths)),
        Arc::new(FileEntityResolver::new()),
    )
    .with_memory_limit(session.config.briefing.memory_limit)
    .with_entity_limit(session.config.briefing.entity_limit);

    let options = BriefingOptions {
        primitives,
        work_type,
        skill,
    };
    let briefing = assembler.assemble_briefing(task, paths, options).await?;

    if json {
        return print_json(&briefing);
    }
    println!("{}", briefing.markdown);
    Ok(())
}
