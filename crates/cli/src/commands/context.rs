//! `arete context` — Files and gaps behind a query.

use arete_context::FileContextProvider;
use arete_core::{ContextProvider, ContextRequest, ProductPrimitive};
use std::path::PathBuf;

use super::{Session, print_json};

pub async fn run(
    workspace: Option<PathBuf>,
    query: &str,
    primitives: Vec<ProductPrimitive>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(workspace)?;
    let paths = session.require_workspace()?;

    let provider = FileContextProvider::new().with_max_files(session.config.context.max_files);
    let request = ContextRequest {
        query: query.to_string(),
        primitives,
        work_type: None,
    };
    let bundle = provider.relevant_context(&request, paths).await?;

    if json {
        return print_json(&bundle);
    }

    println!("📚 Context for: \"{query}\"");
    println!("   Confidence: {}", bundle.confidence);
    println!();
    if bundle.files.is_empty() {
        println!("   No context files found.");
    }
    for file in &bundle.files {
        let tag = file
            .primitive
            .map(|p| p.to_string())
            .unwrap_or_else(|| "Strategy".into());
        println!("  [{tag:<8}] {}", file.relative_path);
        if let Some(summary) = &file.summary {
            println!("             {summary}");
        }
    }
    if !bundle.gaps.is_empty() {
        println!();
        println!("   Gaps:");
        for gap in &bundle.gaps {
            println!("   ⚠️  {}", gap.description);
            if let Some(s) = &gap.suggestion {
                println!("       {s}");
            }
        }
    }
    Ok(())
}
