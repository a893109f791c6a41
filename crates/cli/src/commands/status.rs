//! `arete status` — Show workspace and configuration status.

use arete_config::AppConfig;
use arete_core::MemoryKind;
use arete_memory::FileMemoryStore;
use arete_skills::SkillCatalog;
use std::path::PathBuf;

use super::Session;

pub async fn run(workspace: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(workspace)?;

    println!("🧭 Arete Status");
    println!("===============");
    println!("  Config dir:   {}", AppConfig::config_dir().display());

    let Some(paths) = &session.workspace else {
        println!("  Workspace:    (none found)");
        println!("\n  ⚠️  Not inside an Arete workspace — pass --workspace or set ARETE_WORKSPACE");
        return Ok(());
    };
    println!("  Workspace:    {}", paths.root.display());

    let store = FileMemoryStore::for_workspace(paths);
    for kind in MemoryKind::ALL {
        let present = if store.path_for(kind).exists() { "present" } else { "missing" };
        println!("  {:<13} {present}", format!("{}:", kind.label()));
    }

    let catalog = SkillCatalog::discover(paths).await?;
    let tools = catalog
        .candidates()
        .iter()
        .filter(|c| matches!(c, arete_core::SkillCandidate::Tool(_)))
        .count();
    println!("  Skills:       {}", catalog.len() - tools);
    println!("  Tools:        {tools}");
    println!("  Defaults:     {}", session.config.skills.defaults.len());

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `arete config init` to create one");
    }

    Ok(())
}
