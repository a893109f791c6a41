//! `arete route` — Pick the skill or tool for a request.

use arete_core::{RouteAction, RoutedSkill};
use arete_skills::{SkillCatalog, TierSuggestion, apply_skill_defaults, classify_task, route_to_skill};
use serde::Serialize;
use std::path::PathBuf;

use super::{Session, print_json};

#[derive(Serialize)]
struct RouteOutput<'a> {
    query: &'a str,
    skill: Option<RoutedSkill>,
    model: TierSuggestion,
}

pub async fn run(
    workspace: Option<PathBuf>,
    query: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(workspace)?;

    let routed = match &session.workspace {
        Some(paths) => {
            let catalog = SkillCatalog::discover(paths).await?;
            tracing::debug!(candidates = catalog.len(), "Routing against workspace catalog");
            route_to_skill(query, catalog.candidates())
                .map(|r| apply_skill_defaults(r, &catalog, &session.config.skills.defaults))
        }
        None => None,
    };

    let model = classify_task(query);

    if json {
        return print_json(&RouteOutput {
            query: query.trim(),
            skill: routed,
            model,
        });
    }

    match &routed {
        Some(r) => print_route(r),
        None => println!("no match"),
    }
    println!("   Model:   {} ({})", model.tier, model.reason);
    Ok(())
}

fn print_route(r: &RoutedSkill) {
    let verb = match r.action {
        RouteAction::Load => "Load skill",
        RouteAction::Activate => "Activate tool",
    };
    println!("🧭 {verb}: {}", r.skill);
    println!("   Path:    {}", r.path);
    println!("   Reason:  {}", r.reason);
    if let Some(from) = &r.resolved_from {
        println!("   Default: routed from {from}");
    }
    if !r.primitives.is_empty() {
        let names: Vec<String> = r.primitives.iter().map(ToString::to_string).collect();
        println!("   Primitives: {}", names.join(", "));
    }
    if let Some(lifecycle) = r.lifecycle {
        match &r.duration {
            Some(d) => println!("   Lifecycle:  {lifecycle} ({d})"),
            None => println!("   Lifecycle:  {lifecycle}"),
        }
    }
    if r.requires_briefing == Some(true) {
        println!("   Run `arete brief --for \"...\" --skill {}` first", r.skill);
    }
}
