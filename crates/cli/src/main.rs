//! Arete CLI — the main entry point.
//!
//! Commands:
//! - `memory search` — Rank decisions, learnings and observations
//! - `route`         — Recommend the skill or tool for a request
//! - `brief`         — Assemble a primitive briefing for a task
//! - `context`       — Show the workspace files relevant to a query
//! - `resolve`       — Map a name, email or date to people, meetings, projects
//! - `status`        — Show workspace and configuration status
//! - `config`        — Manage the configuration file

use arete_core::{EntityType, MemoryKind, ProductPrimitive, WorkType};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "arete",
    about = "Arete — workspace intelligence for product managers",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Workspace root (defaults to searching upward from the current directory)
    #[arg(short, long, global = true, env = "ARETE_WORKSPACE")]
    workspace: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search workspace memory
    Memory {
        #[command(subcommand)]
        action: MemoryAction,
    },

    /// Route a request to the best matching skill or tool
    Route {
        query: String,

        /// Print the routing decision as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assemble a primitive briefing for a task
    Brief {
        /// The task to brief for
        #[arg(long = "for")]
        task: String,

        /// Skill the briefing is prepared for
        #[arg(long)]
        skill: Option<String>,

        /// Primitives to cover (comma-separated); all five when omitted
        #[arg(long, value_delimiter = ',')]
        primitives: Vec<ProductPrimitive>,

        #[arg(long)]
        work_type: Option<WorkType>,

        #[arg(long)]
        json: bool,
    },

    /// Show the context files and gaps for a query
    Context {
        query: String,

        #[arg(long, value_delimiter = ',')]
        primitives: Vec<ProductPrimitive>,

        #[arg(long)]
        json: bool,
    },

    /// Resolve a reference to people, meetings or projects
    Resolve {
        reference: String,

        #[arg(long = "type", default_value = "any")]
        kind: EntityType,

        #[arg(short, long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// Show workspace and configuration status
    Status,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum MemoryAction {
    /// Rank memory sections against a query
    Search {
        query: String,

        /// Stores to search (comma-separated); all when omitted
        #[arg(long, value_delimiter = ',')]
        types: Vec<MemoryKind>,

        #[arg(short, long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let workspace = cli.workspace;
    match cli.command {
        Commands::Memory {
            action:
                MemoryAction::Search {
                    query,
                    types,
                    limit,
                    json,
                },
        } => commands::memory::search(workspace, &query, types, limit, json).await?,
        Commands::Route { query, json } => commands::route::run(workspace, &query, json).await?,
        Commands::Brief {
            task,
            skill,
            primitives,
            work_type,
            json,
        } => commands::brief::run(workspace, &task, skill, primitives, work_type, json).await?,
        Commands::Context {
            query,
            primitives,
            json,
        } => commands::context::run(workspace, &query, primitives, json).await?,
        Commands::Resolve {
            reference,
            kind,
            limit,
            json,
        } => commands::resolve::run(workspace, &reference, kind, limit, json).await?,
        Commands::Status => commands::status::run(workspace).await?,
        Commands::Config { action } => match action {
            ConfigAction::Init { force } => commands::config_cmd::init(force).await?,
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
        },
    }

    Ok(())
}
