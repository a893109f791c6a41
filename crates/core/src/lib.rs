//! # Arete Core
//!
//! Domain types, collaborator traits, and error definitions for the Arete
//! workspace intelligence engine. Every other crate depends inward on this
//! one.
//!
//! ## Design Philosophy
//!
//! Each collaborator the retrieval engine talks to is a trait here
//! ([`MemoryStore`], [`ContextProvider`], [`EntityResolver`]).
//! Implementations live in their respective crates, which keeps:
//! - the engine testable with in-memory stubs
//! - the dependency graph pointing inward
//! - workspace handles explicit (no process-wide registry)

pub mod context;
pub mod entity;
pub mod error;
pub mod frontmatter;
pub mod memory;
pub mod skill;
pub mod tokenize;
pub mod workspace;

// Re-export key types at crate root for ergonomics
pub use context::{
    Confidence, ContextBundle, ContextCategory, ContextFile, ContextGap, ContextProvider,
    ContextRequest, ProductPrimitive,
};
pub use entity::{EntityResolver, EntityType, ResolvedEntity};
pub use error::{Error, Result};
pub use memory::{
    MemoryKind, MemoryResult, MemorySearchOptions, MemorySearchResult, MemorySection, MemoryStore,
};
pub use skill::{
    CandidateKind, CandidateProfile, RouteAction, RoutedSkill, SkillCandidate, SkillCategory,
    ToolLifecycle, ToolProfile, WorkType,
};
pub use tokenize::tokenize;
pub use workspace::{WorkspacePaths, find_workspace_root};
