//! Skill and tool routing for Arete workspaces.
//!
//! [`route_to_skill`] is a pure function over a candidate list; the
//! [`SkillCatalog`] discovers that list from the workspace on disk, and
//! [`classify_task`] suggests a model tier for the same request.

pub mod catalog;
pub mod defaults;
pub mod router;
pub mod signals;
pub mod tier;

pub use catalog::{SkillCatalog, discover_skills, discover_tools};
pub use defaults::apply_skill_defaults;
pub use router::{MIN_SCORE, route_to_skill, score_candidate};
pub use signals::QueryTerms;
pub use tier::{ModelTier, TierSuggestion, classify_task};
