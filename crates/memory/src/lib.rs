//! Memory retrieval for Arete workspaces.
//!
//! Ranks `###` sections of the decisions, learnings and observations logs
//! against a free-text query.

pub mod file_store;
pub mod in_memory;
pub mod noop;
pub mod scoring;
pub mod search;
pub mod section;

pub use file_store::FileMemoryStore;
pub use in_memory::InMemoryStore;
pub use noop::NoopStore;
pub use scoring::{SectionScore, score_section};
pub use search::search_memory;
pub use section::{parse_heading, parse_sections};
