//! Primitive briefings: everything the workspace knows about a task.

pub mod assembler;
pub mod document;
pub mod references;

pub use assembler::{BriefingAssembler, BriefingOptions, DEFAULT_ENTITY_LIMIT, PrimitiveBriefing};
pub use document::{BriefingDocument, BriefingHeader, BriefingSection, MEMORY_SECTION_LIMIT};
pub use references::extract_entity_references;
