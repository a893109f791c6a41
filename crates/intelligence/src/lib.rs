//! # Arete Intelligence
//!
//! Turns a free-text task into a briefing:
//! 1. Gather contextual files and gaps from the [`ContextProvider`](arete_core::ContextProvider)
//! 2. Search memory for related decisions and learnings
//! 3. Pull entity references out of the task and resolve them
//! 4. Lay the results out as typed sections and render markdown

pub mod briefing;

pub use briefing::{
    BriefingAssembler, BriefingDocument, BriefingOptions, BriefingSection, PrimitiveBriefing,
    extract_entity_references,
};
