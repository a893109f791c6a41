//! File-backed collaborators for the Arete retrieval engine.
//!
//! - [`FileContextProvider`] picks the workspace files that inform a task.
//! - [`FileEntityResolver`] maps names, emails, dates and slugs to people,
//!   meetings and projects.

mod fs;

pub mod entities;
pub mod injector;
pub mod summary;

pub use entities::{FileEntityResolver, slugify};
pub use injector::{FileContextProvider, assess_confidence};
pub use summary::{extract_summary, is_placeholder};
