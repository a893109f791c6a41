//! Workspace layout — where each kind of knowledge lives on disk.
//!
//! A workspace is a plain directory of markdown files:
//!
//! ```text
//! <root>/
//!   arete.yaml                 manifest
//!   .arete/memory/items/       decisions.md, learnings.md, agent-observations.md
//!   .agents/skills/<id>/       SKILL.md
//!   .cursor/tools/<id>/        TOOL.md
//!   context/  goals/           strategic context
//!   projects/{active,archive}/<slug>/README.md
//!   people/{internal,customers,users}/<slug>.md
//!   resources/meetings/<date>-<slug>.md
//! ```
//!
//! The handle is passed explicitly to every operation; there is no global
//! registry of workspaces.

use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "arete.yaml";

/// Resolved paths for a single workspace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    pub manifest: PathBuf,
    pub memory_items: PathBuf,
    pub context: PathBuf,
    pub goals: PathBuf,
    pub projects: PathBuf,
    pub people: PathBuf,
    pub resources: PathBuf,
    pub agent_skills: PathBuf,
    pub tools: PathBuf,
}

impl WorkspacePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            manifest: root.join(MANIFEST_FILE),
            memory_items: root.join(".arete").join("memory").join("items"),
            context: root.join("context"),
            goals: root.join("goals"),
            projects: root.join("projects"),
            people: root.join("people"),
            resources: root.join("resources"),
            agent_skills: root.join(".agents").join("skills"),
            tools: root.join(".cursor").join("tools"),
            root,
        }
    }

    pub fn meetings(&self) -> PathBuf {
        self.resources.join("meetings")
    }

    /// `path` relative to the workspace root, with forward slashes.
    ///
    /// Paths outside the root are returned unchanged.
    pub fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Returns `true` if `dir` looks like a workspace root.
///
/// Either the manifest exists, or the characteristic `.cursor/`, `context/`
/// and `.arete/memory/` directories are all present.
pub fn is_workspace(dir: &Path) -> bool {
    if dir.join(MANIFEST_FILE).exists() {
        return true;
    }
    dir.join(".cursor").is_dir()
        && dir.join("context").is_dir()
        && dir.join(".arete").join("memory").is_dir()
}

/// Walk up from `start` to the first directory that is a workspace root.
pub fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| is_workspace(dir))
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_memory_items_dir() {
        let paths = WorkspacePaths::new("/ws");
        assert_eq!(paths.memory_items, PathBuf::from("/ws/.arete/memory/items"));
        assert_eq!(paths.meetings(), PathBuf::from("/ws/resources/meetings"));
    }

    #[test]
    fn relative_uses_forward_slashes() {
        let paths = WorkspacePaths::new("/ws");
        let file = PathBuf::from("/ws").join("context").join("business-overview.md");
        assert_eq!(paths.relative(&file), "context/business-overview.md");
    }

    #[test]
    fn finds_root_from_nested_dir() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(MANIFEST_FILE), "schema: 1\n").unwrap();
        let nested = tmp.path().join("projects").join("active");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_workspace_root(&nested).as_deref(), Some(tmp.path()));
    }

    #[test]
    fn recognises_directory_layout_without_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        for dir in [".cursor", "context", ".arete/memory"] {
            std::fs::create_dir_all(tmp.path().join(dir)).unwrap();
        }
        assert!(is_workspace(tmp.path()));
    }

    #[test]
    fn plain_directory_is_not_a_workspace() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(!is_workspace(tmp.path()));
    }
}
