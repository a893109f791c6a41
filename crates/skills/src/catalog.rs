//! Catalog discovery — skills from `.agents/skills/<id>/SKILL.md` and tools
//! from `.cursor/tools/<id>/TOOL.md`.
//!
//! The directory name is the candidate id. Descriptor metadata comes from
//! the YAML frontmatter; a directory without a descriptor still yields a
//! bare candidate so it stays routable by id.

use arete_core::context::ProductPrimitive;
use arete_core::error::CatalogError;
use arete_core::frontmatter;
use arete_core::skill::{CandidateProfile, SkillCandidate, SkillCategory, ToolProfile};
use arete_core::workspace::WorkspacePaths;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

pub const SKILL_FILE: &str = "SKILL.md";
pub const TOOL_FILE: &str = "TOOL.md";

/// Frontmatter shared by `SKILL.md` and `TOOL.md`.
///
/// Enum-valued fields stay strings here so an unknown value drops only
/// that field, not the whole descriptor.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Descriptor {
    name: Option<String>,
    description: Option<String>,
    triggers: Vec<String>,
    primitives: Vec<String>,
    work_type: Option<String>,
    category: Option<String>,
    requires_briefing: Option<bool>,
    lifecycle: Option<String>,
    duration: Option<String>,
}

/// All skills and tools installed in a workspace.
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    candidates: Vec<SkillCandidate>,
}

impl SkillCatalog {
    pub fn new(candidates: Vec<SkillCandidate>) -> Self {
        Self { candidates }
    }

    /// Discover skills, then tools, from the workspace.
    pub async fn discover(workspace: &WorkspacePaths) -> Result<Self, CatalogError> {
        let mut candidates = discover_skills(&workspace.agent_skills).await?;
        candidates.extend(discover_tools(&workspace.tools).await?);
        debug!(count = candidates.len(), "Skill catalog discovered");
        Ok(Self { candidates })
    }

    pub fn candidates(&self) -> &[SkillCandidate] {
        &self.candidates
    }

    /// Look up a candidate by resolved id.
    pub fn get(&self, id: &str) -> Option<&SkillCandidate> {
        self.candidates
            .iter()
            .find(|c| c.profile().resolved_id().as_deref() == Some(id))
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Read every skill under `dir`, ordered by id. A missing `dir` is empty.
pub async fn discover_skills(dir: &Path) -> Result<Vec<SkillCandidate>, CatalogError> {
    Ok(read_descriptors(dir, SKILL_FILE)
        .await?
        .into_iter()
        .map(|(mut profile, descriptor)| {
            if profile.category.is_none() && descriptor.is_none() {
                profile.category = Some(SkillCategory::Community);
            }
            SkillCandidate::Skill(profile)
        })
        .collect())
}

/// Read every tool under `dir`, ordered by id. A missing `dir` is empty.
pub async fn discover_tools(dir: &Path) -> Result<Vec<SkillCandidate>, CatalogError> {
    Ok(read_descriptors(dir, TOOL_FILE)
        .await?
        .into_iter()
        .map(|(profile, descriptor)| {
            let descriptor = descriptor.unwrap_or_default();
            SkillCandidate::Tool(ToolProfile {
                profile,
                lifecycle: descriptor
                    .lifecycle
                    .as_deref()
                    .and_then(|v| parse_field(v, "lifecycle")),
                duration: descriptor.duration,
            })
        })
        .collect())
}

/// Profiles for each subdirectory of `dir`, with the raw descriptor when
/// `file_name` exists and parses.
async fn read_descriptors(
    dir: &Path,
    file_name: &str,
) -> Result<Vec<(CandidateProfile, Option<Descriptor>)>, CatalogError> {
    let read_failed = |e: std::io::Error| CatalogError::ReadFailed {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    };
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(read_failed(e)),
    };

    let mut dirs: Vec<(String, PathBuf)> = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(read_failed)? {
        let Ok(file_type) = entry.file_type().await else {
            continue;
        };
        if !file_type.is_dir() {
            continue;
        }
        let path = entry.path();
        let Some(id) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };
        if !id.starts_with(['.', '_']) {
            dirs.push((id, path));
        }
    }
    dirs.sort_by(|a, b| a.0.cmp(&b.0));

    let mut profiles = Vec::with_capacity(dirs.len());
    for (id, path) in dirs {
        let descriptor = read_descriptor(&path.join(file_name)).await;
        let profile = build_profile(id, &path, descriptor.as_ref());
        profiles.push((profile, descriptor));
    }
    Ok(profiles)
}

async fn read_descriptor(path: &Path) -> Option<Descriptor> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Unreadable descriptor, using defaults");
            return None;
        }
    };
    match frontmatter::parse::<Descriptor>(&content) {
        Ok(descriptor) => Some(descriptor.unwrap_or_default()),
        Err(reason) => {
            let err = CatalogError::MalformedFrontmatter {
                path: path.to_path_buf(),
                reason,
            };
            warn!(error = %err, "Using default descriptor");
            Some(Descriptor::default())
        }
    }
}

fn build_profile(id: String, dir: &Path, descriptor: Option<&Descriptor>) -> CandidateProfile {
    let Some(d) = descriptor else {
        return CandidateProfile {
            name: Some(id.clone()),
            id: Some(id),
            path: Some(dir.display().to_string()),
            ..Default::default()
        };
    };
    CandidateProfile {
        name: d.name.clone().filter(|n| !n.is_empty()).or_else(|| Some(id.clone())),
        id: Some(id),
        description: d.description.clone().unwrap_or_default(),
        path: Some(dir.display().to_string()),
        triggers: d.triggers.clone(),
        primitives: d
            .primitives
            .iter()
            .filter_map(|p| parse_field::<ProductPrimitive>(p, "primitives"))
            .collect(),
        work_type: d.work_type.as_deref().and_then(|v| parse_field(v, "work_type")),
        category: d.category.as_deref().and_then(|v| parse_field(v, "category")),
        requires_briefing: d.requires_briefing,
    }
}

fn parse_field<T>(value: &str, field: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e: T::Err| debug!(field, value, error = %e, "Ignoring descriptor value"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arete_core::skill::{ToolLifecycle, WorkType};

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn missing_directory_is_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_skills(&dir.path().join("nope")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reads_skill_frontmatter() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "meeting-prep/SKILL.md",
            "---\nname: Meeting Prep\ndescription: Build a prep brief\ntriggers:\n  - meeting prep\nprimitives: [User, Problem]\nwork_type: operations\ncategory: default\nrequires_briefing: true\n---\n\n# Meeting Prep\n",
        );
        let skills = discover_skills(dir.path()).await.unwrap();
        assert_eq!(skills.len(), 1);
        let SkillCandidate::Skill(profile) = &skills[0] else {
            panic!("expected skill");
        };
        assert_eq!(profile.id.as_deref(), Some("meeting-prep"));
        assert_eq!(profile.name.as_deref(), Some("Meeting Prep"));
        assert_eq!(profile.triggers, vec!["meeting prep"]);
        assert_eq!(profile.primitives, vec![ProductPrimitive::User, ProductPrimitive::Problem]);
        assert_eq!(profile.work_type, Some(WorkType::Operations));
        assert_eq!(profile.category, Some(SkillCategory::Default));
        assert_eq!(profile.requires_briefing, Some(true));
    }

    #[tokio::test]
    async fn directory_without_descriptor_is_community_skill() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("my-skill")).unwrap();
        let skills = discover_skills(dir.path()).await.unwrap();
        assert_eq!(skills[0].profile().resolved_id().as_deref(), Some("my-skill"));
        assert_eq!(skills[0].profile().category, Some(SkillCategory::Community));
    }

    #[tokio::test]
    async fn unknown_enum_values_drop_only_that_field() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "getting-started/SKILL.md",
            "---\ndescription: Set up the workspace\ncategory: core\nwork_type: operations\n---\n",
        );
        let skills = discover_skills(dir.path()).await.unwrap();
        let profile = skills[0].profile();
        assert_eq!(profile.category, None);
        assert_eq!(profile.work_type, Some(WorkType::Operations));
        assert_eq!(profile.description, "Set up the workspace");
    }

    #[tokio::test]
    async fn malformed_frontmatter_degrades_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "broken/SKILL.md", "---\ntriggers: [unclosed\n---\n");
        let skills = discover_skills(dir.path()).await.unwrap();
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].profile().resolved_id().as_deref(), Some("broken"));
        assert!(skills[0].profile().triggers.is_empty());
    }

    #[tokio::test]
    async fn skills_are_sorted_and_hidden_dirs_skipped() {
        let dir = tempfile::tempdir().unwrap();
        for id in ["zeta", "alpha", ".git", "_template"] {
            std::fs::create_dir_all(dir.path().join(id)).unwrap();
        }
        let ids: Vec<String> = discover_skills(dir.path())
            .await
            .unwrap()
            .iter()
            .filter_map(|c| c.profile().resolved_id())
            .collect();
        assert_eq!(ids, vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn loose_files_beside_skill_dirs_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "README.md", "# Skills\n");
        write(dir.path(), "daily-plan/SKILL.md", "---\ndescription: Plan the day\n---\n");
        let skills = discover_skills(dir.path()).await.unwrap();
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].profile().description, "Plan the day");
    }

    #[tokio::test]
    async fn reads_tool_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "onboarding/TOOL.md",
            "---\nname: onboarding\ndescription: 30/60/90 day plan\nlifecycle: time-bound\nduration: 90-150 days\ntriggers: [onboarding]\n---\n",
        );
        let tools = discover_tools(dir.path()).await.unwrap();
        let SkillCandidate::Tool(tool) = &tools[0] else {
            panic!("expected tool");
        };
        assert_eq!(tool.lifecycle, Some(ToolLifecycle::TimeBound));
        assert_eq!(tool.duration.as_deref(), Some("90-150 days"));
    }

    #[tokio::test]
    async fn workspace_catalog_lists_skills_before_tools() {
        let root = tempfile::tempdir().unwrap();
        let ws = WorkspacePaths::new(root.path());
        write(root.path(), ".agents/skills/daily-plan/SKILL.md", "---\ndescription: Plan the day\n---\n");
        write(root.path(), ".cursor/tools/onboarding/TOOL.md", "---\nlifecycle: time-bound\n---\n");
        let catalog = SkillCatalog::discover(&ws).await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(matches!(catalog.candidates()[0], SkillCandidate::Skill(_)));
        assert!(matches!(catalog.get("onboarding"), Some(SkillCandidate::Tool(_))));
        assert!(catalog.get("missing").is_none());
    }
}
