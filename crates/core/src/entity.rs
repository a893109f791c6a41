//! Entity resolution — mapping a free-text reference to workspace records.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::EntityError;
use crate::workspace::WorkspacePaths;

/// Kind of entity a reference should resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Person,
    Meeting,
    Project,
    /// Any of the above.
    Any,
}

impl EntityType {
    /// Whether a filter of `self` admits entities of type `other`.
    pub fn admits(self, other: EntityType) -> bool {
        self == EntityType::Any || self == other
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Person => "person",
            Self::Meeting => "meeting",
            Self::Project => "project",
            Self::Any => "any",
        })
    }
}

impl FromStr for EntityType {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "person" | "people" => Ok(Self::Person),
            "meeting" | "meetings" => Ok(Self::Meeting),
            "project" | "projects" => Ok(Self::Project),
            "any" | "" => Ok(Self::Any),
            other => Err(EntityError::InvalidType(other.to_string())),
        }
    }
}

/// A workspace record matched by a reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEntity {
    #[serde(rename = "type")]
    pub kind: EntityType,
    /// Path relative to the workspace root; unique per entity.
    pub path: String,
    pub name: String,
    pub slug: String,
    /// Type-specific fields: role/company/category, date, status, ...
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    pub score: u32,
}

impl ResolvedEntity {
    /// The metadata worth showing next to the name, in display order.
    pub fn display_metadata(&self) -> Vec<&str> {
        let keys: &[&str] = match self.kind {
            EntityType::Person => &["role", "company", "category"],
            EntityType::Meeting => &["date"],
            EntityType::Project => &["status"],
            EntityType::Any => &[],
        };
        keys.iter()
            .filter_map(|k| self.metadata.get(*k))
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .collect()
    }
}

/// The entity-resolution collaborator.
///
/// Must not fail for an unmatched reference: that is an empty `Vec`.
#[async_trait]
pub trait EntityResolver: Send + Sync {
    async fn resolve_entities(
        &self,
        reference: &str,
        filter: EntityType,
        workspace: &WorkspacePaths,
        limit: usize,
    ) -> Result<Vec<ResolvedEntity>, EntityError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(meta: &[(&str, &str)]) -> ResolvedEntity {
        ResolvedEntity {
            kind: EntityType::Person,
            path: "people/internal/jane-doe.md".into(),
            name: "Jane Doe".into(),
            slug: "jane-doe".into(),
            metadata: meta.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            score: 100,
        }
    }

    #[test]
    fn person_metadata_in_role_company_category_order() {
        let jane = person(&[("category", "internal"), ("role", "PM"), ("email", "jane@acme.com")]);
        assert_eq!(jane.display_metadata(), vec!["PM", "internal"]);
    }

    #[test]
    fn any_filter_admits_everything() {
        assert!(EntityType::Any.admits(EntityType::Meeting));
        assert!(EntityType::Person.admits(EntityType::Person));
        assert!(!EntityType::Person.admits(EntityType::Project));
    }

    #[test]
    fn parses_plural_type_names() {
        assert_eq!("people".parse::<EntityType>().unwrap(), EntityType::Person);
        assert!("planet".parse::<EntityType>().is_err());
    }
}
