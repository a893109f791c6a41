//! File-backed entity resolution over people, meetings, and projects.
//!
//! Each record is scored by the strongest signal it matches:
//!
//! | signal                         | score |
//! |--------------------------------|-------|
//! | exact name                     | 100   |
//! | exact email (people)           | 95    |
//! | slug                           | 90    |
//! | date (meetings)                | 80    |
//! | name contains the reference    | 70    |
//! | attendee mention (meetings)    | 50    |
//! | shared name tokens, each       | 15    |

use arete_core::entity::{EntityResolver, EntityType, ResolvedEntity};
use arete_core::error::EntityError;
use arete_core::frontmatter;
use arete_core::tokenize;
use arete_core::workspace::WorkspacePaths;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::fs::{list_markdown, list_subdirs, read_optional, stem};

pub const NAME_MATCH: u32 = 100;
pub const EMAIL_MATCH: u32 = 95;
pub const SLUG_MATCH: u32 = 90;
pub const DATE_MATCH: u32 = 80;
pub const SUBSTRING_MATCH: u32 = 70;
pub const ATTENDEE_MATCH: u32 = 50;
pub const TOKEN_MATCH: u32 = 15;

const PEOPLE_CATEGORIES: [&str; 3] = ["internal", "customers", "users"];
const PROJECT_STATES: [&str; 2] = ["active", "archive"];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PersonMeta {
    name: Option<String>,
    email: Option<String>,
    role: Option<String>,
    company: Option<String>,
    category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MeetingMeta {
    title: Option<String>,
    date: Option<String>,
    attendees: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProjectMeta {
    title: Option<String>,
    status: Option<String>,
}

/// A workspace record before scoring.
struct Record {
    kind: EntityType,
    path: String,
    name: String,
    slug: String,
    metadata: BTreeMap<String, String>,
    attendees: Vec<String>,
}

/// Lowercase, hyphen-separated form of a name: `Jane Doe` → `jane-doe`.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn score(record: &Record, reference: &str) -> u32 {
    let reference = reference.trim().to_lowercase();
    let name = record.name.to_lowercase();
    let meta = |key: &str| record.metadata.get(key).map(|v| v.to_lowercase());

    if name == reference {
        return NAME_MATCH;
    }
    if record.kind == EntityType::Person && meta("email").as_deref() == Some(reference.as_str()) {
        return EMAIL_MATCH;
    }
    if record.slug == slugify(&reference) {
        return SLUG_MATCH;
    }
    if record.kind == EntityType::Meeting && meta("date").as_deref() == Some(reference.as_str()) {
        return DATE_MATCH;
    }
    if name.contains(&reference) {
        return SUBSTRING_MATCH;
    }
    if record
        .attendees
        .iter()
        .any(|a| a.to_lowercase().contains(&reference))
    {
        return ATTENDEE_MATCH;
    }

    let haystack = tokenize(&format!("{name} {}", record.slug.replace('-', " ")));
    let shared = tokenize(&reference)
        .iter()
        .filter(|t| haystack.contains(t))
        .count() as u32;
    shared * TOKEN_MATCH
}

fn first_heading(content: &str) -> Option<String> {
    frontmatter::body(content)
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
}

fn insert_some(metadata: &mut BTreeMap<String, String>, key: &str, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        metadata.insert(key.to_string(), value);
    }
}

/// Entity resolver scanning the workspace directories on every call.
#[derive(Debug, Default)]
pub struct FileEntityResolver;

impl FileEntityResolver {
    pub fn new() -> Self {
        Self
    }

    async fn people(&self, workspace: &WorkspacePaths) -> Vec<Record> {
        let mut records = Vec::new();
        for category in PEOPLE_CATEGORIES {
            for path in list_markdown(&workspace.people.join(category)).await {
                let Some(content) = read_optional(&path).await else {
                    continue;
                };
                let meta: PersonMeta = parse_meta(&path, &content);
                let slug = stem(&path);
                let name = meta
                    .name
                    .filter(|n| !n.trim().is_empty())
                    .or_else(|| first_heading(&content))
                    .unwrap_or_else(|| slug.clone());

                let mut metadata = BTreeMap::new();
                insert_some(&mut metadata, "email", meta.email);
                insert_some(&mut metadata, "role", meta.role);
                insert_some(&mut metadata, "company", meta.company);
                insert_some(
                    &mut metadata,
                    "category",
                    meta.category.or_else(|| Some(category.to_string())),
                );

                records.push(Record {
                    kind: EntityType::Person,
                    path: workspace.relative(&path),
                    name,
                    slug,
                    metadata,
                    attendees: Vec::new(),
                });
            }
        }
        records
    }

    async fn meetings(&self, workspace: &WorkspacePaths) -> Vec<Record> {
        let mut records = Vec::new();
        for path in list_markdown(&workspace.meetings()).await {
            let Some(content) = read_optional(&path).await else {
                continue;
            };
            let meta: MeetingMeta = parse_meta(&path, &content);
            let slug = stem(&path);
            let date = meta.date.or_else(|| date_prefix(&slug));
            let name = meta
                .title
                .filter(|t| !t.trim().is_empty())
                .or_else(|| first_heading(&content))
                .unwrap_or_else(|| slug.clone());

            let mut metadata = BTreeMap::new();
            insert_some(&mut metadata, "date", date);
            if !meta.attendees.is_empty() {
                metadata.insert("attendees".to_string(), meta.attendees.join(", "));
            }

            records.push(Record {
                kind: EntityType::Meeting,
                path: workspace.relative(&path),
                name,
                slug,
                metadata,
                attendees: meta.attendees,
            });
        }
        records
    }

    async fn projects(&self, workspace: &WorkspacePaths) -> Vec<Record> {
        let mut records = Vec::new();
        for state in PROJECT_STATES {
            for dir in list_subdirs(&workspace.projects.join(state)).await {
                let readme = dir.join("README.md");
                let Some(content) = read_optional(&readme).await else {
                    continue;
                };
                let meta: ProjectMeta = parse_meta(&readme, &content);
                let slug = stem(&dir);
                let name = meta
                    .title
                    .filter(|t| !t.trim().is_empty())
                    .or_else(|| first_heading(&content))
                    .unwrap_or_else(|| slug.clone());
                let status = meta.status.unwrap_or_else(|| match state {
                    "active" => "active".to_string(),
                    _ => "archived".to_string(),
                });

                let mut metadata = BTreeMap::new();
                metadata.insert("status".to_string(), status);

                records.push(Record {
                    kind: EntityType::Project,
                    path: workspace.relative(&readme),
                    name,
                    slug,
                    metadata,
                    attendees: Vec::new(),
                });
            }
        }
        records
    }
}

fn parse_meta<T: Default + serde::de::DeserializeOwned>(path: &Path, content: &str) -> T {
    match frontmatter::parse::<T>(content) {
        Ok(meta) => meta.unwrap_or_default(),
        Err(reason) => {
            debug!(path = %path.display(), %reason, "Ignoring malformed frontmatter");
            T::default()
        }
    }
}

fn date_prefix(slug: &str) -> Option<String> {
    let prefix = slug.get(..10)?;
    chrono::NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
        .ok()
        .map(|_| prefix.to_string())
}

#[async_trait]
impl EntityResolver for FileEntityResolver {
    async fn resolve_entities(
        &self,
        reference: &str,
        filter: EntityType,
        workspace: &WorkspacePaths,
        limit: usize,
    ) -> Result<Vec<ResolvedEntity>, EntityError> {
        if reference.trim().is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        if filter.admits(EntityType::Person) {
            records.extend(self.people(workspace).await);
        }
        if filter.admits(EntityType::Meeting) {
            records.extend(self.meetings(workspace).await);
        }
        if filter.admits(EntityType::Project) {
            records.extend(self.projects(workspace).await);
        }

        let mut resolved: Vec<ResolvedEntity> = records
            .into_iter()
            .filter_map(|record| {
                let score = score(&record, reference);
                (score > 0).then(|| ResolvedEntity {
                    kind: record.kind,
                    path: record.path,
                    name: record.name,
                    slug: record.slug,
                    metadata: record.metadata,
                    score,
                })
            })
            .collect();

        resolved.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
        resolved.truncate(limit);
        debug!(reference, %filter, matches = resolved.len(), "Entities resolved");
        Ok(resolved)
    }
}
