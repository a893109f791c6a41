//! Capability descriptors — skills and tools the router can recommend.
//!
//! A skill is a repeatable workflow the agent *loads*; a tool is a
//! lifecycle-bound capability the agent *activates*. Both share a
//! [`CandidateProfile`]; only tools carry a lifecycle and duration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::context::ProductPrimitive;
use crate::error::CatalogError;

/// Work-type classification for skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    Discovery,
    Definition,
    Delivery,
    Analysis,
    Planning,
    Operations,
}

impl WorkType {
    /// Intent keywords that earn the work-type bonus.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Discovery => &["discovery", "discover", "research", "explore", "investigate", "understand"],
            Self::Definition => &["define", "prd", "requirements", "spec", "specification"],
            Self::Delivery => &["deliver", "launch", "ship", "release", "rollout"],
            Self::Analysis => &["analyze", "analysis", "compare", "evaluate", "assess"],
            Self::Planning => &["plan", "planning", "goals", "priorities", "quarter", "week", "roadmap"],
            Self::Operations => &["sync", "save", "process", "update", "finalize", "tour", "review"],
        }
    }
}

impl FromStr for WorkType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "discovery" => Ok(Self::Discovery),
            "definition" => Ok(Self::Definition),
            "delivery" => Ok(Self::Delivery),
            "analysis" => Ok(Self::Analysis),
            "planning" => Ok(Self::Planning),
            "operations" => Ok(Self::Operations),
            other => Err(CatalogError::UnknownWorkType(other.to_string())),
        }
    }
}

/// Where a skill came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Essential,
    Default,
    Community,
}

impl FromStr for SkillCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "essential" => Ok(Self::Essential),
            "default" => Ok(Self::Default),
            "community" => Ok(Self::Community),
            other => Err(CatalogError::UnknownCategory(other.to_string())),
        }
    }
}

/// How long an activated tool stays active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolLifecycle {
    TimeBound,
    ConditionBound,
    Cyclical,
    OneTime,
}

impl fmt::Display for ToolLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TimeBound => "time-bound",
            Self::ConditionBound => "condition-bound",
            Self::Cyclical => "cyclical",
            Self::OneTime => "one-time",
        })
    }
}

impl FromStr for ToolLifecycle {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "time-bound" => Ok(Self::TimeBound),
            "condition-bound" => Ok(Self::ConditionBound),
            "cyclical" => Ok(Self::Cyclical),
            "one-time" => Ok(Self::OneTime),
            other => Err(CatalogError::UnknownLifecycle(other.to_string())),
        }
    }
}

/// Fields shared by skills and tools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub primitives: Vec<ProductPrimitive>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_type: Option<WorkType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<SkillCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_briefing: Option<bool>,
}

impl CandidateProfile {
    /// Effective id: explicit id, else name, else trailing path segment.
    ///
    /// Returns `None` when every source is empty.
    pub fn resolved_id(&self) -> Option<String> {
        let non_empty = |s: &Option<String>| s.as_deref().filter(|v| !v.is_empty()).map(str::to_string);
        non_empty(&self.id)
            .or_else(|| non_empty(&self.name))
            .or_else(|| {
                self.path
                    .as_deref()
                    .and_then(|p| p.rsplit(['/', '\\']).next())
                    .filter(|seg| !seg.is_empty())
                    .map(str::to_string)
            })
    }
}

/// A tool descriptor: the shared profile plus activation details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolProfile {
    #[serde(flatten)]
    pub profile: CandidateProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<ToolLifecycle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// A capability descriptor supplied to the router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SkillCandidate {
    Skill(CandidateProfile),
    Tool(ToolProfile),
}

impl SkillCandidate {
    pub fn profile(&self) -> &CandidateProfile {
        match self {
            Self::Skill(profile) => profile,
            Self::Tool(tool) => &tool.profile,
        }
    }

    pub fn kind(&self) -> CandidateKind {
        match self {
            Self::Skill(_) => CandidateKind::Skill,
            Self::Tool(_) => CandidateKind::Tool,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    Skill,
    Tool,
}

/// What the caller should do with the routed candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteAction {
    Load,
    Activate,
}

/// The router's recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedSkill {
    pub skill: String,
    pub path: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub primitives: Vec<ProductPrimitive>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_type: Option<WorkType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<SkillCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_briefing: Option<bool>,
    #[serde(rename = "type")]
    pub kind: CandidateKind,
    pub action: RouteAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<ToolLifecycle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Set when a configured default redirected the route to another skill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_from: Option<String>,
}
