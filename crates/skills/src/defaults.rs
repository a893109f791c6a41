//! Configured skill defaults — redirect a routed skill to the installed
//! skill the user prefers for that job.

use arete_core::skill::{CandidateKind, RoutedSkill, SkillCandidate};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::catalog::SkillCatalog;

/// Apply `defaults` (routed id ⇒ preferred id) to a routed skill.
///
/// Tools are never redirected. When the preferred skill is not installed
/// the route is returned unchanged.
pub fn apply_skill_defaults(
    routed: RoutedSkill,
    catalog: &SkillCatalog,
    defaults: &BTreeMap<String, String>,
) -> RoutedSkill {
    if routed.kind != CandidateKind::Skill {
        return routed;
    }
    let Some(preferred) = defaults.get(&routed.skill) else {
        return routed;
    };
    if preferred == &routed.skill {
        return routed;
    }
    let Some(SkillCandidate::Skill(target)) = catalog.get(preferred) else {
        warn!(from = %routed.skill, to = %preferred, "Default skill is not installed, keeping route");
        return routed;
    };

    debug!(from = %routed.skill, to = %preferred, "Applying configured skill default");
    RoutedSkill {
        skill: preferred.clone(),
        path: target.path.clone().unwrap_or_default(),
        primitives: target.primitives.clone(),
        work_type: target.work_type.or(routed.work_type),
        category: target.category,
        requires_briefing: target.requires_briefing,
        resolved_from: Some(routed.skill.clone()),
        ..routed
    }
}
