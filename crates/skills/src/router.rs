//! Intent routing — pick the single best skill or tool for a query.
//!
//! Every candidate is scored by the additive signals in [`crate::signals`].
//! The highest score wins (first seen on ties); below [`MIN_SCORE`] nothing
//! is routed.

use arete_core::skill::{CandidateProfile, RouteAction, RoutedSkill, SkillCandidate};
use tracing::debug;

use crate::signals::{
    QueryTerms, category_score, description_chunk_score, description_overlap_score, id_score,
    slug_score, trigger_score, work_type_score,
};

/// Minimum score for a route to be returned.
pub const MIN_SCORE: u32 = 4;

/// Scores at or above this are explained as strong intent matches.
pub const STRONG_SCORE: u32 = 18;

const STRONG_REASON: &str = "Strong match from intent keywords or triggers";
const DESCRIPTION_REASON: &str = "Match from skill description";

/// Total score of one candidate profile under its resolved `id`.
pub fn score_candidate(query: &QueryTerms, id: &str, profile: &CandidateProfile) -> u32 {
    if query.is_empty() {
        return 0;
    }
    id_score(query, id)
        + slug_score(query, id)
        + trigger_score(query, &profile.triggers)
        + description_overlap_score(query, &profile.description)
        + description_chunk_score(query, &profile.description)
        + work_type_score(query, profile.work_type)
        + category_score(profile.category)
}

/// Route `query` to the best-matching candidate, if any scores high enough.
///
/// Pure: the same inputs always produce the same route.
pub fn route_to_skill(query: &str, candidates: &[SkillCandidate]) -> Option<RoutedSkill> {
    if query.trim().is_empty() || candidates.is_empty() {
        return None;
    }
    let terms = QueryTerms::new(query);

    let mut best: Option<(u32, String, &SkillCandidate)> = None;
    for candidate in candidates {
        let Some(id) = candidate.profile().resolved_id() else {
            continue;
        };
        let score = score_candidate(&terms, &id, candidate.profile());
        let leads = match &best {
            Some((top, _, _)) => score > *top,
            None => score > 0,
        };
        if leads {
            best = Some((score, id, candidate));
        }
    }

    let (score, id, candidate) = best?;
    if score < MIN_SCORE {
        debug!(query, best = %id, score, "No candidate above routing threshold");
        return None;
    }
    debug!(query, skill = %id, score, "Routed query");
    Some(build_route(id, score, candidate))
}

fn build_route(id: String, score: u32, candidate: &SkillCandidate) -> RoutedSkill {
    let profile = candidate.profile();
    let (action, lifecycle, duration) = match candidate {
        SkillCandidate::Skill(_) => (RouteAction::Load, None, None),
        SkillCandidate::Tool(tool) => (RouteAction::Activate, tool.lifecycle, tool.duration.clone()),
    };
    RoutedSkill {
        skill: id,
        path: profile.path.clone().unwrap_or_default(),
        reason: if score >= STRONG_SCORE {
            STRONG_REASON.to_string()
        } else {
            DESCRIPTION_REASON.to_string()
        },
        primitives: profile.primitives.clone(),
        work_type: profile.work_type,
        category: profile.category,
        requires_briefing: profile.requires_briefing,
        kind: candidate.kind(),
        action,
        lifecycle,
        duration,
        resolved_from: None,
    }
}
