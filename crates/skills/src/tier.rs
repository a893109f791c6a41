//! Model tier suggestion for a routed request.
//!
//! Arete never switches models itself; the tier is advice for the user or
//! for tooling that can pick a model.

use regex::RegexSet;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Prompts shorter than this may be classified as fast lookups.
const SHORT_PROMPT_CHARS: usize = 20;

/// Prompts longer than this are treated as multi-part requests.
const LONG_PROMPT_CHARS: usize = 200;

static LOOKUP: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)^(what|who|when|where|how many|list|show|get|find)\b",
        r"(?i)^(search|look up|check|status)\b",
        r"(?i)^(today|calendar|tasks)\b",
        r"(?i)\b(quick|brief|short)\b",
    ])
    .expect("static lookup patterns")
});

static DEEP_WORK: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)\b(analyze|assessment|evaluate|review|synthesize)\b",
        r"(?i)\b(plan|strategy|prioritize|roadmap)\b",
        r"(?i)\b(write|draft|compose|create.*document|prd)\b",
        r"(?i)\b(explain|why|how does|reasoning)\b",
        r"(?i)\b(complex|detailed|comprehensive)\b",
        r"(?i)\b(compare|contrast|trade-?offs)\b",
        r"(?i)\b(discovery|competitive|research)\b",
        r"(?i)\b(finalize|archive|wrap up)\b",
    ])
    .expect("static deep-work patterns")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    Fast,
    Balanced,
    Powerful,
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Powerful => "powerful",
        })
    }
}

/// A suggested tier and the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierSuggestion {
    pub tier: ModelTier,
    pub reason: &'static str,
}

/// Suggest a model tier for `prompt`.
///
/// Short lookups are fast; analysis, planning, writing, and very long
/// prompts are powerful; everything else is balanced.
pub fn classify_task(prompt: &str) -> TierSuggestion {
    let prompt = prompt.trim();
    let len = prompt.chars().count();

    if len < SHORT_PROMPT_CHARS && LOOKUP.is_match(prompt) {
        return TierSuggestion {
            tier: ModelTier::Fast,
            reason: "Short, simple lookup",
        };
    }
    if DEEP_WORK.is_match(prompt) {
        return TierSuggestion {
            tier: ModelTier::Powerful,
            reason: "Analysis, planning, or writing",
        };
    }
    if len > LONG_PROMPT_CHARS {
        return TierSuggestion {
            tier: ModelTier::Powerful,
            reason: "Long, multi-part request",
        };
    }
    TierSuggestion {
        tier: ModelTier::Balanced,
        reason: "Standard request",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_lookup_is_fast() {
        let suggestion = classify_task("what is my status");
        assert_eq!(suggestion.tier, ModelTier::Fast);
        assert!(!suggestion.reason.is_empty());
    }

    #[test]
    fn listing_tasks_is_fast() {
        assert_eq!(classify_task("list tasks").tier, ModelTier::Fast);
    }

    #[test]
    fn analysis_is_powerful() {
        assert_eq!(classify_task("analyze the competitive landscape").tier, ModelTier::Powerful);
    }

    #[test]
    fn planning_is_powerful() {
        assert_eq!(
            classify_task("plan the quarter and prioritize roadmap").tier,
            ModelTier::Powerful
        );
    }

    #[test]
    fn prd_writing_is_powerful() {
        assert_eq!(classify_task("write a PRD for onboarding v2").tier, ModelTier::Powerful);
    }

    #[test]
    fn long_prompt_is_powerful() {
        let suggestion = classify_task(&"a".repeat(250));
        assert_eq!(suggestion.tier, ModelTier::Powerful);
        assert_eq!(suggestion.reason, "Long, multi-part request");
    }

    #[test]
    fn generic_request_is_balanced() {
        assert_eq!(classify_task("help me with something").tier, ModelTier::Balanced);
    }

    #[test]
    fn tier_displays_lowercase() {
        assert_eq!(ModelTier::Powerful.to_string(), "powerful");
    }
}
