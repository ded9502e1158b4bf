//! Token-threshold model switching.
//!
//! The estimate is deliberately crude (character count of the chart text
//! plus the additional info). Above the threshold only the large-context
//! family is allowed to run; there is no silent truncation.

use crate::model_family::{ModelFamily, LARGE_CONTEXT_FAMILY};

/// Default `MAX_TOKEN_THRESHOLD`.
pub const DEFAULT_MAX_TOKEN_THRESHOLD: usize = 100_000;

/// Outcome of applying the threshold policy to a resolved family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdDecision {
    /// Under the threshold, or already on the large-context family.
    Keep(ModelFamily),
    /// Over the threshold: run on `to` instead of `from`.
    SwitchTo { from: ModelFamily, to: ModelFamily },
    /// Over the threshold and the large-context family is not configured.
    Exceeded { estimated: usize, threshold: usize },
}

/// Rough token estimate used by the switching policy.
pub fn estimate_tokens(input_text: &str, additional_info: &str) -> usize {
    input_text.chars().count() + additional_info.chars().count()
}

/// Decide which family runs the request.
pub fn apply_threshold(
    resolved: ModelFamily,
    estimated: usize,
    threshold: usize,
    available: &[ModelFamily],
) -> ThresholdDecision {
    if estimated <= threshold {
        return ThresholdDecision::Keep(resolved);
    }
    if !available.contains(&LARGE_CONTEXT_FAMILY) {
        return ThresholdDecision::Exceeded {
            estimated,
            threshold,
        };
    }
    if resolved == LARGE_CONTEXT_FAMILY {
        ThresholdDecision::Keep(resolved)
    } else {
        ThresholdDecision::SwitchTo {
            from: resolved,
            to: LARGE_CONTEXT_FAMILY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[ModelFamily] = &[ModelFamily::Claude, ModelFamily::GeminiPro];

    #[test]
    fn estimate_counts_characters_of_both_fields() {
        assert_eq!(estimate_tokens("経過良好", "ab"), 6);
    }

    #[test]
    fn under_threshold_keeps_selection() {
        assert_eq!(
            apply_threshold(ModelFamily::Claude, 10, 10, ALL),
            ThresholdDecision::Keep(ModelFamily::Claude)
        );
    }

    #[test]
    fn over_threshold_switches_to_large_context() {
        assert_eq!(
            apply_threshold(ModelFamily::Claude, 11, 10, ALL),
            ThresholdDecision::SwitchTo {
                from: ModelFamily::Claude,
                to: ModelFamily::GeminiPro
            }
        );
    }

    #[test]
    fn over_threshold_on_large_context_is_not_a_switch() {
        assert_eq!(
            apply_threshold(ModelFamily::GeminiPro, 11, 10, ALL),
            ThresholdDecision::Keep(ModelFamily::GeminiPro)
        );
    }

    #[test]
    fn over_threshold_without_large_context_fails() {
        assert_eq!(
            apply_threshold(ModelFamily::Claude, 11, 10, &[ModelFamily::Claude]),
            ThresholdDecision::Exceeded {
                estimated: 11,
                threshold: 10
            }
        );
    }
}
