//! Logical model families and the usage-ledger patterns that recover them.
//!
//! The ledger stores the concrete model identifier a provider was called
//! with (`model_detail`), not the family. Reporting filters reconstruct the
//! family at query time with case-insensitive substring patterns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A logical grouping of concrete models offered by one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelFamily {
    #[serde(rename = "Claude")]
    Claude,
    #[serde(rename = "Gemini_Pro")]
    GeminiPro,
    #[serde(rename = "Gemini_Flash")]
    GeminiFlash,
    #[serde(rename = "GPT4.1")]
    Gpt,
}

/// The family forced in when the input exceeds the token threshold.
pub const LARGE_CONTEXT_FAMILY: ModelFamily = ModelFamily::GeminiPro;

/// Case-insensitive substring rule matching `model_detail` values of a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsagePattern {
    pub pattern: &'static str,
    pub exclude: Option<&'static str>,
}

impl UsagePattern {
    pub fn matches(&self, model_detail: &str) -> bool {
        let detail = model_detail.to_lowercase();
        detail.contains(self.pattern) && self.exclude.map_or(true, |ex| !detail.contains(ex))
    }
}

impl ModelFamily {
    /// Display and selection order of the sidebar model selector.
    pub const ALL: [ModelFamily; 4] = [
        ModelFamily::GeminiPro,
        ModelFamily::GeminiFlash,
        ModelFamily::Claude,
        ModelFamily::Gpt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelFamily::Claude => "Claude",
            ModelFamily::GeminiPro => "Gemini_Pro",
            ModelFamily::GeminiFlash => "Gemini_Flash",
            ModelFamily::Gpt => "GPT4.1",
        }
    }

    pub fn usage_pattern(self) -> UsagePattern {
        match self {
            ModelFamily::Claude => UsagePattern {
                pattern: "claude",
                exclude: None,
            },
            ModelFamily::GeminiPro => UsagePattern {
                pattern: "gemini",
                exclude: Some("flash"),
            },
            ModelFamily::GeminiFlash => UsagePattern {
                pattern: "flash",
                exclude: None,
            },
            ModelFamily::Gpt => UsagePattern {
                pattern: "gpt",
                exclude: None,
            },
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelFamily {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelFamily::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown AI model '{s}'")))
    }
}

/// Recover the family of a stored `model_detail` value.
///
/// Families are tried in [`ModelFamily::ALL`] order; the first whose
/// pattern matches (and whose exclusion does not) wins.
pub fn classify_model_detail(model_detail: &str) -> Option<ModelFamily> {
    ModelFamily::ALL
        .into_iter()
        .find(|f| f.usage_pattern().matches(model_detail))
}

/// Session default among the configured families: Gemini_Pro when
/// available, otherwise the first available one.
pub fn default_family(available: &[ModelFamily]) -> Option<ModelFamily> {
    if available.contains(&ModelFamily::GeminiPro) {
        Some(ModelFamily::GeminiPro)
    } else {
        available.first().copied()
    }
}
