//! Length bounds for chart text submitted for generation.

use crate::error::InputWarning;

/// Inclusive character bounds on the trimmed input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputBounds {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            min_chars: 100,
            max_chars: 200_000,
        }
    }
}

/// Check the chart text before any provider is contacted.
///
/// Lengths are counted in characters (not bytes) because the chart text is
/// predominantly Japanese.
pub fn validate_input(text: &str, bounds: InputBounds) -> Result<(), InputWarning> {
    if text.is_empty() {
        return Err(InputWarning::Empty);
    }

    let actual = text.trim().chars().count();
    if actual < bounds.min_chars {
        return Err(InputWarning::TooShort {
            min: bounds.min_chars,
            actual,
        });
    }
    if actual > bounds.max_chars {
        return Err(InputWarning::TooLong {
            max: bounds.max_chars,
            actual,
        });
    }
    Ok(())
}
