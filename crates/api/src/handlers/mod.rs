pub mod departments;
pub mod document_types;
pub mod evaluation_prompts;
pub mod generation;
pub mod options;
pub mod prompts;
pub mod settings;
pub mod usage;

use medidoc_core::error::CoreError;
use medidoc_core::model_family::ModelFamily;

/// Parse an optional model family name from a request body.
///
/// Blank means "no model"; the stored value is the canonical family name.
pub(crate) fn parse_model(value: Option<&str>) -> Result<Option<ModelFamily>, CoreError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::parse)
        .transpose()
}

/// Reject blank names and surrounding whitespace.
pub(crate) fn required_name(value: &str) -> Result<String, CoreError> {
    let name = value.trim();
    if name.is_empty() {
        return Err(CoreError::Validation(
            medidoc_core::constants::MSG_FIELD_REQUIRED.into(),
        ));
    }
    Ok(name.to_string())
}
