//! Prompt assembly.
//!
//! The concatenation format is relied on for reproducing past generations;
//! keep it byte-for-byte stable.

use crate::constants::{DEFAULT_DEPARTMENT, DEFAULT_DOCTOR, DEFAULT_DOCUMENT_TYPE, MSG_FIELD_REQUIRED};
use crate::error::CoreError;
use crate::model_family::ModelFamily;

/// Build the text sent to a provider from a template and the user input.
pub fn build_prompt(template: &str, medical_text: &str, additional_info: &str) -> String {
    format!("{template}\n\n【カルテ情報】\n{medical_text}\n【追加情報】{additional_info}")
}

/// Whether the composite key identifies the protected system default prompt.
pub fn is_default_prompt_key(department: &str, document_type: &str, doctor: &str) -> bool {
    department == DEFAULT_DEPARTMENT
        && document_type == DEFAULT_DOCUMENT_TYPE
        && doctor == DEFAULT_DOCTOR
}

/// Check the fields of a prompt before it is saved.
///
/// All key fields and the content must be non-blank. `selected_model`, when
/// present and non-blank, must name a model family; the parsed family is
/// returned.
pub fn validate_prompt_fields(
    department: &str,
    document_type: &str,
    doctor: &str,
    content: &str,
    selected_model: Option<&str>,
) -> Result<Option<ModelFamily>, CoreError> {
    if [department, document_type, doctor, content]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        return Err(CoreError::Validation(MSG_FIELD_REQUIRED.to_string()));
    }
    selected_model
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::parse::<ModelFamily>)
        .transpose()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn prompt_layout_is_exact() {
        let prompt = build_prompt("テンプレート", "カルテ本文", "前回の記載");
        assert_eq!(
            prompt,
            "テンプレート\n\n【カルテ情報】\nカルテ本文\n【追加情報】前回の記載"
        );
    }

    #[test]
    fn empty_additional_info_still_emits_heading() {
        assert!(build_prompt("t", "m", "").ends_with("\n【追加情報】"));
    }

    #[test]
    fn default_key_detection() {
        assert!(is_default_prompt_key("default", DEFAULT_DOCUMENT_TYPE, "default"));
        assert!(!is_default_prompt_key("内科", DEFAULT_DOCUMENT_TYPE, "default"));
        assert!(!is_default_prompt_key("default", "訪問看護指示書", "default"));
    }

    #[test]
    fn prompt_fields_must_be_filled() {
        assert_matches!(
            validate_prompt_fields("内科", " ", "default", "本文", None),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_prompt_fields("内科", "主治医意見書", "default", "", None),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn selected_model_must_name_a_family() {
        assert_eq!(
            validate_prompt_fields("内科", "主治医意見書", "default", "本文", Some("Claude")).unwrap(),
            Some(ModelFamily::Claude)
        );
        assert_eq!(
            validate_prompt_fields("内科", "主治医意見書", "default", "本文", Some("")).unwrap(),
            None
        );
        assert!(
            validate_prompt_fields("内科", "主治医意見書", "default", "本文", Some("gpt-9")).is_err()
        );
    }
}
