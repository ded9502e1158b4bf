//! The sidebar selection a generation runs under.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DEPARTMENT, DEFAULT_DOCTOR, DEFAULT_DOCUMENT_TYPE};
use crate::doctors::DoctorDirectory;
use crate::model_family::ModelFamily;

/// Department, document type, doctor and model chosen by the user.
///
/// `model_explicitly_selected` is true only when the user picked the model
/// in this session; a prompt-level model override then no longer applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionContext {
    #[serde(default = "default_department")]
    pub department: String,
    #[serde(default = "default_document_type")]
    pub document_type: String,
    #[serde(default = "default_doctor")]
    pub doctor: String,
    #[serde(default)]
    pub requested_model: Option<ModelFamily>,
    #[serde(default)]
    pub model_explicitly_selected: bool,
}

fn default_department() -> String {
    DEFAULT_DEPARTMENT.to_string()
}

fn default_document_type() -> String {
    DEFAULT_DOCUMENT_TYPE.to_string()
}

fn default_doctor() -> String {
    DEFAULT_DOCTOR.to_string()
}

impl Default for SelectionContext {
    fn default() -> Self {
        Self {
            department: default_department(),
            document_type: default_document_type(),
            doctor: default_doctor(),
            requested_model: None,
            model_explicitly_selected: false,
        }
    }
}

impl SelectionContext {
    /// Coerce the selection onto the known catalog.
    ///
    /// - An unknown department becomes `"default"`.
    /// - An unknown document type becomes the first configured one (or the
    ///   system default document type when none are configured).
    /// - A doctor not listed for the department becomes its first doctor.
    pub fn normalize(
        mut self,
        departments: &[String],
        document_types: &[String],
        directory: &DoctorDirectory,
    ) -> Self {
        if self.department != DEFAULT_DEPARTMENT && !departments.contains(&self.department) {
            self.department = default_department();
        }
        if !document_types.contains(&self.document_type) {
            self.document_type = document_types
                .first()
                .cloned()
                .unwrap_or_else(default_document_type);
        }
        self.doctor = directory.coerce(&self.department, &self.doctor);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn selection(dept: &str, doc_type: &str, doctor: &str) -> SelectionContext {
        SelectionContext {
            department: dept.into(),
            document_type: doc_type.into(),
            doctor: doctor.into(),
            ..Default::default()
        }
    }

    #[test]
    fn known_values_are_kept() {
        let s = selection("内科", "訪問看護指示書", "default").normalize(
            &names(&["内科", "眼科"]),
            &names(&["主治医意見書", "訪問看護指示書"]),
            &DoctorDirectory::default(),
        );
        assert_eq!(s.department, "内科");
        assert_eq!(s.document_type, "訪問看護指示書");
    }

    #[test]
    fn unknown_department_becomes_default() {
        let s = selection("皮膚科", "主治医意見書", "default").normalize(
            &names(&["内科"]),
            &names(&["主治医意見書"]),
            &DoctorDirectory::default(),
        );
        assert_eq!(s.department, "default");
    }

    #[test]
    fn unknown_document_type_becomes_first_configured() {
        let s = selection("default", "退院時サマリ", "default").normalize(
            &names(&["内科"]),
            &names(&["訪問看護指示書", "主治医意見書"]),
            &DoctorDirectory::default(),
        );
        assert_eq!(s.document_type, "訪問看護指示書");
    }

    #[test]
    fn empty_document_type_catalog_falls_back_to_system_default() {
        let s = selection("default", "x", "default").normalize(
            &[],
            &[],
            &DoctorDirectory::default(),
        );
        assert_eq!(s.document_type, DEFAULT_DOCUMENT_TYPE);
    }

    #[test]
    fn doctor_outside_department_is_coerced() {
        let s = selection("内科", "主治医意見書", "田中").normalize(
            &names(&["内科"]),
            &names(&["主治医意見書"]),
            &DoctorDirectory::default(),
        );
        assert_eq!(s.doctor, "default");
    }

    #[test]
    fn deserializes_with_defaults() {
        let s: SelectionContext =
            serde_json::from_str(r#"{"requested_model": "Claude"}"#).unwrap();
        assert_eq!(s.department, "default");
        assert_eq!(s.requested_model, Some(ModelFamily::Claude));
        assert!(!s.model_explicitly_selected);
    }
}
