//! Department → doctor directory.
//!
//! A department without an explicit doctor list always maps to the shared
//! `"default"` doctor. The shared `"default"` department never has named
//! doctors.

use std::collections::HashMap;

use crate::constants::{DEFAULT_DEPARTMENT, DEFAULT_DOCTOR};
use crate::error::CoreError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorDirectory {
    doctors: HashMap<String, Vec<String>>,
}

impl DoctorDirectory {
    pub fn new(doctors: HashMap<String, Vec<String>>) -> Self {
        let doctors = doctors
            .into_iter()
            .filter(|(dept, list)| dept != DEFAULT_DEPARTMENT && !list.is_empty())
            .collect();
        Self { doctors }
    }

    /// Parse a JSON object such as `{"眼科": ["default", "橋本義弘"]}`.
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let parsed: HashMap<String, Vec<String>> = serde_json::from_str(raw)
            .map_err(|e| CoreError::Validation(format!("Invalid doctor directory JSON: {e}")))?;
        Ok(Self::new(parsed))
    }

    /// Doctors selectable for a department; never empty.
    pub fn doctors_for(&self, department: &str) -> Vec<String> {
        self.doctors
            .get(department)
            .cloned()
            .unwrap_or_else(|| vec![DEFAULT_DOCTOR.to_string()])
    }

    /// Keep `doctor` if it belongs to `department`, otherwise fall back to
    /// the department's first doctor.
    pub fn coerce(&self, department: &str, doctor: &str) -> String {
        let available = self.doctors_for(department);
        if available.iter().any(|d| d == doctor) {
            doctor.to_string()
        } else {
            available[0].clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> DoctorDirectory {
        DoctorDirectory::from_json(r#"{"眼科": ["default", "橋本義弘"], "内科": []}"#).unwrap()
    }

    #[test]
    fn unmapped_department_gets_default_doctor() {
        assert_eq!(directory().doctors_for("整形外科"), vec!["default"]);
    }

    #[test]
    fn empty_list_is_treated_as_unmapped() {
        assert_eq!(directory().doctors_for("内科"), vec!["default"]);
    }

    #[test]
    fn mapped_department_lists_its_doctors() {
        assert_eq!(directory().doctors_for("眼科"), vec!["default", "橋本義弘"]);
    }

    #[test]
    fn unknown_doctor_is_coerced_to_first() {
        let dir = directory();
        assert_eq!(dir.coerce("眼科", "橋本義弘"), "橋本義弘");
        assert_eq!(dir.coerce("眼科", "someone"), "default");
        assert_eq!(dir.coerce("default", "橋本義弘"), "default");
    }

    #[test]
    fn invalid_json_is_a_validation_error() {
        assert!(DoctorDirectory::from_json("[1, 2]").is_err());
    }
}
