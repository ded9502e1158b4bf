//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod app_setting_repo;
pub mod department_repo;
pub mod document_type_repo;
pub mod evaluation_prompt_repo;
mod ordering;
pub mod prompt_repo;
pub mod usage_repo;

pub use app_setting_repo::AppSettingRepo;
pub use department_repo::DepartmentRepo;
pub use document_type_repo::DocumentTypeRepo;
pub use evaluation_prompt_repo::EvaluationPromptRepo;
pub use prompt_repo::PromptRepo;
pub use usage_repo::UsageRepo;
