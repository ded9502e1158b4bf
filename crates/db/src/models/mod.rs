//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` input DTOs used by the API layer

pub mod app_setting;
pub mod department;
pub mod document_type;
pub mod evaluation_prompt;
pub mod prompt;
pub mod usage;
