//! Domain logic for the clinical documentation assistant.
//!
//! Everything in this crate is pure: no database, no network. The db,
//! llm and pipeline crates build on these types and rules.

pub mod constants;
pub mod doctors;
pub mod error;
pub mod evaluation;
pub mod input;
pub mod model_family;
pub mod ordering;
pub mod prompt;
pub mod selection;
pub mod summary;
pub mod token_policy;
pub mod types;
