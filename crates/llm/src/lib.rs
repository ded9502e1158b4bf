//! Provider adapters for the text-generation backends.
//!
//! Each backend implements [`GenerationProvider`]; the [`ProviderRegistry`]
//! binds every configured [`ModelFamily`](medidoc_core::model_family::ModelFamily)
//! to exactly one provider and concrete model id.

pub mod claude;
pub mod error;
pub mod gemini;
mod http;
pub mod openai;
pub mod provider;
pub mod registry;
pub mod settings;

pub use error::LlmError;
pub use provider::{GenerationProvider, Generated, ProviderKind};
pub use registry::{ProviderEntry, ProviderRegistry};
pub use settings::ProviderSettings;
