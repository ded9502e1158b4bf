//! The provider seam.

use async_trait::async_trait;

use crate::error::LlmError;

/// Backend implementing a [`GenerationProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Claude,
    OpenAi,
    Gemini,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Claude => "Claude",
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Gemini => "Gemini",
        }
    }
}

/// Text and provider-reported token counts for one call.
///
/// Counts are 0 when the provider omitted usage metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub text: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// A text-generation backend.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Check that the provider has what it needs to make calls.
    ///
    /// Fails with [`LlmError::CredentialsMissing`] when a secret or the
    /// project configuration is absent.
    fn initialize(&self) -> Result<bool, LlmError>;

    /// Run one generation against `model`.
    async fn generate(&self, prompt: &str, model: &str) -> Result<Generated, LlmError>;
}
