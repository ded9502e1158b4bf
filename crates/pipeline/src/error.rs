use medidoc_core::constants::MSG_NO_API_CREDENTIALS;
use medidoc_core::error::InputWarning;

/// Why a generation did not produce a summary.
///
/// `Input`, `NoCredentials` and `TokenThresholdExceeded` are raised before
/// any provider is contacted. `Provider` carries the provider's own message
/// whichever backend failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error(transparent)]
    Input(#[from] InputWarning),

    #[error("{}", MSG_NO_API_CREDENTIALS)]
    NoCredentials,

    #[error(
        "入力が長すぎます（推定{estimated}トークン、上限{threshold}）。大容量モデルが設定されていません"
    )]
    TokenThresholdExceeded { estimated: usize, threshold: usize },

    #[error("Generation failed: {message}")]
    Provider { message: String },

    #[error("Store error: {0}")]
    Store(String),
}

impl GenerationError {
    /// Stable machine-readable code, shared with the HTTP surface.
    pub fn code(&self) -> &'static str {
        match self {
            GenerationError::Input(_) => "INPUT_WARNING",
            GenerationError::NoCredentials => "NO_CREDENTIALS",
            GenerationError::TokenThresholdExceeded { .. } => "TOKEN_THRESHOLD_EXCEEDED",
            GenerationError::Provider { .. } => "GENERATION_ERROR",
            GenerationError::Store(_) => "STORE_ERROR",
        }
    }
}

impl From<sqlx::Error> for GenerationError {
    fn from(err: sqlx::Error) -> Self {
        GenerationError::Store(err.to_string())
    }
}
