#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} '{key}'")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Problems with the chart text submitted for generation.
///
/// These are recoverable: the caller shows them inline and nothing is sent
/// to a provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputWarning {
    #[error("カルテ情報を入力してください")]
    Empty,

    #[error("入力テキストが短すぎます（{actual}文字、最低{min}文字）")]
    TooShort { min: usize, actual: usize },

    #[error("入力テキストが長すぎます（{actual}文字、最大{max}文字）")]
    TooLong { max: usize, actual: usize },
}
