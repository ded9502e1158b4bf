/// Errors from a generation provider.
///
/// Transport failures are always wrapped; callers never see a bare
/// `reqwest::Error` escape through the provider boundary.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The provider's secret or project configuration is absent.
    #[error("{provider} credentials are not configured")]
    CredentialsMissing { provider: &'static str },

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// The response carried no generated text.
    #[error("{provider} returned an empty response")]
    EmptyResponse { provider: &'static str },

    /// The response body did not have the expected shape.
    #[error("{provider} response could not be decoded: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },
}
