//! Response helpers shared by the HTTP clients.

use serde::de::DeserializeOwned;

use crate::error::LlmError;

/// Return the response unchanged on a 2xx status, otherwise an
/// [`LlmError::Api`] carrying the status and body text.
pub(crate) async fn ensure_success(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(LlmError::Api {
            provider,
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Parse a successful JSON response body into the expected type.
pub(crate) async fn parse_response<T: DeserializeOwned>(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<T, LlmError> {
    let response = ensure_success(provider, response).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| LlmError::Decode {
        provider,
        message: e.to_string(),
    })
}

/// Treat whitespace-only output as no output.
pub(crate) fn non_empty(provider: &'static str, text: String) -> Result<String, LlmError> {
    if text.trim().is_empty() {
        Err(LlmError::EmptyResponse { provider })
    } else {
        Ok(text)
    }
}

/// Read one token count from a provider's usage block.
///
/// Absent or malformed counts read as 0.
pub(crate) fn token_count(usage: Option<&serde_json::Value>, key: &str) -> u64 {
    usage
        .and_then(|u| u.get(key))
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn token_count_tolerates_malformed_usage() {
        let usage = json!({ "a": 7, "b": null, "c": "3", "d": -1 });
        assert_eq!(token_count(Some(&usage), "a"), 7);
        assert_eq!(token_count(Some(&usage), "b"), 0);
        assert_eq!(token_count(Some(&usage), "c"), 0);
        assert_eq!(token_count(Some(&usage), "d"), 0);
        assert_eq!(token_count(Some(&usage), "missing"), 0);
        assert_eq!(token_count(Some(&json!("not an object")), "a"), 0);
        assert_eq!(token_count(None, "a"), 0);
    }
}
