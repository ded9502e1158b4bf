//! Anthropic Messages API client.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::LlmError;
use crate::http::{non_empty, parse_response, token_count};
use crate::provider::{GenerationProvider, Generated, ProviderKind};
use crate::settings::{ClaudeSettings, DEFAULT_CLAUDE_BASE_URL};

const PROVIDER: &str = "Claude";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 5000;

pub struct ClaudeClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl ClaudeClient {
    pub fn new(settings: &ClaudeSettings) -> Self {
        Self::with_client(reqwest::Client::new(), settings)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, settings: &ClaudeSettings) -> Self {
        Self {
            client,
            api_key: settings.api_key.clone(),
            base_url: settings
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_CLAUDE_BASE_URL.to_string()),
        }
    }

    fn api_key(&self) -> Result<&str, LlmError> {
        self.api_key
            .as_deref()
            .ok_or(LlmError::CredentialsMissing { provider: PROVIDER })
    }
}

#[async_trait]
impl GenerationProvider for ClaudeClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Claude
    }

    fn initialize(&self) -> Result<bool, LlmError> {
        self.api_key().map(|_| true)
    }

    async fn generate(&self, prompt: &str, model: &str) -> Result<Generated, LlmError> {
        let api_key = self.api_key()?;
        let body = serde_json::json!({
            "model": model,
            "max_tokens": MAX_TOKENS,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;
        let parsed: MessagesResponse = parse_response(PROVIDER, response).await?;

        let text: String = parsed
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect();
        let usage = parsed.usage.as_ref();

        Ok(Generated {
            text: non_empty(PROVIDER, text)?,
            input_tokens: token_count(usage, "input_tokens"),
            output_tokens: token_count(usage, "output_tokens"),
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::HeaderMap;
    use axum::routing::post;
    use axum::{Json, Router};

    use super::*;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{addr}")
    }

    fn client(base_url: String) -> ClaudeClient {
        ClaudeClient::new(&ClaudeSettings {
            api_key: Some("test-key".into()),
            model: Some("claude-test".into()),
            base_url: Some(base_url),
        })
    }

    #[tokio::test]
    async fn generate_concatenates_text_blocks_and_reads_usage() {
        let router = Router::new().route(
            "/v1/messages",
            post(|headers: HeaderMap, Json(body): Json<serde_json::Value>| async move {
                assert_eq!(headers["x-api-key"], "test-key");
                assert_eq!(body["max_tokens"], 5000);
                assert_eq!(body["model"], "claude-test");
                Json(serde_json::json!({
                    "content": [
                        { "type": "text", "text": "【治療経過】" },
                        { "type": "text", "text": "安定" }
                    ],
                    "usage": { "input_tokens": 12, "output_tokens": 3 }
                }))
            }),
        );
        let base = serve(router).await;

        let out = client(base).generate("prompt", "claude-test").await.unwrap();
        assert_eq!(out.text, "【治療経過】安定");
        assert_eq!((out.input_tokens, out.output_tokens), (12, 3));
    }

    #[tokio::test]
    async fn missing_usage_defaults_to_zero() {
        let router = Router::new().route(
            "/v1/messages",
            post(|| async { Json(serde_json::json!({ "content": [{ "type": "text", "text": "ok" }] })) }),
        );
        let out = client(serve(router).await).generate("p", "m").await.unwrap();
        assert_eq!((out.input_tokens, out.output_tokens), (0, 0));
    }

    #[tokio::test]
    async fn malformed_usage_counts_as_zero() {
        let router = Router::new().route(
            "/v1/messages",
            post(|| async {
                Json(serde_json::json!({
                    "content": [{ "type": "text", "text": "ok" }],
                    "usage": { "input_tokens": null, "output_tokens": "3" }
                }))
            }),
        );
        let out = client(serve(router).await).generate("p", "m").await.unwrap();
        assert_eq!(out.text, "ok");
        assert_eq!((out.input_tokens, out.output_tokens), (0, 0));
    }

    #[tokio::test]
    async fn empty_content_is_an_error() {
        let router = Router::new().route(
            "/v1/messages",
            post(|| async { Json(serde_json::json!({ "content": [] })) }),
        );
        let err = client(serve(router).await).generate("p", "m").await.unwrap_err();
        assert_matches!(err, LlmError::EmptyResponse { .. });
    }

    #[tokio::test]
    async fn api_error_keeps_status_and_body() {
        let router = Router::new().route(
            "/v1/messages",
            post(|| async { (axum::http::StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let err = client(serve(router).await).generate("p", "m").await.unwrap_err();
        assert_matches!(err, LlmError::Api { status: 429, ref body, .. } if body == "slow down");
    }

    #[test]
    fn initialize_requires_api_key() {
        let c = ClaudeClient::new(&ClaudeSettings::default());
        assert_matches!(c.initialize(), Err(LlmError::CredentialsMissing { .. }));
    }
}
