//! OpenAI Chat Completions client.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::LlmError;
use crate::http::{non_empty, parse_response, token_count};
use crate::provider::{GenerationProvider, Generated, ProviderKind};
use crate::settings::{OpenAiSettings, DEFAULT_OPENAI_BASE_URL};

const PROVIDER: &str = "OpenAI";
const SYSTEM_MESSAGE: &str = "あなたは経験豊富な医療文書作成の専門家です。";
const MAX_COMPLETION_TOKENS: u32 = 20000;

pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(settings: &OpenAiSettings) -> Self {
        Self::with_client(reqwest::Client::new(), settings)
    }

    pub fn with_client(client: reqwest::Client, settings: &OpenAiSettings) -> Self {
        Self {
            client,
            api_key: settings.api_key.clone(),
            base_url: settings
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
        }
    }

    fn api_key(&self) -> Result<&str, LlmError> {
        self.api_key
            .as_deref()
            .ok_or(LlmError::CredentialsMissing { provider: PROVIDER })
    }
}

#[async_trait]
impl GenerationProvider for OpenAiClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn initialize(&self) -> Result<bool, LlmError> {
        self.api_key().map(|_| true)
    }

    async fn generate(&self, prompt: &str, model: &str) -> Result<Generated, LlmError> {
        let api_key = self.api_key()?;
        let body = serde_json::json!({
            "model": model,
            "messages": [
                { "role": "system", "content": SYSTEM_MESSAGE },
                { "role": "user", "content": prompt },
            ],
            "max_completion_tokens": MAX_COMPLETION_TOKENS,
        });

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;
        let parsed: ChatResponse = parse_response(PROVIDER, response).await?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        let usage = parsed.usage.as_ref();

        Ok(Generated {
            text: non_empty(PROVIDER, text)?,
            input_tokens: token_count(usage, "prompt_tokens"),
            output_tokens: token_count(usage, "completion_tokens"),
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

    fn client(base_url: String) -> OpenAiClient {
        OpenAiClient::new(&OpenAiSettings {
            api_key: Some("sk-test".into()),
            model: Some("gpt-4.1".into()),
            base_url: Some(base_url),
        })
    }

    #[tokio::test]
    async fn generate_sends_system_message_and_reads_first_choice() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<serde_json::Value>| async move {
                assert_eq!(headers["authorization"], "Bearer sk-test");
                assert_eq!(body["messages"][0]["role"], "system");
                assert_eq!(body["messages"][1]["content"], "prompt");
                assert_eq!(body["max_completion_tokens"], 20000);
                Json(serde_json::json!({
                    "choices": [{ "message": { "content": "summary" } }],
                    "usage": { "prompt_tokens": 40, "completion_tokens": 9 }
                }))
            }),
        );

        let out = client(serve(router).await).generate("prompt", "gpt-4.1").await.unwrap();
        assert_eq!(out.text, "summary");
        assert_eq!((out.input_tokens, out.output_tokens), (40, 9));
    }

    #[tokio::test]
    async fn no_choices_is_an_empty_response() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(serde_json::json!({ "choices": [] })) }),
        );
        let err = client(serve(router).await).generate("p", "m").await.unwrap_err();
        assert_matches!(err, LlmError::EmptyResponse { .. });
    }

    #[tokio::test]
    async fn malformed_usage_counts_as_zero() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                Json(serde_json::json!({
                    "choices": [{ "message": { "content": "summary" } }],
                    "usage": { "prompt_tokens": "40", "completion_tokens": null }
                }))
            }),
        );
        let out = client(serve(router).await).generate("p", "m").await.unwrap();
        assert_eq!(out.text, "summary");
        assert_eq!((out.input_tokens, out.output_tokens), (0, 0));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let router = Router::new().route("/v1/chat/completions", post(|| async { "not json" }));
        let err = client(serve(router).await).generate("p", "m").await.unwrap_err();
        assert_matches!(err, LlmError::Decode { .. });
    }
}
