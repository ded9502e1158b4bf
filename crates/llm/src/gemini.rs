//! Vertex AI Gemini client.
//!
//! One client serves both Gemini families; the registry binds each family
//! to its own model id.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::LlmError;
use crate::http::{non_empty, parse_response, token_count};
use crate::provider::{GenerationProvider, Generated, ProviderKind};
use crate::settings::GeminiSettings;

const PROVIDER: &str = "Gemini";

pub struct GeminiClient {
    client: reqwest::Client,
    credentials: Option<String>,
    project_id: Option<String>,
    location: String,
    thinking_budget: Option<i64>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(settings: &GeminiSettings) -> Self {
        Self::with_client(reqwest::Client::new(), settings)
    }

    pub fn with_client(client: reqwest::Client, settings: &GeminiSettings) -> Self {
        Self {
            client,
            credentials: settings.credentials.clone(),
            project_id: settings.project_id.clone(),
            location: settings.location().to_string(),
            thinking_budget: settings.thinking_budget,
            base_url: settings.base_url(),
        }
    }

    fn endpoint(&self, project: &str, model: &str) -> String {
        format!(
            "{}/v1/projects/{project}/locations/{}/publishers/google/models/{model}:generateContent",
            self.base_url, self.location
        )
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        let mut body = serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        });
        if let Some(budget) = self.thinking_budget {
            body["generationConfig"] = serde_json::json!({
                "thinkingConfig": { "thinkingBudget": budget }
            });
        }
        body
    }

    fn credentials(&self) -> Result<(&str, &str), LlmError> {
        match (self.credentials.as_deref(), self.project_id.as_deref()) {
            (Some(token), Some(project)) => Ok((token, project)),
            _ => Err(LlmError::CredentialsMissing { provider: PROVIDER }),
        }
    }
}

#[async_trait]
impl GenerationProvider for GeminiClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn initialize(&self) -> Result<bool, LlmError> {
        self.credentials().map(|_| true)
    }

    async fn generate(&self, prompt: &str, model: &str) -> Result<Generated, LlmError> {
        let (token, project) = self.credentials()?;

        let response = self
            .client
            .post(self.endpoint(project, model))
            .bearer_auth(token)
            .json(&self.request_body(prompt))
            .send()
            .await?;
        let parsed: GenerateContentResponse = parse_response(PROVIDER, response).await?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        let usage = parsed.usage_metadata.as_ref();

        Ok(Generated {
            text: non_empty(PROVIDER, text)?,
            input_tokens: token_count(usage, "promptTokenCount"),
            output_tokens: token_count(usage, "candidatesTokenCount"),
        })
    }
}
