//! The generation flow, from chart text to a recorded summary.

use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexMap;
use medidoc_core::constants::{DEFAULT_PROMPT_TEMPLATE, MSG_USAGE_SAVE_FAILED};
use medidoc_core::input::validate_input;
use medidoc_core::model_family::{default_family, ModelFamily};
use medidoc_core::prompt::build_prompt;
use medidoc_core::selection::SelectionContext;
use medidoc_core::summary::{format_summary, SectionParser};
use medidoc_core::token_policy::{apply_threshold, estimate_tokens, ThresholdDecision};
use medidoc_db::models::prompt::PromptKey;
use medidoc_db::models::usage::NewUsageRecord;
use medidoc_llm::ProviderRegistry;
use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::store::GenerationStore;

/// One submission of the main form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationRequest {
    pub input_text: String,
    #[serde(default)]
    pub additional_info: String,
    #[serde(default)]
    pub selection: SelectionContext,
}

/// A finished generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub summary_text: String,
    pub parsed_sections: IndexMap<String, String>,
    pub model_family: ModelFamily,
    /// Concrete model id the provider was called with.
    pub model_used_detail: String,
    pub model_switched: bool,
    pub original_model: Option<ModelFamily>,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub processing_time_secs: f64,
    /// Non-fatal problems, such as a failed usage write.
    pub warnings: Vec<String>,
}

/// Pick the family a request runs on before the threshold policy.
///
/// A prompt's pinned model beats the session default, but never a model the
/// user chose explicitly in this session.
pub fn resolve_family(
    selection: &SelectionContext,
    prompt_model: Option<ModelFamily>,
    session_default: ModelFamily,
) -> ModelFamily {
    let nominal = selection.requested_model.unwrap_or(session_default);
    match prompt_model {
        Some(pinned) if !selection.model_explicitly_selected => pinned,
        _ => nominal,
    }
}

/// Runs generations against the configured providers.
pub struct SummaryOrchestrator {
    store: Arc<dyn GenerationStore>,
    registry: ProviderRegistry,
    config: GenerationConfig,
    parser: SectionParser,
}

impl SummaryOrchestrator {
    pub fn new(
        store: Arc<dyn GenerationStore>,
        registry: ProviderRegistry,
        config: GenerationConfig,
    ) -> Self {
        Self {
            store,
            registry,
            config,
            parser: SectionParser::default(),
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Checks that need no I/O. Nothing is sent anywhere when they fail.
    pub fn precheck(&self, request: &GenerationRequest) -> Result<(), GenerationError> {
        if self.registry.available().is_empty() {
            return Err(GenerationError::NoCredentials);
        }
        validate_input(&request.input_text, self.config.bounds)?;
        Ok(())
    }

    pub async fn run(&self, request: GenerationRequest) -> Result<GenerationOutcome, GenerationError> {
        self.precheck(&request)?;

        let departments = self.store.department_names().await?;
        let document_types = self.store.document_type_names().await?;
        let selection =
            request
                .selection
                .normalize(&departments, &document_types, &self.config.directory);

        let key = PromptKey::new(
            selection.department.as_str(),
            selection.document_type.as_str(),
            selection.doctor.as_str(),
        );
        let prompt = self.store.effective_prompt(&key).await?;
        // A pinned model that is not configured here is ignored.
        let prompt_model = prompt
            .as_ref()
            .and_then(|p| p.selected_model.as_deref())
            .and_then(|name| name.parse::<ModelFamily>().ok())
            .filter(|family| self.registry.is_available(*family));

        let available = self.registry.available();
        let session_default = if available.contains(&self.config.default_model) {
            self.config.default_model
        } else {
            default_family(&available).unwrap_or(self.config.default_model)
        };
        let resolved = resolve_family(&selection, prompt_model, session_default);

        let estimated = estimate_tokens(&request.input_text, &request.additional_info);
        let (family, original_model) = match apply_threshold(
            resolved,
            estimated,
            self.config.max_token_threshold,
            &available,
        ) {
            ThresholdDecision::Keep(family) => (family, None),
            ThresholdDecision::SwitchTo { from, to } => {
                tracing::info!(from = %from, to = %to, estimated, "Input over token threshold, switching model");
                (to, Some(from))
            }
            ThresholdDecision::Exceeded {
                estimated,
                threshold,
            } => {
                return Err(GenerationError::TokenThresholdExceeded {
                    estimated,
                    threshold,
                })
            }
        };

        let entry = self
            .registry
            .get(family)
            .ok_or(GenerationError::NoCredentials)?;

        let template = prompt
            .as_ref()
            .map_or(DEFAULT_PROMPT_TEMPLATE, |p| p.content.as_str());
        let full_prompt = build_prompt(template, &request.input_text, &request.additional_info);

        let started = Instant::now();
        let generated = entry
            .provider
            .generate(&full_prompt, &entry.model)
            .await
            .map_err(|e| {
                tracing::error!(
                    provider = entry.provider.kind().as_str(),
                    model = %entry.model,
                    error = %e,
                    "Generation failed",
                );
                GenerationError::Provider {
                    message: e.to_string(),
                }
            })?;

        let summary_text = format_summary(&generated.text);
        let parsed_sections = self.parser.parse(&summary_text);
        let processing_time_secs = started.elapsed().as_secs_f64();

        let mut warnings = Vec::new();
        let record = NewUsageRecord {
            app_type: self.config.app_type.clone(),
            document_type: selection.document_type.clone(),
            model_detail: entry.model.clone(),
            department: selection.department.clone(),
            doctor: selection.doctor.clone(),
            input_tokens: saturating_i64(generated.input_tokens),
            output_tokens: saturating_i64(generated.output_tokens),
            processing_time_secs,
        };
        if let Err(e) = self.store.record_usage(&record).await {
            tracing::warn!(error = %e, model = %entry.model, "Failed to record usage");
            warnings.push(format!("{MSG_USAGE_SAVE_FAILED}: {e}"));
        }

        tracing::info!(
            family = %family,
            model = %entry.model,
            department = %selection.department,
            document_type = %selection.document_type,
            input_tokens = generated.input_tokens,
            output_tokens = generated.output_tokens,
            elapsed_secs = processing_time_secs,
            "Summary generated",
        );

        Ok(GenerationOutcome {
            summary_text,
            parsed_sections,
            model_family: family,
            model_used_detail: entry.model.clone(),
            model_switched: original_model.is_some(),
            original_model,
            input_tokens: generated.input_tokens,
            output_tokens: generated.output_tokens,
            processing_time_secs,
            warnings,
        })
    }
}

fn saturating_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
