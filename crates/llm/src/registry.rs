//! Binding of model families to configured providers.

use std::collections::HashMap;
use std::sync::Arc;

use medidoc_core::model_family::ModelFamily;

use crate::claude::ClaudeClient;
use crate::gemini::GeminiClient;
use crate::openai::OpenAiClient;
use crate::provider::GenerationProvider;
use crate::settings::ProviderSettings;

/// A provider together with the concrete model id it is called with.
#[derive(Clone)]
pub struct ProviderEntry {
    pub provider: Arc<dyn GenerationProvider>,
    pub model: String,
}

/// The families offered in this deployment.
///
/// A family is present only when its provider initialized and a model id
/// is configured for it.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    entries: HashMap<ModelFamily, ProviderEntry>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `family` to a provider and model id, replacing any previous binding.
    pub fn register(
        &mut self,
        family: ModelFamily,
        provider: Arc<dyn GenerationProvider>,
        model: impl Into<String>,
    ) -> &mut Self {
        self.entries.insert(
            family,
            ProviderEntry {
                provider,
                model: model.into(),
            },
        );
        self
    }

    /// Build the registry from environment-derived settings, skipping every
    /// family whose credentials or model id are missing.
    pub fn from_settings(settings: &ProviderSettings) -> Self {
        let http = reqwest::Client::new();
        let mut registry = Self::new();

        let claude: Arc<dyn GenerationProvider> =
            Arc::new(ClaudeClient::with_client(http.clone(), &settings.claude));
        registry.register_checked(ModelFamily::Claude, claude, settings.claude.model.as_deref());

        let openai: Arc<dyn GenerationProvider> =
            Arc::new(OpenAiClient::with_client(http.clone(), &settings.openai));
        registry.register_checked(ModelFamily::Gpt, openai, settings.openai.model.as_deref());

        let gemini: Arc<dyn GenerationProvider> =
            Arc::new(GeminiClient::with_client(http, &settings.gemini));
        registry.register_checked(
            ModelFamily::GeminiPro,
            Arc::clone(&gemini),
            settings.gemini.pro_model.as_deref(),
        );
        registry.register_checked(
            ModelFamily::GeminiFlash,
            gemini,
            settings.gemini.flash_model.as_deref(),
        );

        tracing::info!(
            families = ?registry.available(),
            "Provider registry initialized"
        );
        registry
    }

    fn register_checked(
        &mut self,
        family: ModelFamily,
        provider: Arc<dyn GenerationProvider>,
        model: Option<&str>,
    ) {
        let Some(model) = model else {
            tracing::debug!(family = %family, "No model id configured, family disabled");
            return;
        };
        match provider.initialize() {
            Ok(_) => {
                self.register(family, provider, model);
            }
            Err(e) => {
                tracing::warn!(family = %family, error = %e, "Provider not available");
            }
        }
    }

    /// Configured families in selector order.
    pub fn available(&self) -> Vec<ModelFamily> {
        ModelFamily::ALL
            .into_iter()
            .filter(|f| self.entries.contains_key(f))
            .collect()
    }

    pub fn is_available(&self, family: ModelFamily) -> bool {
        self.entries.contains_key(&family)
    }

    pub fn get(&self, family: ModelFamily) -> Option<&ProviderEntry> {
        self.entries.get(&family)
    }
}

#[cfg(test)]
mod tests {
    use crate::settings::{ClaudeSettings, GeminiSettings, OpenAiSettings};

    use super::*;

    #[test]
    fn families_need_credentials_and_model() {
        let settings = ProviderSettings {
            claude: ClaudeSettings {
                api_key: Some("key".into()),
                model: Some("claude-sonnet-4".into()),
                base_url: None,
            },
            openai: OpenAiSettings {
                api_key: None,
                model: Some("gpt-4.1".into()),
                base_url: None,
            },
            gemini: GeminiSettings {
                credentials: Some("token".into()),
                project_id: Some("proj".into()),
                pro_model: Some("gemini-2.5-pro".into()),
                flash_model: None,
                ..Default::default()
            },
        };

        let registry = ProviderRegistry::from_settings(&settings);
        assert_eq!(
            registry.available(),
            vec![ModelFamily::GeminiPro, ModelFamily::Claude]
        );
        assert_eq!(
            registry.get(ModelFamily::GeminiPro).map(|e| e.model.as_str()),
            Some("gemini-2.5-pro")
        );
        assert!(registry.get(ModelFamily::Gpt).is_none());
        assert!(!registry.is_available(ModelFamily::GeminiFlash));
    }

    #[test]
    fn gemini_families_share_one_provider() {
        let settings = ProviderSettings {
            gemini: GeminiSettings {
                credentials: Some("token".into()),
                project_id: Some("proj".into()),
                pro_model: Some("gemini-2.5-pro".into()),
                flash_model: Some("gemini-2.5-flash".into()),
                ..Default::default()
            },
            ..Default::default()
        };

        let registry = ProviderRegistry::from_settings(&settings);
        let pro = registry.get(ModelFamily::GeminiPro).unwrap();
        let flash = registry.get(ModelFamily::GeminiFlash).unwrap();
        assert!(Arc::ptr_eq(&pro.provider, &flash.provider));
        assert_eq!(flash.model, "gemini-2.5-flash");
    }

    #[test]
    fn empty_settings_offer_nothing() {
        let registry = ProviderRegistry::from_settings(&ProviderSettings::default());
        assert!(registry.available().is_empty());
    }
}
