//! In-memory store and scripted provider for orchestrator tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use medidoc_core::constants::{DEFAULT_DEPARTMENTS, DEFAULT_DOCUMENT_TYPES};
use medidoc_db::models::prompt::PromptKey;
use medidoc_db::models::usage::NewUsageRecord;
use medidoc_llm::{GenerationProvider, Generated, LlmError, ProviderKind};

use crate::store::{EffectivePrompt, GenerationStore};

#[derive(Default)]
pub struct MemoryStore {
    departments: Vec<String>,
    document_types: Vec<String>,
    prompts: Mutex<HashMap<PromptKey, EffectivePrompt>>,
    records: Mutex<Vec<NewUsageRecord>>,
    fail_usage: AtomicBool,
}

impl MemoryStore {
    pub const DEFAULT_CONTENT: &'static str = "既定のプロンプト";

    /// Default catalog plus the system default prompt.
    pub fn seeded() -> Self {
        let store = Self {
            departments: DEFAULT_DEPARTMENTS.iter().map(|s| s.to_string()).collect(),
            document_types: DEFAULT_DOCUMENT_TYPES.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        store.put_prompt(
            PromptKey::new("default", "主治医意見書", "default"),
            Self::DEFAULT_CONTENT,
            None,
        );
        store
    }

    pub fn put_prompt(&self, key: PromptKey, content: &str, selected_model: Option<&str>) {
        self.prompts.lock().unwrap().insert(
            key,
            EffectivePrompt {
                content: content.to_string(),
                selected_model: selected_model.map(str::to_string),
            },
        );
    }

    pub fn fail_usage_writes(&self) {
        self.fail_usage.store(true, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<NewUsageRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationStore for MemoryStore {
    async fn department_names(&self) -> Result<Vec<String>, sqlx::Error> {
        Ok(self.departments.clone())
    }

    async fn document_type_names(&self) -> Result<Vec<String>, sqlx::Error> {
        Ok(self.document_types.clone())
    }

    async fn effective_prompt(
        &self,
        key: &PromptKey,
    ) -> Result<Option<EffectivePrompt>, sqlx::Error> {
        let prompts = self.prompts.lock().unwrap();
        let default_key = PromptKey::new("default", "主治医意見書", "default");
        Ok(prompts.get(key).or_else(|| prompts.get(&default_key)).cloned())
    }

    async fn record_usage(&self, record: &NewUsageRecord) -> Result<(), sqlx::Error> {
        if self.fail_usage.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Provider returning a fixed reply (or error) and counting calls.
pub struct FakeProvider {
    reply: Result<String, String>,
    delay: Duration,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl FakeProvider {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            ..Self::replying("")
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationProvider for FakeProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Claude
    }

    fn initialize(&self) -> Result<bool, LlmError> {
        Ok(true)
    }

    async fn generate(&self, prompt: &str, _model: &str) -> Result<Generated, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.reply {
            Ok(text) => Ok(Generated {
                text: text.clone(),
                input_tokens: prompt.chars().count() as u64,
                output_tokens: text.chars().count() as u64,
            }),
            Err(message) => Err(LlmError::Api {
                provider: "Claude",
                status: 529,
                body: message.clone(),
            }),
        }
    }
}
