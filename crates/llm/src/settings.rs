//! Provider configuration loaded from environment variables.
//!
//! | Variable                 | Default                        |
//! |--------------------------|--------------------------------|
//! | `CLAUDE_API_KEY`         | unset                          |
//! | `CLAUDE_MODEL`           | unset                          |
//! | `CLAUDE_BASE_URL`        | `https://api.anthropic.com`    |
//! | `OPENAI_API_KEY`         | unset                          |
//! | `OPENAI_MODEL`           | unset                          |
//! | `OPENAI_BASE_URL`        | `https://api.openai.com`       |
//! | `GEMINI_CREDENTIALS`     | unset (OAuth access token)     |
//! | `GOOGLE_PROJECT_ID`      | unset                          |
//! | `GOOGLE_LOCATION`        | `global`                       |
//! | `GEMINI_MODEL`           | unset (Gemini_Pro model id)    |
//! | `GEMINI_FLASH_MODEL`     | unset (Gemini_Flash model id)  |
//! | `GEMINI_THINKING_BUDGET` | unset                          |
//! | `GEMINI_BASE_URL`        | derived from the location      |
//!
//! A family is offered only when both its credential and its model id are
//! set.

pub const DEFAULT_CLAUDE_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_GOOGLE_LOCATION: &str = "global";

#[derive(Debug, Clone, Default)]
pub struct ClaudeSettings {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GeminiSettings {
    pub credentials: Option<String>,
    pub project_id: Option<String>,
    pub location: Option<String>,
    pub pro_model: Option<String>,
    pub flash_model: Option<String>,
    pub thinking_budget: Option<i64>,
    pub base_url: Option<String>,
}

impl GeminiSettings {
    pub fn location(&self) -> &str {
        self.location.as_deref().unwrap_or(DEFAULT_GOOGLE_LOCATION)
    }

    /// Regional Vertex endpoint, or the global one.
    pub fn base_url(&self) -> String {
        if let Some(url) = &self.base_url {
            return url.clone();
        }
        match self.location() {
            "global" => "https://aiplatform.googleapis.com".to_string(),
            region => format!("https://{region}-aiplatform.googleapis.com"),
        }
    }
}

/// Settings for every provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub claude: ClaudeSettings,
    pub openai: OpenAiSettings,
    pub gemini: GeminiSettings,
}

impl ProviderSettings {
    pub fn from_env() -> Self {
        Self {
            claude: ClaudeSettings {
                api_key: env_opt("CLAUDE_API_KEY"),
                model: env_opt("CLAUDE_MODEL"),
                base_url: env_opt("CLAUDE_BASE_URL"),
            },
            openai: OpenAiSettings {
                api_key: env_opt("OPENAI_API_KEY"),
                model: env_opt("OPENAI_MODEL"),
                base_url: env_opt("OPENAI_BASE_URL"),
            },
            gemini: GeminiSettings {
                credentials: env_opt("GEMINI_CREDENTIALS"),
                project_id: env_opt("GOOGLE_PROJECT_ID"),
                location: env_opt("GOOGLE_LOCATION"),
                pro_model: env_opt("GEMINI_MODEL"),
                flash_model: env_opt("GEMINI_FLASH_MODEL"),
                thinking_budget: env_opt("GEMINI_THINKING_BUDGET").and_then(|v| v.parse().ok()),
                base_url: env_opt("GEMINI_BASE_URL"),
            },
        }
    }
}

/// Read a variable, treating empty values as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
