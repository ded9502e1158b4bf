use medidoc_core::doctors::DoctorDirectory;
use medidoc_core::error::CoreError;
use medidoc_core::input::InputBounds;
use medidoc_core::model_family::ModelFamily;
use medidoc_core::token_policy::DEFAULT_MAX_TOKEN_THRESHOLD;

/// Default `APP_TYPE` tag written to usage rows.
pub const DEFAULT_APP_TYPE: &str = "主治医意見書";

/// Orchestrator settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Character bounds on the trimmed chart text.
    pub bounds: InputBounds,
    /// Estimated size above which only the large-context family may run.
    pub max_token_threshold: usize,
    /// Tag stored in `summary_usage.app_type`.
    pub app_type: String,
    /// Nominal model family when the session has not picked one.
    pub default_model: ModelFamily,
    pub directory: DoctorDirectory,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            bounds: InputBounds::default(),
            max_token_threshold: DEFAULT_MAX_TOKEN_THRESHOLD,
            app_type: DEFAULT_APP_TYPE.to_string(),
            default_model: ModelFamily::GeminiPro,
            directory: DoctorDirectory::default(),
        }
    }
}

impl GenerationConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default        |
    /// |-----------------------|----------------|
    /// | `MIN_INPUT_TOKENS`    | `100`          |
    /// | `MAX_INPUT_TOKENS`    | `200000`       |
    /// | `MAX_TOKEN_THRESHOLD` | `100000`       |
    /// | `APP_TYPE`            | `主治医意見書` |
    /// | `SELECTED_AI_MODEL`   | `Gemini_Pro`   |
    /// | `DEPARTMENT_DOCTORS`  | `{}`           |
    pub fn from_env() -> Result<Self, CoreError> {
        let defaults = Self::default();

        let min_chars = env_number("MIN_INPUT_TOKENS", defaults.bounds.min_chars)?;
        let max_chars = env_number("MAX_INPUT_TOKENS", defaults.bounds.max_chars)?;
        if min_chars > max_chars {
            return Err(CoreError::Validation(format!(
                "MIN_INPUT_TOKENS ({min_chars}) exceeds MAX_INPUT_TOKENS ({max_chars})"
            )));
        }

        let max_token_threshold =
            env_number("MAX_TOKEN_THRESHOLD", defaults.max_token_threshold)?;

        let app_type = std::env::var("APP_TYPE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.app_type);

        let default_model = match std::env::var("SELECTED_AI_MODEL") {
            Ok(v) if !v.trim().is_empty() => v.trim().parse()?,
            _ => defaults.default_model,
        };

        let directory = match std::env::var("DEPARTMENT_DOCTORS") {
            Ok(raw) if !raw.trim().is_empty() => DoctorDirectory::from_json(&raw)?,
            _ => defaults.directory,
        };

        Ok(Self {
            bounds: InputBounds {
                min_chars,
                max_chars,
            },
            max_token_threshold,
            app_type,
            default_model,
            directory,
        })
    }
}

fn env_number(key: &str, default: usize) -> Result<usize, CoreError> {
    match std::env::var(key) {
        Ok(v) => v
            .trim()
            .parse()
            .map_err(|_| CoreError::Validation(format!("{key} must be a non-negative integer"))),
        Err(_) => Ok(default),
    }
}
