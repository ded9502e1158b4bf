use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use medidoc_db::PoolSettings;

use crate::middleware::ip_allow::IpRule;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `300`).
    pub request_timeout_secs: u64,
    /// Directory holding the browser form, served at `/` when set.
    pub static_dir: Option<PathBuf>,
    /// How long an unread finished generation is kept (default: 30 minutes).
    pub session_result_ttl: Duration,
    pub pool: PoolSettings,
    pub access: AccessConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `300`                   |
    /// | `STATIC_DIR`              | unset                   |
    /// | `SESSION_RESULT_TTL_SECS` | `1800`                  |
    /// | `DB_MAX_CONNECTIONS`      | `15`                    |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `30`                    |
    /// | `DB_MAX_LIFETIME_SECS`    | `3600`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = split_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let static_dir = std::env::var("STATIC_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let session_result_ttl = Duration::from_secs(env_or(
            "SESSION_RESULT_TTL_SECS",
            crate::sessions::DEFAULT_RESULT_TTL.as_secs(),
        ));

        let defaults = PoolSettings::default();
        let pool = PoolSettings {
            max_connections: env_or("DB_MAX_CONNECTIONS", defaults.max_connections),
            acquire_timeout: Duration::from_secs(env_or(
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout.as_secs(),
            )),
            max_lifetime: Duration::from_secs(env_or(
                "DB_MAX_LIFETIME_SECS",
                defaults.max_lifetime.as_secs(),
            )),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            static_dir,
            session_result_ttl,
            pool,
            access: AccessConfig::from_env(),
        }
    }
}

/// Client IP allow-list.
#[derive(Debug, Clone, Default)]
pub struct AccessConfig {
    pub enabled: bool,
    pub rules: Vec<IpRule>,
    /// Take the client address from `X-Forwarded-For` when behind a proxy.
    pub trust_forwarded_for: bool,
}

impl AccessConfig {
    /// | Env Var            | Default |
    /// |--------------------|---------|
    /// | `IP_CHECK_ENABLED` | `false` |
    /// | `IP_WHITELIST`     | empty   |
    /// | `IP_TRUST_PROXY`   | `false` |
    pub fn from_env() -> Self {
        let rules = split_list(&std::env::var("IP_WHITELIST").unwrap_or_default())
            .iter()
            .map(|entry| {
                entry
                    .parse()
                    .unwrap_or_else(|e| panic!("Invalid IP_WHITELIST entry '{entry}': {e}"))
            })
            .collect();

        Self {
            enabled: env_flag("IP_CHECK_ENABLED"),
            rules,
            trust_forwarded_for: env_flag("IP_TRUST_PROXY"),
        }
    }

    /// Whether a client at `ip` may use the application.
    pub fn is_authorized(&self, ip: IpAddr) -> bool {
        !self.enabled || self.rules.iter().any(|rule| rule.matches(ip))
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(v) => v
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a valid number")),
        Err(_) => default,
    }
}
