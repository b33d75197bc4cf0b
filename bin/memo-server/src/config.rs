//! Server configuration, loaded from environment variables at startup.

/// Runtime configuration for memo-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:3000"`).
    pub bind_address: String,

    /// SQLite database URL (default: `"sqlite://memo.db"`).
    /// Use `"sqlite::memory:"` for a throwaway store.
    pub database_url: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated list of allowed CORS origins; `None` allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI and the OpenAPI document.
    pub enable_swagger: bool,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("MEMO_BIND", "0.0.0.0:3000"),
            database_url: env_or("MEMO_DATABASE_URL", "sqlite://memo.db"),
            log_level: env_or("MEMO_LOG", "info"),
            log_json: env_flag("MEMO_LOG_JSON", false),
            cors_allowed_origins: std::env::var("MEMO_CORS_ORIGINS")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            enable_swagger: env_flag("MEMO_ENABLE_SWAGGER", true),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_owned(),
            database_url: "sqlite::memory:".to_owned(),
            log_level: "info".to_owned(),
            log_json: false,
            cors_allowed_origins: None,
            enable_swagger: false,
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| parse_flag(&v).unwrap_or(default))
        .unwrap_or(default)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn flags_accept_common_spellings() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 1 "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
