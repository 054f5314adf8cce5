/// Error raised when an environment variable holds an unusable value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    InvalidVar {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Invalid CORS origin '{origin}'")]
    InvalidCorsOrigin { origin: String },
}

/// Log line format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Include per-field messages in 400 responses (default: `false`).
    pub expose_field_errors: bool,
    /// Tracing output format (default: text).
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_origins: vec!["http://localhost:5173".to_string()],
            request_timeout_secs: 30,
            expose_field_errors: false,
            log_format: LogFormat::Text,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `5000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `EXPOSE_FIELD_ERRORS`  | `false`                    |
    /// | `LOG_FORMAT`           | `text`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. `from_env` delegates
    /// here; tests pass a map instead of mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(raw) => parse_var("PORT", "a valid u16", raw)?,
            None => defaults.port,
        };

        let cors_origins = match lookup("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.cors_origins,
        };

        let request_timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => parse_var("REQUEST_TIMEOUT_SECS", "a valid u64", raw)?,
            None => defaults.request_timeout_secs,
        };

        let expose_field_errors = match lookup("EXPOSE_FIELD_ERRORS") {
            Some(raw) => parse_var("EXPOSE_FIELD_ERRORS", "true or false", raw)?,
            None => defaults.expose_field_errors,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidVar {
                    var: "LOG_FORMAT",
                    expected: "text or json",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            expose_field_errors,
            log_format,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    var: &'static str,
    expected: &'static str,
    raw: String,
) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidVar {
            var,
            expected,
            value: raw,
        })
}
