use serde::Serialize;

use crate::response::DevDetails;

/// Deployment mode of the running service.
///
/// Decides whether diagnostic detail may be attached to error responses.
/// Anything not explicitly recognised as development is production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    Development,
    #[default]
    Production,
}

impl RuntimeMode {
    /// Read the mode from `APP_ENV` (default: production).
    pub fn from_env() -> Self {
        std::env::var("APP_ENV")
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    /// `development`, `dev` and `local` (case-insensitive) select
    /// development; every other value selects production.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => RuntimeMode::Development,
            _ => RuntimeMode::Production,
        }
    }

    pub fn is_development(self) -> bool {
        self == RuntimeMode::Development
    }

    /// Pass `details` through only in development mode.
    ///
    /// Handlers building an [`crate::response::ApiResponse::error`] by hand
    /// route their diagnostics through here.
    pub fn gate(self, details: DevDetails) -> Option<DevDetails> {
        self.is_development().then_some(details)
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development, except
/// the runtime mode which defaults to production.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Gates `devDetails` on error responses.
    pub runtime_mode: RuntimeMode,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `APP_ENV`              | `production`               |
    ///
    /// # Panics
    ///
    /// Panics if `PORT` or `REQUEST_TIMEOUT_SECS` is set but not a number.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            runtime_mode: RuntimeMode::from_env(),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
