//! Process configuration read from the environment.

use std::env;

use serde::Serialize;

/// Secret used when none is configured
pub const DEFAULT_SECRET_KEY: &str = "dev-secret-key-change-in-production";

/// Application configuration.
///
/// Read once at start-up and shared immutably afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    /// Name used in logs and the OpenAPI title
    pub app_name: String,
    /// Verbose logging when set
    pub debug: bool,
    /// Signing secret
    #[serde(skip_serializing)]
    pub secret_key: String,
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Database connection URL (persisted variant only)
    pub database_url: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            app_name: lookup("APP_NAME").unwrap_or(defaults.app_name),
            debug: lookup("DEBUG")
                .map(|d| d.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.debug),
            secret_key: lookup("SECRET_KEY").unwrap_or(defaults.secret_key),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
        }
    }

    /// Whether the built-in development secret is still in use.
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }

    /// Default log filter when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info,tower_http=debug"
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "User API".to_string(),
            debug: false,
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            database_url: "sqlite://users.db?mode=rwc".to_string(),
        }
    }
}
