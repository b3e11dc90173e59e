#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::Path;
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_API_BASE_URL: &str = "https://api.bankofanthos.ai";
pub const DEFAULT_DB_API_BASE_URL: &str = "https://db.bankofanthos.ai";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_CONFIG_FILE: &str = "finboard.toml";

pub const ENV_API_BASE_URL: &str = "FINBOARD_API_BASE_URL";
pub const ENV_DB_API_BASE_URL: &str = "FINBOARD_DB_API_BASE_URL";
pub const ENV_USE_MOCK_API: &str = "FINBOARD_USE_MOCK_API";
pub const ENV_AUTH_TOKEN: &str = "FINBOARD_AUTH_TOKEN";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Resolved configuration: defaults, then the TOML file, then the
/// environment, then command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub db_api_base_url: String,
    pub use_mock_api: bool,
    pub auth_token: Option<String>,
    pub timeout_seconds: u64,
    pub log_level: Option<String>,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            db_api_base_url: DEFAULT_DB_API_BASE_URL.to_string(),
            use_mock_api: false,
            auth_token: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            log_level: None,
            log_format: LogFormat::Compact,
        }
    }
}

impl Settings {
    /// Reads `path` when given; otherwise `finboard.toml` if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Some(TomlConfig::from_file(DEFAULT_CONFIG_FILE)?)
            }
            None => None,
        };

        let mut settings = file.as_ref().map(Self::from_toml).unwrap_or_default();
        settings.apply_env();
        Ok(settings)
    }

    pub fn from_toml(config: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: config.api.base_url.clone().unwrap_or(defaults.api_base_url),
            db_api_base_url: config
                .api
                .db_base_url
                .clone()
                .unwrap_or(defaults.db_api_base_url),
            use_mock_api: config.client.use_mock_api.unwrap_or(defaults.use_mock_api),
            auth_token: config.client.auth_token.clone(),
            timeout_seconds: config
                .api
                .timeout_seconds
                .unwrap_or(defaults.timeout_seconds),
            log_level: config.logging.level.clone(),
            log_format: match config.logging.format.as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Compact,
            },
        }
    }

    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_BASE_URL) {
            self.api_base_url = url;
        }
        if let Some(url) = lookup(ENV_DB_API_BASE_URL) {
            self.db_api_base_url = url;
        }
        if let Some(flag) = lookup(ENV_USE_MOCK_API) {
            // Only the literal string `true` turns mock mode on.
            self.use_mock_api = flag == "true";
        }
        if let Some(token) = lookup(ENV_AUTH_TOKEN) {
            self.auth_token = Some(token);
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api_base_url)?;
        validation::validate_url("api.db_base_url", &self.db_api_base_url)?;
        validation::validate_range("api.timeout_seconds", self.timeout_seconds, 1, 300)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn db_api_base_url(&self) -> &str {
        &self.db_api_base_url
    }

    fn use_mock_api(&self) -> bool {
        self.use_mock_api
    }

    fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
