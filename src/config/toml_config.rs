use crate::utils::error::{FinboardError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub client: ClientSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub db_base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientSection {
    pub use_mock_api: Option<bool>,
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl TomlConfig {
    /// Loads a config file; `${VAR}` placeholders are filled from the environment.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FinboardError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FinboardError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[api]
base_url = "https://api.example.com"
db_base_url = "https://db.example.com"
timeout_seconds = 5

[client]
use_mock_api = true
auth_token = "abc"

[logging]
level = "debug"
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api.base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.api.timeout_seconds, Some(5));
        assert_eq!(config.client.use_mock_api, Some(true));
        assert_eq!(config.logging.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_sections_are_optional() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.api.base_url.is_none());
        assert!(config.client.auth_token.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FINBOARD_TEST_TOKEN", "from-env");

        let toml_content = r#"
[client]
auth_token = "${FINBOARD_TEST_TOKEN}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.client.auth_token.as_deref(), Some("from-env"));

        std::env::remove_var("FINBOARD_TEST_TOKEN");
    }

    #[test]
    fn test_unknown_placeholder_is_kept() {
        let config =
            TomlConfig::from_toml_str("[client]\nauth_token = \"${FINBOARD_UNSET_VAR_X}\"\n")
                .unwrap();
        assert_eq!(
            config.client.auth_token.as_deref(),
            Some("${FINBOARD_UNSET_VAR_X}")
        );
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[api\nbase_url = 1").unwrap_err();
        assert!(matches!(err, FinboardError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\nbase_url = \"http://localhost:9000\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("http://localhost:9000"));
    }
}
