use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinboardError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("{endpoint} responded with status {status}")]
    StatusError { endpoint: String, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Input,
    System,
}

impl FinboardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::StatusError { .. } => ErrorCategory::Network,
            Self::SerializationError(_) => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } => ErrorCategory::Input,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the API base URLs and your connection, or run with --mock",
            ErrorCategory::Data => "The server returned an unexpected payload; try --mock to compare",
            ErrorCategory::Configuration => "Fix the value in finboard.toml, the FINBOARD_* environment or the command line",
            ErrorCategory::Input => "Correct the highlighted field and try again",
            ErrorCategory::System => "Check file permissions and paths",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration problem in '{}': {}", field, reason)
            }
            Self::MissingConfigError { field } => format!("'{}' must be set", field),
            Self::ValidationError { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FinboardError>;
