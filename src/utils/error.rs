use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteHeaderError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API request to {url} failed with status {status}: {body}")]
    HttpStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("API request to {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Header emphasis '{name}' has no counterpart on the remote site")]
    UnsupportedEmphasis { name: String },

    #[error("Remote site did not return property '{property}'")]
    MissingProperty { property: String },

    #[error("Property '{property}' has not been loaded from the remote site")]
    PropertyNotInitialized { property: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl SiteHeaderError {
    /// 網路層錯誤，重新執行可能成功
    pub fn is_retryable(&self) -> bool {
        match self {
            SiteHeaderError::ApiError(e) => e.is_timeout() || e.is_connect(),
            SiteHeaderError::Timeout { .. } => true,
            SiteHeaderError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SiteHeaderError::ConfigError { .. }
                | SiteHeaderError::ConfigValidationError { .. }
                | SiteHeaderError::InvalidConfigValueError { .. }
                | SiteHeaderError::MissingConfigError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteHeaderError::ApiError(_) | SiteHeaderError::Timeout { .. } => {
                format!("Could not reach the site: {}", self)
            }
            SiteHeaderError::HttpStatus { status: 401, .. }
            | SiteHeaderError::HttpStatus { status: 403, .. } => {
                "The site rejected the credentials; check access_token in the config file".to_string()
            }
            SiteHeaderError::UnsupportedEmphasis { name } => format!(
                "The template uses header emphasis '{}', which the site does not support",
                name
            ),
            e if e.is_config_error() => format!("Invalid configuration: {}", e),
            e => e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteHeaderError>;
