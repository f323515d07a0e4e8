use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Upstream responded with {status}: {description}")]
    UpstreamError { status: u16, description: String },

    #[error("Malformed upstream response: {message}")]
    MalformedResponse { message: String },
}

/// 錯誤分類，對應表單的三種處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 本地驗證失敗，不會觸及網路
    Validation,
    /// 網路或上游服務錯誤
    Transport,
    /// 伺服器設定錯誤 (缺少憑證等)
    Configuration,
}

impl RelayError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RelayError::ValidationError { .. } => ErrorCategory::Validation,
            RelayError::ConfigError { .. }
            | RelayError::MissingConfigError { .. }
            | RelayError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            RelayError::HttpError(_)
            | RelayError::IoError(_)
            | RelayError::UpstreamError { .. }
            | RelayError::MalformedResponse { .. } => ErrorCategory::Transport,
        }
    }

    /// 給終端使用者看的訊息，不包含上游細節或憑證
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Validation => self.to_string(),
            ErrorCategory::Configuration => match self {
                RelayError::MissingConfigError { field } => {
                    format!("Required setting '{}' is not configured", field)
                }
                RelayError::InvalidConfigValueError { field, reason, .. } => {
                    format!("Setting '{}' is invalid: {}", field, reason)
                }
                _ => "Server configuration error".to_string(),
            },
            ErrorCategory::Transport => "Failed to deliver the submission".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RelayError::MissingConfigError { .. } => {
                "Set TG_BOT_TOKEN and TG_CHAT_ID in the environment or the config file"
            }
            RelayError::InvalidConfigValueError { .. } | RelayError::ConfigError { .. } => {
                "Check the configuration file and environment variables"
            }
            RelayError::ValidationError { .. } => "Correct the input and submit again",
            RelayError::UpstreamError { status, .. } if *status == 401 || *status == 404 => {
                "Check that the bot token is valid"
            }
            RelayError::UpstreamError { status, .. } if *status == 400 || *status == 403 => {
                "Check the chat id and that the bot is a member of the chat"
            }
            _ => "Check network connectivity and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
