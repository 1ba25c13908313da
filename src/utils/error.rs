use crate::domain::model::Role;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("server returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Session error: {message}")]
    Session { message: String },

    #[error("this command requires the {required} role")]
    RoleRequired { required: Role, actual: Option<Role> },

    #[error("{what} not found")]
    NotFound { what: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Config,
    Usage,
    Session,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Api(_) | ClientError::Status { .. } => ErrorCategory::Network,
            ClientError::ConfigValidation { .. } | ClientError::InvalidConfigValue { .. } => {
                ErrorCategory::Config
            }
            ClientError::Validation { .. } | ClientError::NotFound { .. } => ErrorCategory::Usage,
            ClientError::Session { .. } | ClientError::RoleRequired { .. } => {
                ErrorCategory::Session
            }
            ClientError::Io(_) | ClientError::Serialization(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::High,
            ErrorCategory::Config | ErrorCategory::Usage | ErrorCategory::Session => {
                ErrorSeverity::Medium
            }
            ErrorCategory::Data => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ClientError::Api(e) => format!("Could not reach the records server: {}", e),
            ClientError::Status { status, url } => format!(
                "The records server rejected the request ({} on {})",
                status, url
            ),
            ClientError::RoleRequired { required, actual } => match actual {
                Some(actual) => format!(
                    "This command needs the {} role, but you are logged in as {}",
                    required, actual
                ),
                None => format!(
                    "This command needs the {} role, but you are not logged in",
                    required
                ),
            },
            ClientError::Session { message } => format!("Session problem: {}", message),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check that the backend is running and that base_url points at it"
            }
            ErrorCategory::Config => "Fix the reported field in the config file or CLI flags",
            ErrorCategory::Usage => "Check the ids and values you passed and try again",
            ErrorCategory::Session => "Run `school-records login --email <you>` and retry",
            ErrorCategory::Data => "Inspect the session file and local disk state",
        }
    }
}
