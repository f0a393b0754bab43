use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParcelError {
    #[error("Validation error on `{field}` ({value}): {reason}")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Parcel not found: {id}")]
    NotFoundError { id: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid state: {message}")]
    InvalidStateError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Lookup,
    Persistence,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ParcelError {
    pub fn validation(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn not_found(id: &str) -> Self {
        Self::NotFoundError { id: id.to_string() }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Input,
            Self::NotFoundError { .. } => ErrorCategory::Lookup,
            Self::StorageError { .. } | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::Persistence
            }
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::InvalidStateError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ValidationError { .. } | Self::NotFoundError { .. } => ErrorSeverity::High,
            Self::ConfigError { .. } | Self::InvalidStateError { .. } => ErrorSeverity::Medium,
            Self::StorageError { .. } | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { field, reason, .. } => {
                format!("Invalid value for {}: {}", field, reason)
            }
            Self::NotFoundError { id } => {
                format!("No parcel with id {} exists (it may have been deleted)", id)
            }
            Self::StorageError { message } => {
                format!("The change could not be saved: {}", message)
            }
            Self::IoError(e) => format!("File system error: {}", e),
            Self::SerializationError(e) => format!("Could not encode parcels: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidStateError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } => {
                "Name is required, quantity must be at least 1 and weight at least 0.1"
            }
            Self::NotFoundError { .. } => "Run `parcels list` to see the current ids",
            Self::StorageError { .. } | Self::IoError(_) => {
                "Check free space and permissions of the data directory; the change may not survive a restart"
            }
            Self::SerializationError(_) => "Report this as a bug",
            Self::ConfigError { .. } => "Fix the configuration file or command line flags",
            Self::InvalidStateError { .. } => "Start an add or edit before submitting",
        }
    }
}

pub type Result<T> = std::result::Result<T, ParcelError>;
