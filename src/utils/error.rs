use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unrecognised price '{raw}': {reason}")]
    PriceFormatError { raw: String, reason: String },

    #[error("Validation error on {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Inquiry endpoint rejected submission with status {status}")]
    SubmissionRejected { status: u16, body: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EstimatorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::SubmissionRejected { .. } => ErrorCategory::Network,
            Self::TomlError(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::PriceFormatError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } => ErrorCategory::Input,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ValidationError { .. } => ErrorSeverity::Low,
            Self::ApiError(_) | Self::SubmissionRejected { .. } => ErrorSeverity::Medium,
            Self::TomlError(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::PriceFormatError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ApiError(_) => {
                "Check network connectivity and that the inquiry endpoint is reachable".to_string()
            }
            Self::SubmissionRejected { status, .. } if *status >= 500 => {
                "The inquiry service is having trouble, try again later".to_string()
            }
            Self::SubmissionRejected { .. } => {
                "Check the payload fields expected by the inquiry endpoint".to_string()
            }
            Self::IoError(_) => "Check the file path and its permissions".to_string(),
            Self::SerializationError(_) => "Check the JSON structure of the payload".to_string(),
            Self::TomlError(_) => "Make sure the config file is valid TOML".to_string(),
            Self::ConfigError { .. } | Self::MissingConfigError { .. } => {
                "Review the configuration file for missing sections".to_string()
            }
            Self::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' in the configuration", field)
            }
            Self::PriceFormatError { .. } => {
                "Use one of: \"£150\", \"£100-500\", \"+15%\", \"£50-300/month\", \"dynamic\""
                    .to_string()
            }
            Self::ValidationError { field, .. } => format!("Fill in '{}' and try again", field),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) | Self::SubmissionRejected { .. } => {
                "Sorry, your inquiry could not be sent. Please try again.".to_string()
            }
            Self::ValidationError { message, .. } => message.clone(),
            Self::TomlError(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::PriceFormatError { .. } => format!("Configuration problem: {}", self),
            Self::IoError(_) | Self::SerializationError(_) => format!("Unexpected error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EstimatorError>;
