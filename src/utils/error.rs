use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to write {target}: {source}")]
    WriteError {
        target: String,
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown group type '{kind}' (available: {available})")]
    UnknownGroupType { kind: String, available: String },

    #[error("Index {index} out of range for preference list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Matching error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Output,
    Configuration,
    Input,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MatchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MatchError::IoError(_) => ErrorCategory::Io,
            MatchError::SerializationError(_)
            | MatchError::CsvError(_)
            | MatchError::WriteError { .. } => ErrorCategory::Output,
            MatchError::ConfigError { .. }
            | MatchError::ConfigValidationError { .. }
            | MatchError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            MatchError::UnknownGroupType { .. } => ErrorCategory::Input,
            MatchError::IndexOutOfRange { .. } | MatchError::ProcessingError { .. } => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io | ErrorCategory::Output => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            // a broken matcher invariant, never bad user input
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            MatchError::IoError(_) => {
                "Check that the preference file exists and is readable, or pass '-' to read stdin"
                    .to_string()
            }
            MatchError::SerializationError(_) | MatchError::CsvError(_) => {
                "Try the text format".to_string()
            }
            MatchError::WriteError { target, .. } => {
                format!("Check that {} is writable and the disk is not full", target)
            }
            MatchError::ConfigError { .. } | MatchError::ConfigValidationError { .. } => {
                "Check the configuration file syntax".to_string()
            }
            MatchError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' and run again", field)
            }
            MatchError::UnknownGroupType { available, .. } => {
                format!("Use one of the group types found in the input: {}", available)
            }
            MatchError::IndexOutOfRange { .. } | MatchError::ProcessingError { .. } => {
                "This is a bug in the matcher; please report it with the input file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not read input: {}", self),
            ErrorCategory::Output => format!("Could not write results: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Internal => format!("Internal error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
