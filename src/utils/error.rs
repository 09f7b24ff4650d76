use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InitError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cannot find configuration: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Cannot read configuration {}: {message}", path.display())]
    ConfigParseError { path: PathBuf, message: String },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Cannot find defined services with pattern '{pattern}': {message}")]
    ServicePatternError { pattern: String, message: String },

    #[error("Cannot set environment variable {variable}: {reason}")]
    EnvironmentError { variable: String, reason: String },

    #[error("Signal handler error: {0}")]
    SignalError(std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Environment,
    Runtime,
}

impl InitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            InitError::ConfigNotFound { .. }
            | InitError::ConfigParseError { .. }
            | InitError::MissingConfigError { .. }
            | InitError::InvalidConfigValueError { .. }
            | InitError::ServicePatternError { .. } => ErrorCategory::Configuration,
            InitError::EnvironmentError { .. } => ErrorCategory::Environment,
            InitError::IoError(_) | InitError::SignalError(_) => ErrorCategory::Runtime,
        }
    }

    /// Process exit code for a failure that stops the run.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 2,
            ErrorCategory::Environment | ErrorCategory::Runtime => 1,
        }
    }

    /// Re-tags an IO failure that happened while loading a file as a
    /// configuration failure so it exits with the configuration code.
    pub fn while_loading(self, path: &std::path::Path) -> Self {
        match self {
            InitError::IoError(e) => InitError::ConfigParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, InitError>;
