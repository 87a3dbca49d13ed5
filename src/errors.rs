use thiserror::Error;

use crate::validation::ValidationFault;

/// Error type for fallible assessment operations.
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Validation(#[from] ValidationFault),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Unknown plan `{0}` (expected workout, meal, or combined)")]
    UnknownPlan(String),
}

pub type Result<T> = std::result::Result<T, AssessmentError>;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] AssessmentError),
    #[error("Invalid input: {0}")]
    Input(String),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Core(AssessmentError::Io(err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Core(AssessmentError::Serde(err))
    }
}
