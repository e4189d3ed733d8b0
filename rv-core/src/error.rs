/// Error types for the dashboard core
use thiserror::Error;

/// Main error type for loading and configuring visualizations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VizError {
    /// A dataset request failed (network error or bad status)
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// A dataset arrived but could not be decoded
    #[error("Failed to parse dataset: {0}")]
    Parse(String),

    /// Invalid dashboard configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for VizError {
    fn from(err: serde_json::Error) -> Self {
        VizError::Parse(err.to_string())
    }
}

/// Type alias for Results using VizError
pub type Result<T> = std::result::Result<T, VizError>;
