//! Error types for the preprocessing pipeline

use thiserror::Error;

/// Result type alias for scoreprep operations
pub type Result<T> = std::result::Result<T, ScoreprepError>;

/// Main error type for the preprocessing pipeline
#[derive(Error, Debug)]
pub enum ScoreprepError {
    /// A required column is missing from an input dataset
    #[error("Schema error: {0}")]
    Schema(String),

    /// A fit-time statistic could not be computed
    #[error("Fit error: {0}")]
    Fit(String),

    /// A test-time value falls outside what the fitted plan can encode
    #[error("Transform error: {0}")]
    Transform(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Preprocessor not fitted")]
    NotFitted,

    #[error("Unsupported artifact version: {0}")]
    UnsupportedArtifactVersion(u32),
}

impl From<polars::error::PolarsError> for ScoreprepError {
    fn from(err: polars::error::PolarsError) -> Self {
        ScoreprepError::Data(err.to_string())
    }
}

impl From<serde_json::Error> for ScoreprepError {
    fn from(err: serde_json::Error) -> Self {
        ScoreprepError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScoreprepError::Schema("missing column 'lunch'".to_string());
        assert_eq!(err.to_string(), "Schema error: missing column 'lunch'");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ScoreprepError = io_err.into();
        assert!(matches!(err, ScoreprepError::Io(_)));
    }
}
