//! Error types for the analysis pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors surfaced to the caller.
///
/// Malformed or out-of-window rows never show up here: the loader drops
/// them and only counts them in [`LoadStats`](crate::data::model::LoadStats).
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// No content was supplied at all.
    #[error("input is empty or missing")]
    InputAbsent,

    /// Caller configuration violates a precondition.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading a trace or config file failed.
    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
}

impl AnalysisError {
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        AnalysisError::InvalidConfig(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        assert_eq!(
            AnalysisError::InputAbsent.to_string(),
            "input is empty or missing"
        );
        assert_eq!(
            AnalysisError::invalid_config("noise threshold must be >= 0").to_string(),
            "invalid configuration: noise threshold must be >= 0"
        );

        let err = AnalysisError::Io {
            path: PathBuf::from("trace.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "reading trace.txt: gone");
    }
}
