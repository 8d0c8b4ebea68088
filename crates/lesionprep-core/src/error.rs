//! Error types for the lesionprep library.
//!
//! Fatal conditions (missing inputs, schema problems, unexpected IO failures)
//! surface through this enum; per-file omissions during a run are tracked in
//! the operation summaries instead and never abort processing.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dataset-preparation operations.
#[derive(Debug, Error)]
pub enum PrepError {
    // Metadata errors
    #[error("Metadata CSV not found: {0}")]
    MetadataNotFound(PathBuf),

    #[error("Missing required column '{column}' in {path:?}")]
    MissingColumn { column: String, path: PathBuf },

    #[error("Duplicate identifier in metadata: {identifier}")]
    DuplicateIdentifier { identifier: String },

    #[error("CSV error: {message}")]
    Csv {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    // Dataset layout errors
    #[error("Dataset directory not found: {0}")]
    DatasetNotFound(PathBuf),

    #[error("Dataset directory contains no samples: {0}")]
    EmptyDataset(PathBuf),

    #[error("Train fraction must lie strictly between 0 and 1, got {0}")]
    InvalidFraction(f64),

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },
}

/// Result type alias for lesionprep operations.
pub type Result<T> = std::result::Result<T, PrepError>;

// Conversion implementations for common error types

impl From<std::io::Error> for PrepError {
    fn from(err: std::io::Error) -> Self {
        PrepError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<csv::Error> for PrepError {
    fn from(err: csv::Error) -> Self {
        PrepError::Csv {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl PrepError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        PrepError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PrepError::MissingColumn {
            column: "dx".into(),
            path: PathBuf::from("meta.csv"),
        };
        assert_eq!(
            err.to_string(),
            "Missing required column 'dx' in \"meta.csv\""
        );
    }

    #[test]
    fn test_io_with_path_keeps_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = PrepError::io_with_path(io, "/tmp/x");
        match err {
            PrepError::Io { path, .. } => assert_eq!(path, Some(PathBuf::from("/tmp/x"))),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
