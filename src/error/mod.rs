//! Error handling for the surveillance pipeline.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;

/// Specialized error type for the pipeline
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Error opening, reading or writing a file
    #[error("IO error: {message}{}", path_suffix(.path))]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<io::Error>,
    },

    /// Error raised by an Arrow kernel or reader
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// The input table could not be loaded
    #[error("Failed to load {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    /// A column could not be converted to the type a stage needs
    #[error("Conversion error in column '{column}': {message}")]
    Conversion { column: String, message: String },

    /// A row filter could not be applied
    #[error("Filter error: {0}")]
    Filter(String),

    /// Fitting the tree failed or its preconditions were violated
    #[error("Training error: {0}")]
    Training(String),

    /// Metrics could not be computed
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// The tree could not be exported as an image
    #[error("Render error: {0}")]
    Render(String),

    /// The fitted model could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" (path: {})", p.display()))
        .unwrap_or_default()
}

impl PipelineError {
    /// Create an I/O error without an underlying source
    pub fn io_error(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create an I/O error wrapping a `std::io::Error`
    pub fn io_error_with_source(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            source: Some(source),
        }
    }

    /// Attach a path to an I/O error; other variants are returned unchanged
    #[must_use]
    pub fn with_path(self, new_path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Io {
                message, source, ..
            } => Self::Io {
                message,
                path: Some(new_path.into()),
                source,
            },
            other => other,
        }
    }

    /// Prefix the message of an I/O error with additional context
    #[must_use]
    pub fn context(self, context: impl AsRef<str>) -> Self {
        match self {
            Self::Io {
                message,
                path,
                source,
            } => Self::Io {
                message: format!("{}: {message}", context.as_ref()),
                path,
                source,
            },
            other => other,
        }
    }

    /// Create a conversion error for a column
    pub fn conversion(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conversion {
            column: column.into(),
            message: message.into(),
        }
    }
}

impl From<io::Error> for PipelineError {
    fn from(error: io::Error) -> Self {
        Self::io_error_with_source(error.to_string(), error)
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
