//! Error types for the axis writer.

use axis_bounds::InvalidAxisError;
use thiserror::Error;

/// Errors that can occur while describing or serializing axes.
#[derive(Error, Debug)]
pub enum WriterError {
    /// Axis values cannot produce bounds.
    #[error("invalid axis '{name}': {source}")]
    InvalidAxis {
        name: String,
        #[source]
        source: InvalidAxisError,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Records cannot be combined into one schema.
    #[error("schema error: {0}")]
    Schema(String),

    /// JSON (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WriterError {
    /// Create an InvalidAxis error for the named axis.
    pub fn invalid_axis(name: impl Into<String>, source: InvalidAxisError) -> Self {
        Self::InvalidAxis {
            name: name.into(),
            source,
        }
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a Schema error.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// The underlying axis error, if this is one.
    pub fn axis_error(&self) -> Option<&InvalidAxisError> {
        match self {
            Self::InvalidAxis { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type for writer operations.
pub type Result<T> = std::result::Result<T, WriterError>;
