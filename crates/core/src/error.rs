use std::io;

/// Errors that can occur while exporting a workflow matrix
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected basepython format {specifier:?}")]
    InvalidFormat { specifier: String },

    #[error("tox-gh-matrix is not compatible with this version of tox ({0})")]
    IncompatibleHost(String),

    #[error("Missing output target: {0}")]
    MissingTarget(String),

    #[error("Invalid skip pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for matrix export operations
pub type Result<T> = std::result::Result<T, Error>;
