use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the caller-facing failures of ingestion and editing.
///
/// Unparsable cells and unreadable documents are deliberately absent: those
/// degrade to `null` prices or empty record sequences instead of failing.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when a required identifying parameter was not supplied.
    #[error("missing required parameter '{0}'")]
    MissingParameter(&'static str),

    /// Raised when a custom dataset name normalises to nothing.
    #[error("invalid dataset name '{0}'")]
    InvalidDatasetName(String),

    /// Raised when an uploaded document exceeds the configured byte cap.
    #[error("document is {size} bytes, limit is {limit}")]
    InputTooLarge { size: usize, limit: usize },

    /// Raised when an edit targets a code that no stored record carries.
    #[error("no record with code '{code}' in {collection}")]
    RecordNotFound { collection: String, code: String },

    /// Raised when a textual cell address cannot be parsed.
    #[error("invalid cell address '{0}'")]
    InvalidAddress(String),

    /// Raised when a stored collection does not have the expected shape.
    #[error("corrupt store file {path}: {reason}")]
    CorruptStore { path: PathBuf, reason: String },

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
