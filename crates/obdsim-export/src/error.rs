//! Error types for session export.

use std::io;

use thiserror::Error;

/// Errors raised while writing or reading an export. The session log is never
/// modified when one occurs.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The export format name is not recognized.
    #[error("Unknown export format: {0} (expected csv or json)")]
    UnknownFormat(String),
}

pub type ExportResult<T> = Result<T, ExportError>;
