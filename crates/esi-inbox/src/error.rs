//! Inbox error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading or writing the inbox file.
#[derive(Debug, Error)]
pub enum InboxError {
    /// The inbox file (or its directory) could not be opened or written.
    #[error("inbox write failed at '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The inbox file could not be opened or read.
    #[error("inbox read failed at '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be encoded or a line could not be decoded.
    #[error("inbox json error: {0}")]
    Json(#[from] serde_json::Error),
}
