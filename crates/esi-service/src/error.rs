//! Submission errors surfaced to the caller.
//!
//! Relay errors are absent: they are absorbed into the outcome.

use esi_core::ValidationError;
use esi_inbox::InboxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Client error: a required field was missing. Nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Server error: the submission could not be stored and was not accepted.
    #[error("submission not persisted: {0}")]
    Persistence(#[from] InboxError),

    /// Server error: the append task panicked or was cancelled, so the
    /// submission is treated as not persisted.
    #[error("submission not persisted: append task aborted: {0}")]
    PersistenceAborted(#[from] tokio::task::JoinError),
}

impl SubmitError {
    /// True for client-caused failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// True when the submission was valid but could not be stored.
    #[must_use]
    pub const fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_) | Self::PersistenceAborted(_))
    }
}
