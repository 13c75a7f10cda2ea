//! The relay capability injected into the submission handler.

use async_trait::async_trait;
use esi_core::SubmissionRecord;

use crate::error::RelayError;

/// Sends a notification for one persisted submission.
#[async_trait]
pub trait RelaySender: Send + Sync {
    /// Attempt delivery. Called only after the record is durably stored.
    async fn send(&self, record: &SubmissionRecord) -> Result<(), RelayError>;
}

/// Relay used when no complete SMTP configuration is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledRelay;

#[async_trait]
impl RelaySender for DisabledRelay {
    async fn send(&self, _record: &SubmissionRecord) -> Result<(), RelayError> {
        Err(RelayError::NotConfigured)
    }
}

/// Relay used when SMTP is configured but the transport could not be built.
#[derive(Debug, Clone)]
pub struct BrokenRelay {
    reason: String,
}

impl BrokenRelay {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl RelaySender for BrokenRelay {
    async fn send(&self, _record: &SubmissionRecord) -> Result<(), RelayError> {
        Err(RelayError::Misconfigured(self.reason.clone()))
    }
}
