//! Service layer for contact submissions.
//!
//! `ContactService` wraps the inbox writer (durable JSONL persistence) and the
//! relay sender (best-effort email). Both are chosen once at construction.

use std::sync::Arc;
use std::time::Duration;

use esi_config::EsiConfig;
use esi_core::responses::{
    RELAY_NOTE_FAILED, RELAY_NOTE_NOT_CONFIGURED, RELAY_NOTE_TIMED_OUT,
};
use esi_core::{ContactInput, RequestContext, Submission, SubmissionOutcome, SubmissionRecord};
use esi_inbox::{InboxError, InboxWriter};
use esi_relay::{RelayError, RelaySender, relay_from_config};

use crate::error::SubmitError;

/// Handles contact submissions.
///
/// Every call to [`ContactService::submit`] follows this protocol:
/// 1. Validate (nothing is written on failure)
/// 2. Append to the inbox on the blocking pool
/// 3. Relay under `relay_timeout`, absorbing any failure
///
/// Cheap to share: wrap in `Arc` and call `submit` from any number of tasks.
pub struct ContactService {
    inbox: Arc<InboxWriter>,
    relay: Arc<dyn RelaySender>,
    relay_timeout: Duration,
}

impl ContactService {
    #[must_use]
    pub fn new(
        inbox: Arc<InboxWriter>,
        relay: Arc<dyn RelaySender>,
        relay_timeout: Duration,
    ) -> Self {
        Self {
            inbox,
            relay,
            relay_timeout,
        }
    }

    /// Build the service from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `InboxError` if the inbox directory cannot be created.
    pub fn from_config(config: &EsiConfig) -> Result<Self, InboxError> {
        let inbox = InboxWriter::new(&config.inbox.path)?;
        let relay = relay_from_config(&config.smtp);
        Ok(Self::new(Arc::new(inbox), relay, config.smtp.timeout()))
    }

    /// Access the inbox writer.
    #[must_use]
    pub fn inbox(&self) -> &InboxWriter {
        &self.inbox
    }

    /// Validate, persist, and relay one submission.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Validation` when a required field is blank, and
    /// a persistence variant when the inbox append fails. Relay problems never
    /// produce an error; they show up as `relayed: false` in the outcome.
    pub async fn submit(
        &self,
        input: ContactInput,
        context: RequestContext,
    ) -> Result<SubmissionOutcome, SubmitError> {
        let submission = Submission::validate(input, context)?;
        let record = self.persist(submission).await?;

        tracing::info!(
            received_at = %record.received_at,
            service = %record.service,
            "contact submission saved to inbox"
        );

        Ok(self.relay(&record).await)
    }

    async fn persist(&self, submission: Submission) -> Result<SubmissionRecord, SubmitError> {
        let inbox = Arc::clone(&self.inbox);
        let appended = tokio::task::spawn_blocking(move || inbox.append(&submission)).await;

        match appended {
            Ok(Ok(record)) => Ok(record),
            Ok(Err(error)) => {
                tracing::error!(
                    %error,
                    path = %self.inbox.path().display(),
                    "failed to persist contact submission"
                );
                Err(error.into())
            }
            Err(error) => {
                tracing::error!(%error, "inbox append task aborted");
                Err(error.into())
            }
        }
    }

    async fn relay(&self, record: &SubmissionRecord) -> SubmissionOutcome {
        let attempt = tokio::time::timeout(self.relay_timeout, self.relay.send(record))
            .await
            .unwrap_or_else(|_| Err(RelayError::TimedOut(self.relay_timeout)));

        match attempt {
            Ok(()) => SubmissionOutcome::relayed(),
            Err(RelayError::NotConfigured) => {
                tracing::debug!("email relay skipped: not configured");
                SubmissionOutcome::not_relayed(RELAY_NOTE_NOT_CONFIGURED)
            }
            Err(error @ RelayError::TimedOut(_)) => {
                tracing::warn!(
                    target: "esi::relay",
                    %error,
                    received_at = %record.received_at,
                    "email relay timed out; submission kept in inbox"
                );
                SubmissionOutcome::not_relayed(RELAY_NOTE_TIMED_OUT)
            }
            Err(error) => {
                tracing::warn!(
                    target: "esi::relay",
                    %error,
                    received_at = %record.received_at,
                    "email relay failed; submission kept in inbox"
                );
                SubmissionOutcome::not_relayed(RELAY_NOTE_FAILED)
            }
        }
    }
}
