//! Submission outcome and the JSON bodies returned by the HTTP surface.
//!
//! The wire names (`ok`, `saved`, `emailed`, `emailNote`) are what the site's
//! contact script already reads.

use serde::{Deserialize, Serialize};

use crate::errors::{RequiredField, ValidationError};

/// Relay note when no complete SMTP configuration is present.
pub const RELAY_NOTE_NOT_CONFIGURED: &str = "not configured";

/// Relay note after a successful send.
pub const RELAY_NOTE_SENT: &str = "email sent";

/// Relay note when the send was attempted and failed.
pub const RELAY_NOTE_FAILED: &str = "email send failed (saved to inbox)";

/// Relay note when the send did not finish within the relay timeout.
pub const RELAY_NOTE_TIMED_OUT: &str = "email send timed out (saved to inbox)";

/// What happened to an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    /// True iff the submission was durably appended to the inbox.
    pub accepted: bool,
    /// True iff the email relay completed.
    pub relayed: bool,
    /// Human-readable relay status.
    pub relay_note: String,
}

impl SubmissionOutcome {
    #[must_use]
    pub fn relayed() -> Self {
        Self {
            accepted: true,
            relayed: true,
            relay_note: RELAY_NOTE_SENT.to_string(),
        }
    }

    #[must_use]
    pub fn not_relayed(note: impl Into<String>) -> Self {
        Self {
            accepted: true,
            relayed: false,
            relay_note: note.into(),
        }
    }
}

/// `200` body of `POST /api/contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactAccepted {
    pub ok: bool,
    pub saved: bool,
    pub emailed: bool,
    pub email_note: String,
}

impl From<SubmissionOutcome> for ContactAccepted {
    fn from(outcome: SubmissionOutcome) -> Self {
        Self {
            ok: outcome.accepted,
            saved: outcome.accepted,
            emailed: outcome.relayed,
            email_note: outcome.relay_note,
        }
    }
}

/// Error body of `POST /api/contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRejected {
    pub ok: bool,
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<RequiredField>,
}

impl ContactRejected {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
            missing: Vec::new(),
        }
    }
}

impl From<&ValidationError> for ContactRejected {
    fn from(err: &ValidationError) -> Self {
        Self {
            ok: false,
            error: err.to_string(),
            missing: err.fields().to_vec(),
        }
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub port: u16,
}
