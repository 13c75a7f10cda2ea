//! Inbox line envelope.
//!
//! Every accepted submission is written as one `SubmissionRecord` per line of
//! the inbox JSONL file. The file is the only durable copy and may be read by
//! outside tooling, so keys are append-only: new keys may be added, existing
//! ones never change name or type.
//!
//! The source address is stored under `ip`, the key older inbox files already
//! use. `sourceAddress` is accepted when reading.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::submission::Submission;

/// A persisted contact submission.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub service: String,
    pub message: String,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default, rename = "ip", alias = "sourceAddress")]
    pub source_address: String,
    /// Wall-clock time of the durable append. Informational, not an ordering key.
    pub received_at: DateTime<Utc>,
}

impl SubmissionRecord {
    /// Stamp a validated submission with its append time.
    ///
    /// Only the inbox writer should call this, from inside its append
    /// critical section.
    #[must_use]
    pub fn stamp(submission: &Submission, received_at: DateTime<Utc>) -> Self {
        Self {
            name: submission.name().to_string(),
            email: submission.email().to_string(),
            phone: submission.phone().to_string(),
            service: submission.service().to_string(),
            message: submission.message().to_string(),
            user_agent: submission.user_agent().to_string(),
            source_address: submission.source_address().to_string(),
            received_at,
        }
    }
}
