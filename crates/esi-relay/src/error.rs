//! Relay error types.
//!
//! None of these ever fail a submission: the handler logs them and reports
//! "not relayed".

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// No complete SMTP configuration; relay is disabled.
    #[error("email relay not configured")]
    NotConfigured,

    /// SMTP configuration is complete but cannot be used.
    #[error("email relay misconfigured: {0}")]
    Misconfigured(String),

    /// A configured address does not parse as a mailbox.
    #[error("invalid {field} address '{value}': {source}")]
    Address {
        field: &'static str,
        value: String,
        #[source]
        source: lettre::address::AddressError,
    },

    /// The notification message could not be assembled.
    #[error("could not build notification email: {0}")]
    Message(#[from] lettre::error::Error),

    /// Connecting, authenticating, or sending failed.
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The attempt did not finish within the relay timeout.
    #[error("email relay timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
}
