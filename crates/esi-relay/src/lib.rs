//! # esi-relay
//!
//! Best-effort email notification of accepted submissions.
//!
//! The submission handler only sees [`RelaySender`]. [`relay_from_config`]
//! picks the implementation once at startup:
//! - [`DisabledRelay`] when the SMTP config is incomplete
//! - [`SmtpRelay`] when it is complete and the transport builds
//! - [`BrokenRelay`] when it is complete but unusable (bad address, bad TLS
//!   parameters), so every attempt reports the problem instead of the
//!   server refusing to start

pub mod error;
pub mod message;
pub mod sender;
pub mod smtp;

use std::sync::Arc;

use esi_config::SmtpConfig;

pub use error::RelayError;
pub use sender::{BrokenRelay, DisabledRelay, RelaySender};
pub use smtp::SmtpRelay;

/// Select the relay implementation for this configuration.
#[must_use]
pub fn relay_from_config(config: &SmtpConfig) -> Arc<dyn RelaySender> {
    if !config.is_configured() {
        tracing::info!("SMTP not configured; submissions are saved to the inbox only");
        return Arc::new(DisabledRelay);
    }

    match SmtpRelay::from_config(config) {
        Ok(relay) => {
            tracing::info!(
                host = %config.host,
                port = ?config.port,
                secure = config.secure,
                "SMTP relay enabled"
            );
            Arc::new(relay)
        }
        Err(error) => {
            tracing::warn!(%error, "SMTP relay configured but unusable; relay attempts will fail");
            Arc::new(BrokenRelay::new(error.to_string()))
        }
    }
}
