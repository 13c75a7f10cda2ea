//! SMTP relay built on lettre's async transport.

use async_trait::async_trait;
use esi_config::SmtpConfig;
use esi_core::SubmissionRecord;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::error::RelayError;
use crate::message::compose;
use crate::sender::RelaySender;

/// Sends one plain-text notification per submission.
///
/// A connection is opened per send and closed afterwards; no pool is kept.
pub struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
    subject_prefix: String,
}

impl SmtpRelay {
    /// Build the transport and parse the sender/recipient addresses.
    ///
    /// `secure = true` uses implicit TLS; otherwise STARTTLS is used when the
    /// server offers it.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::NotConfigured` if the config is incomplete,
    /// `RelayError::Address` if sender or recipient does not parse, and
    /// `RelayError::Transport` if TLS parameters cannot be built.
    pub fn from_config(config: &SmtpConfig) -> Result<Self, RelayError> {
        let Some(port) = config.port.filter(|_| config.is_configured()) else {
            return Err(RelayError::NotConfigured);
        };
        let host = config.host.trim();

        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
                .tls(Tls::Opportunistic(TlsParameters::new(host.to_string())?))
        };

        let transport = builder
            .port(port)
            .credentials(Credentials::new(config.user.clone(), config.pass.clone()))
            .timeout(Some(config.timeout()))
            .build();

        Ok(Self {
            transport,
            from: parse_mailbox("sender", config.sender())?,
            to: parse_mailbox("recipient", config.recipient())?,
            subject_prefix: config.subject_prefix.clone(),
        })
    }

    /// Assemble the notification email for a record.
    ///
    /// `Reply-To` is set to the submitter when their address parses; no
    /// address shape is enforced on submissions, so it is skipped otherwise.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Message` if lettre rejects the message.
    pub fn build_message(&self, record: &SubmissionRecord) -> Result<Message, RelayError> {
        let notification = compose(record, &self.subject_prefix);

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(notification.subject)
            .header(ContentType::TEXT_PLAIN);

        if let Ok(reply_to) = record.email.parse::<Mailbox>() {
            builder = builder.reply_to(reply_to);
        }

        Ok(builder.body(notification.body)?)
    }
}

#[async_trait]
impl RelaySender for SmtpRelay {
    async fn send(&self, record: &SubmissionRecord) -> Result<(), RelayError> {
        let message = self.build_message(record)?;
        let response = self.transport.send(message).await?;
        tracing::debug!(code = %response.code(), "SMTP relay accepted notification");
        Ok(())
    }
}

fn parse_mailbox(field: &'static str, value: &str) -> Result<Mailbox, RelayError> {
    value
        .trim()
        .parse::<Mailbox>()
        .map_err(|source| RelayError::Address {
            field,
            value: value.to_string(),
            source,
        })
}
