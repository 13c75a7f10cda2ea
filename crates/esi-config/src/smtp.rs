//! SMTP relay configuration.
//!
//! Every field is optional. A config missing host, port, user or password is
//! a supported state that means "email relay disabled".

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_subject_prefix() -> String {
    "ESI Website Contact".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// SMTP server hostname.
    #[serde(default, deserialize_with = "crate::de::text")]
    pub host: String,

    /// SMTP server port (465 with `secure`, usually 587 without).
    #[serde(default, deserialize_with = "crate::de::port")]
    pub port: Option<u16>,

    /// Implicit TLS when true; opportunistic STARTTLS otherwise.
    #[serde(default, deserialize_with = "crate::de::flag")]
    pub secure: bool,

    /// SMTP username.
    #[serde(default, deserialize_with = "crate::de::text")]
    pub user: String,

    /// SMTP password.
    #[serde(default, deserialize_with = "crate::de::text")]
    pub pass: String,

    /// Notification recipient. Falls back to `user`.
    #[serde(default, deserialize_with = "crate::de::text")]
    pub to_email: String,

    /// Notification sender. Falls back to `user`.
    #[serde(default, deserialize_with = "crate::de::text")]
    pub from_email: String,

    /// Subject line prefix; the submitter's name is appended.
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,

    /// Upper bound on a single relay attempt, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: None,
            secure: false,
            user: String::new(),
            pass: String::new(),
            to_email: String::new(),
            from_email: String::new(),
            subject_prefix: default_subject_prefix(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SmtpConfig {
    /// Check if the relay has everything it needs to attempt delivery.
    pub fn is_configured(&self) -> bool {
        !self.host.trim().is_empty()
            && self.port.is_some()
            && !self.user.trim().is_empty()
            && !self.pass.is_empty()
    }

    /// Address notifications are delivered to.
    pub fn recipient(&self) -> &str {
        non_empty_or(&self.to_email, &self.user)
    }

    /// Address notifications are sent from.
    pub fn sender(&self) -> &str {
        non_empty_or(&self.from_email, &self.user)
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".into(),
            port: Some(587),
            user: "site@example.com".into(),
            pass: "hunter2".into(),
            ..Default::default()
        }
    }

    #[test]
    fn default_is_not_configured() {
        let config = SmtpConfig::default();
        assert!(!config.is_configured());
        assert!(!config.secure);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.subject_prefix, "ESI Website Contact");
    }

    #[test]
    fn configured_when_host_port_and_credentials_set() {
        assert!(configured().is_configured());
    }

    #[test]
    fn not_configured_without_port() {
        let config = SmtpConfig {
            port: None,
            ..configured()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn not_configured_without_password() {
        let config = SmtpConfig {
            pass: String::new(),
            ..configured()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn addresses_fall_back_to_user() {
        let config = configured();
        assert_eq!(config.recipient(), "site@example.com");
        assert_eq!(config.sender(), "site@example.com");

        let config = SmtpConfig {
            to_email: "owner@example.com".into(),
            from_email: "noreply@example.com".into(),
            ..configured()
        };
        assert_eq!(config.recipient(), "owner@example.com");
        assert_eq!(config.sender(), "noreply@example.com");
    }
}
