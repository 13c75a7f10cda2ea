//! Notification email content.

use chrono::SecondsFormat;
use esi_core::SubmissionRecord;

/// Subject and plain-text body for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

/// Render the notification for a record.
#[must_use]
pub fn compose(record: &SubmissionRecord, subject_prefix: &str) -> Notification {
    let who = single_line(&record.name);
    let who = if who.is_empty() { "New Message".to_string() } else { who };
    let subject = format!("{subject_prefix}: {who}");

    let body = [
        "New contact form submission:".to_string(),
        String::new(),
        format!("Name: {}", record.name),
        format!("Email: {}", record.email),
        format!("Phone: {}", record.phone),
        format!("Service: {}", record.service),
        String::new(),
        "Message:".to_string(),
        record.message.clone(),
        String::new(),
        format!(
            "Received: {}",
            record
                .received_at
                .to_rfc3339_opts(SecondsFormat::Millis, true)
        ),
    ]
    .join("\n");

    Notification { subject, body }
}

/// Collapse control characters so visitor input cannot add header lines.
fn single_line(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
