//! Inbox lines written today must validate against the exported schema, and
//! lines written by older versions of the site must still parse.

use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;

use esi_core::schema::inbox_record_schema;
use esi_core::{ContactInput, RequestContext, Submission, SubmissionRecord};

fn record() -> SubmissionRecord {
    let submission = Submission::validate(
        ContactInput {
            name: Some("Jane".into()),
            email: Some("jane@x.com".into()),
            phone: Some("555-0100".into()),
            service: Some("Roof repair".into()),
            message: Some("Hi, please call me back.".into()),
        },
        RequestContext::new("Mozilla/5.0", "198.51.100.4"),
    )
    .expect("valid submission");
    SubmissionRecord::stamp(&submission, Utc::now())
}

#[test]
fn written_line_validates_against_schema() {
    let schema = inbox_record_schema();
    let validator = jsonschema::validator_for(&schema).expect("schema compiles");

    let line = serde_json::to_value(record()).unwrap();
    assert!(validator.is_valid(&line), "line does not match schema: {line}");
}

#[test]
fn schema_rejects_line_without_received_at() {
    let schema = inbox_record_schema();
    let validator = jsonschema::validator_for(&schema).expect("schema compiles");

    let mut line = serde_json::to_value(record()).unwrap();
    line.as_object_mut().unwrap().remove("receivedAt");
    assert!(!validator.is_valid(&line));
}

#[test]
fn legacy_line_parses() {
    let line = r#"{"name":"Bob","email":"bob@example.com","phone":"","service":"Gutters","message":"Quote please","userAgent":"Mozilla/5.0 (X11; Linux x86_64)","ip":"::ffff:127.0.0.1","receivedAt":"2025-10-01T08:00:00.000Z"}"#;
    let record: SubmissionRecord = serde_json::from_str(line).unwrap();

    assert_eq!(record.name, "Bob");
    assert_eq!(record.service, "Gutters");
    assert_eq!(record.source_address, "::ffff:127.0.0.1");
    assert_eq!(
        record.received_at,
        "2025-10-01T08:00:00Z".parse::<DateTime<Utc>>().unwrap()
    );
}

#[test]
fn roundtrip_preserves_every_field() {
    let original = record();
    let line = serde_json::to_string(&original).unwrap();
    let parsed: SubmissionRecord = serde_json::from_str(&line).unwrap();
    assert_eq!(parsed, original);
}
