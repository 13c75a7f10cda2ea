//! Inbox append-only contract:
//! - one parseable line per append, never merged, never truncated
//! - concurrent appends from many threads stay line-atomic
//! - duplicates are kept

use std::sync::Arc;

use chrono::Utc;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use esi_core::{ContactInput, RequestContext, Submission};
use esi_inbox::{InboxReader, InboxWriter};

fn submission(name: &str, message: &str) -> Submission {
    Submission::validate(
        ContactInput {
            name: Some(name.into()),
            email: Some(format!("{name}@example.com")),
            phone: Some("555-0100".into()),
            service: Some("Inspection".into()),
            message: Some(message.into()),
        },
        RequestContext::new("test-agent/1.0", "192.0.2.10"),
    )
    .unwrap()
}

fn writer_in(dir: &TempDir) -> InboxWriter {
    InboxWriter::new(dir.path().join("inbox.jsonl")).unwrap()
}

#[test]
fn append_writes_one_line_reproducing_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let writer = writer_in(&dir);
    let started = Utc::now();

    let written = writer.append(&submission("jane", "Hi")).unwrap();

    let records = InboxReader::new(writer.path()).read_all().unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record, &written);
    assert_eq!(record.name, "jane");
    assert_eq!(record.email, "jane@example.com");
    assert_eq!(record.phone, "555-0100");
    assert_eq!(record.service, "Inspection");
    assert_eq!(record.message, "Hi");
    assert_eq!(record.user_agent, "test-agent/1.0");
    assert_eq!(record.source_address, "192.0.2.10");
    assert!(record.received_at >= started);
}

#[test]
fn duplicate_submissions_produce_distinct_lines() {
    let dir = tempfile::tempdir().unwrap();
    let writer = writer_in(&dir);

    writer.append(&submission("jane", "Hi")).unwrap();
    writer.append(&submission("jane", "Hi")).unwrap();

    let contents = std::fs::read_to_string(writer.path()).unwrap();
    assert_eq!(contents.lines().count(), 2);
    assert_eq!(InboxReader::new(writer.path()).read_all().unwrap().len(), 2);
}

#[test]
fn concurrent_appends_stay_line_atomic() {
    let dir = tempfile::tempdir().unwrap();
    let writer = Arc::new(writer_in(&dir));
    let big_message = "x".repeat(16 * 1024);

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let writer = Arc::clone(&writer);
            let message = format!("{i}:{big_message}");
            std::thread::spawn(move || {
                writer
                    .append(&submission(&format!("visitor{i}"), &message))
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let scan = InboxReader::new(writer.path()).scan().unwrap();
    assert!(scan.is_clean(), "malformed lines: {:?}", scan.malformed);
    assert_eq!(scan.records.len(), 50);

    let mut names: Vec<String> = scan.records.iter().map(|r| r.name.clone()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 50);
    assert!(scan.records.iter().all(|r| r.message.len() > big_message.len()));
}

#[test]
fn separate_writers_on_same_file_do_not_merge_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inbox.jsonl");

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let path = path.clone();
            std::thread::spawn(move || {
                let writer = InboxWriter::new(path).unwrap();
                for j in 0..10 {
                    writer
                        .append(&submission(&format!("w{i}"), &format!("m{j}")))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let scan = InboxReader::new(&path).scan().unwrap();
    assert!(scan.is_clean());
    assert_eq!(scan.records.len(), 80);
}
