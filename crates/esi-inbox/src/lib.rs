//! # esi-inbox
//!
//! The inbox is an append-only JSONL file holding every accepted contact
//! submission, one `SubmissionRecord` per line. It is the only durable copy of
//! a submission: lines are never rewritten or truncated.
//!
//! The submission path only ever writes ([`InboxWriter`]). [`InboxReader`]
//! exists for operator tooling and tests.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::InboxError;
pub use reader::{InboxReader, InboxScan, MalformedLine};
pub use writer::InboxWriter;
