//! JSONL inbox writer.
//!
//! Appends one `SubmissionRecord` per line to the inbox file. Each append is
//! serialized through an in-process mutex and written with a single
//! `write_all` on an `O_APPEND` handle, so concurrent submissions never
//! interleave bytes within a line.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use esi_core::{Submission, SubmissionRecord};

use crate::error::InboxError;

/// Appends submissions to the inbox file.
///
/// The file handle is opened and released on every append; the writer itself
/// holds no open descriptors between calls.
pub struct InboxWriter {
    path: PathBuf,
    lock: Mutex<()>,
}

impl InboxWriter {
    /// Create a writer for the given inbox file.
    ///
    /// Creates the parent directory if it doesn't exist. The file itself is
    /// created on first append.
    ///
    /// # Errors
    ///
    /// Returns `InboxError::Write` if the parent directory cannot be created.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, InboxError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| InboxError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Stamp the submission with `receivedAt` and append it as one line.
    ///
    /// The timestamp is taken inside the append critical section, so within
    /// one process it never goes backwards relative to file order unless the
    /// wall clock does.
    ///
    /// # Errors
    ///
    /// Returns `InboxError` if the file cannot be opened, written, or synced.
    /// Existing content is never modified.
    pub fn append(&self, submission: &Submission) -> Result<SubmissionRecord, InboxError> {
        // The guarded value is `()`, so a poisoned lock carries no broken state.
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|source| self.write_error(source))?;

        let torn_tail = ends_without_newline(&mut file).map_err(|source| self.write_error(source))?;
        if torn_tail {
            tracing::warn!(
                path = %self.path.display(),
                "inbox does not end with a newline; starting record on a fresh line"
            );
        }

        let record = SubmissionRecord::stamp(submission, Utc::now());
        let mut line = Vec::with_capacity(512);
        if torn_tail {
            line.push(b'\n');
        }
        serde_json::to_writer(&mut line, &record)?;
        line.push(b'\n');

        file.write_all(&line)
            .and_then(|()| file.sync_data())
            .map_err(|source| self.write_error(source))?;

        Ok(record)
    }

    /// The inbox file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: std::io::Error) -> InboxError {
        InboxError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

/// True when the file is non-empty and its last byte is not `\n`, which
/// means an earlier write was cut short.
fn ends_without_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

#[cfg(test)]
mod tests {
    use esi_core::{ContactInput, RequestContext};
    use pretty_assertions::assert_eq;

    use super::*;

    fn submission(name: &str) -> Submission {
        Submission::validate(
            ContactInput {
                name: Some(name.into()),
                email: Some("jane@x.com".into()),
                message: Some("Hi".into()),
                ..Default::default()
            },
            RequestContext::default(),
        )
        .unwrap()
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/inbox.jsonl");
        let writer = InboxWriter::new(&path).unwrap();
        writer.append(&submission("Jane")).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn appends_never_rewrite_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inbox.jsonl");
        std::fs::write(&path, "{\"legacy\":true}\n").unwrap();

        let writer = InboxWriter::new(&path).unwrap();
        writer.append(&submission("Jane")).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("{\"legacy\":true}\n"));
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn torn_tail_is_not_merged_into_new_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inbox.jsonl");
        std::fs::write(&path, "{\"name\":\"half-writ").unwrap();

        let writer = InboxWriter::new(&path).unwrap();
        let record = writer.append(&submission("Jane")).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "{\"name\":\"half-writ");
        let parsed: SubmissionRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn unwritable_path_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inbox.jsonl");
        std::fs::create_dir(&path).unwrap();

        let writer = InboxWriter::new(&path).unwrap();
        let err = writer.append(&submission("Jane")).unwrap_err();
        assert!(matches!(err, InboxError::Write { .. }));
    }
}
