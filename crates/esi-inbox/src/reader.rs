//! Read side of the inbox, for operator tooling.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use esi_core::SubmissionRecord;
use serde::Serialize;

use crate::error::InboxError;

/// A line that could not be decoded as a `SubmissionRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedLine {
    /// 1-based line number within the file.
    pub line_number: usize,
    pub error: String,
}

/// Result of a tolerant pass over the inbox.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboxScan {
    pub records: Vec<SubmissionRecord>,
    pub malformed: Vec<MalformedLine>,
}

impl InboxScan {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty()
    }
}

pub struct InboxReader {
    path: PathBuf,
}

impl InboxReader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode every line, failing on the first bad one.
    ///
    /// A missing inbox file reads as empty.
    ///
    /// # Errors
    ///
    /// Returns `InboxError::Read` if the file cannot be read or any line is
    /// not a valid record.
    pub fn read_all(&self) -> Result<Vec<SubmissionRecord>, InboxError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        serde_jsonlines::json_lines(&self.path)
            .map_err(|source| self.read_error(source))?
            .collect::<Result<Vec<SubmissionRecord>, _>>()
            .map_err(|source| self.read_error(source))
    }

    /// Decode every line, collecting bad lines instead of stopping.
    ///
    /// Blank lines are skipped. Lines are split on raw bytes so a record cut
    /// mid-character does not abort the scan.
    ///
    /// # Errors
    ///
    /// Returns `InboxError::Read` only if the file cannot be opened or read.
    pub fn scan(&self) -> Result<InboxScan, InboxError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(InboxScan::default());
            }
            Err(source) => return Err(self.read_error(source)),
        };

        let mut scan = InboxScan::default();
        for (index, line) in BufReader::new(file).split(b'\n').enumerate() {
            let line = line.map_err(|source| self.read_error(source))?;
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            match serde_json::from_slice::<SubmissionRecord>(&line) {
                Ok(record) => scan.records.push(record),
                Err(e) => scan.malformed.push(MalformedLine {
                    line_number: index + 1,
                    error: e.to_string(),
                }),
            }
        }
        Ok(scan)
    }

    fn read_error(&self, source: std::io::Error) -> InboxError {
        InboxError::Read {
            path: self.path.clone(),
            source,
        }
    }
}
