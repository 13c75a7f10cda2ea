use std::path::PathBuf;

use anyhow::Context;
use esi_config::EsiConfig;
use esi_core::SubmissionRecord;
use esi_inbox::{InboxReader, MalformedLine};
use serde::Serialize;

use crate::cli::{GlobalFlags, InboxCommands};
use crate::output::output;

#[derive(Debug, Serialize)]
struct VerifyReport {
    path: PathBuf,
    total: usize,
    valid: usize,
    malformed: Vec<MalformedLine>,
}

/// Handle `esi inbox <action>`.
pub fn handle(action: &InboxCommands, config: &EsiConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let reader = InboxReader::new(&config.inbox.path);
    match action {
        InboxCommands::List { limit } => list(&reader, *limit, flags),
        InboxCommands::Verify => verify(&reader, flags),
    }
}

fn list(reader: &InboxReader, limit: Option<usize>, flags: &GlobalFlags) -> anyhow::Result<()> {
    let records = reader.read_all().with_context(|| {
        format!(
            "failed to read inbox at {} (run `esi inbox verify` to locate bad lines)",
            reader.path().display()
        )
    })?;
    output(&keep_last(records, limit), flags.format)
}

fn verify(reader: &InboxReader, flags: &GlobalFlags) -> anyhow::Result<()> {
    let scan = reader
        .scan()
        .with_context(|| format!("failed to read inbox at {}", reader.path().display()))?;

    let report = VerifyReport {
        path: reader.path().to_path_buf(),
        total: scan.records.len() + scan.malformed.len(),
        valid: scan.records.len(),
        malformed: scan.malformed,
    };
    output(&report, flags.format)?;

    if !report.malformed.is_empty() {
        anyhow::bail!(
            "{} malformed line(s) in {}",
            report.malformed.len(),
            report.path.display()
        );
    }
    Ok(())
}

/// Keep the most recent `limit` records; the inbox is oldest first.
fn keep_last(mut records: Vec<SubmissionRecord>, limit: Option<usize>) -> Vec<SubmissionRecord> {
    match limit {
        Some(limit) => {
            let skip = records.len().saturating_sub(limit);
            records.split_off(skip)
        }
        None => records,
    }
}
