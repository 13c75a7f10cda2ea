//! Inbox (append-only submission log) configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_path() -> PathBuf {
    PathBuf::from("inbox.jsonl")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InboxConfig {
    /// JSONL file every accepted submission is appended to.
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
