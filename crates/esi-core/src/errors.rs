//! Validation error types.
//!
//! Persistence and relay errors live in their own crates (`esi-inbox`,
//! `esi-relay`). The submission handler in `esi-service` is where they converge.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A contact form field that must be non-empty after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequiredField {
    Name,
    Email,
    Message,
}

impl RequiredField {
    /// All required fields, in the order they are reported.
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A submission was rejected before anything was persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required fields: {}", join_fields(.missing))]
pub struct ValidationError {
    missing: Vec<RequiredField>,
}

impl ValidationError {
    /// Build from the list of missing fields. Order is normalized to
    /// [`RequiredField::ALL`] and duplicates are dropped.
    #[must_use]
    pub fn missing(fields: impl IntoIterator<Item = RequiredField>) -> Self {
        let fields: Vec<RequiredField> = fields.into_iter().collect();
        let missing = RequiredField::ALL
            .into_iter()
            .filter(|field| fields.contains(field))
            .collect();
        Self { missing }
    }

    /// The fields that were missing or blank.
    #[must_use]
    pub fn fields(&self) -> &[RequiredField] {
        &self.missing
    }
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
