//! JSON Schema export of the inbox line format, for `esi schema` and for
//! external tooling that consumes the inbox file.

use crate::record::SubmissionRecord;

/// JSON Schema describing one inbox line.
#[must_use]
pub fn inbox_record_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(SubmissionRecord);
    schema.as_value().clone()
}
