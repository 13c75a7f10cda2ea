//! # esi-core
//!
//! Core types shared by every crate of the ESI contact backend:
//! - `ContactInput` / `RequestContext`: what arrives with a contact request
//! - `Submission`: a validated request, not yet persisted
//! - `SubmissionRecord`: the persisted inbox line (submission + `receivedAt`)
//! - Validation and its error type
//! - Outcome and HTTP response shapes
//! - JSON Schema export of the inbox line format

pub mod errors;
pub mod record;
pub mod responses;
pub mod schema;
pub mod submission;

pub use errors::{RequiredField, ValidationError};
pub use record::SubmissionRecord;
pub use responses::SubmissionOutcome;
pub use submission::{ContactInput, RequestContext, Submission};
