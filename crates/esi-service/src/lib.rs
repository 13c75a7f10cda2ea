//! # esi-service
//!
//! The contact submission handler.
//!
//! `ContactService::submit` is the whole submission path:
//! 1. Validate the input (`SubmitError::Validation`, nothing written)
//! 2. Append to the inbox (`SubmitError::Persistence`, the only fatal failure)
//! 3. Attempt the email relay under a timeout (never fatal)
//! 4. Return a `SubmissionOutcome`

pub mod error;
pub mod service;

pub use error::SubmitError;
pub use service::ContactService;
