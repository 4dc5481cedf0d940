//! Turning the document store into a publish submission.
//!
//! The form collects and validates metadata; the payload combines it with
//! every language version. Sending the payload is left to the caller.

pub mod form;
pub mod payload;

pub use form::{PostStatus, PublishForm, PublishFormError, generate_slug};
pub use payload::{
    ErrorResponse, LanguagePayload, LanguageSummary, PublishMetadata, PublishPayload,
    PublishReceipt, PublishResponse, PublishSummary,
};
