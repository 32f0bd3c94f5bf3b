//! Selection validator (verb module)
//!
//! Decides, per key, whether a selection spec is legal against an object.

mod error;
mod validate;

pub use error::{IssueKind, ValidationError, ValidationIssue};
pub use validate::{validate, LinkSelection, SpecOwner, ValidatedEntry, ValidatedSpec};
