use thiserror::Error;
use crate::registry::RegistryId;

/// Errors that can occur during shape resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The validated spec was checked against a different field set
    #[error("validated spec belongs to {found}, not {expected}")]
    SpecMismatch { expected: String, found: String },
    /// The validated spec was checked against another registry
    #[error("validated spec for {object} belongs to {found}, not {expected}")]
    ForeignRegistry {
        object: String,
        expected: RegistryId,
        found: RegistryId,
    },
    /// A link whose target the registry never flattened
    #[error("link '{0}' has no flattened target in this registry")]
    UnknownTarget(String),
    /// A computed field whose expression is a bare pointer
    #[error("field '{0}' does not carry a computable")]
    NotComputable(String),
}
