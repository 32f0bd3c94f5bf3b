//! Target resolution errors

use thiserror::Error;
use crate::schema::ObjectId;

/// Errors flattening a link target
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    /// A target must list at least one clause
    #[error("link target has no clauses")]
    EmptyTarget,
    /// A clause must list at least one object
    #[error("clause {clause} of link target is empty")]
    EmptyClause { clause: usize },
    /// Two members of one clause define the same field differently
    #[error("clause {clause} intersects '{first}' and '{second}', which define field '{field}' incompatibly")]
    Conflict {
        clause: usize,
        field: String,
        first: String,
        second: String,
    },
    /// An id that is not in the arena
    #[error("link target references unknown object {0}")]
    UnknownObject(ObjectId),
}
