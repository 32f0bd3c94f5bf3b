//! Registry build errors
//!
//! All of these are schema-definition bugs: a registry that reports one is
//! never handed out.

use thiserror::Error;
use crate::expr::ExprError;
use crate::schema::ScalarType;
use crate::target::TargetError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// An object name that was never defined
    #[error("object '{name}' is not defined{}", referenced_suffix(.referenced_by))]
    UndefinedObject {
        name: String,
        referenced_by: Option<String>,
    },
    /// Two fields of one object share a name
    #[error("object '{object}' defines field '{field}' more than once")]
    DuplicateField { object: String, field: String },
    /// Two enum declarations share a name
    #[error("enum '{0}' is declared more than once")]
    DuplicateEnum(String),
    /// An enum declared under a built-in scalar type name
    #[error("enum '{name}' shadows built-in type '{builtin}'")]
    EnumShadowsBuiltin { name: String, builtin: ScalarType },
    /// A property type that is neither built in nor a declared enum
    #[error("property '{object}.{field}' has unknown type '{type_name}'")]
    UnknownScalarType {
        object: String,
        field: String,
        type_name: String,
    },
    /// A computed field whose expression failed to build
    #[error("computed field '{object}.{field}' is invalid: {source}")]
    InvalidComputedField {
        object: String,
        field: String,
        #[source]
        source: ExprError,
    },
    /// A computed field declared as a bare pointer
    #[error("computed field '{object}.{field}' must be a literal or operator application")]
    ComputedFieldNotComputable { object: String, field: String },
    /// Members of an intersected clause disagree on a field
    #[error("link '{link}': clause {clause} intersects '{first}' and '{second}', which define field '{field}' incompatibly")]
    TargetConflict {
        link: String,
        clause: usize,
        field: String,
        first: String,
        second: String,
    },
    /// Any other target problem (empty target, empty clause)
    #[error("link '{link}' has an invalid target: {source}")]
    InvalidTarget {
        link: String,
        #[source]
        source: TargetError,
    },
    /// The process-wide registry was already installed
    #[error("a global registry is already installed")]
    AlreadyInstalled,
}

fn referenced_suffix(referenced_by: &Option<String>) -> String {
    match referenced_by {
        Some(r) => format!(" (referenced by '{}')", r),
        None => String::new(),
    }
}

impl RegistryError {
    pub(crate) fn from_target(link: String, err: TargetError) -> Self {
        match err {
            TargetError::Conflict { clause, field, first, second } => RegistryError::TargetConflict {
                link,
                clause,
                field,
                first,
                second,
            },
            other => RegistryError::InvalidTarget { link, source: other },
        }
    }
}
