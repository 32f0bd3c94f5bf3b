//! Error types for shapeql

use thiserror::Error;
use crate::expr::ExprError;
use crate::query::QueryError;
use crate::registry::RegistryError;
use crate::selection::SpecParseError;
use crate::shape::ResolveError;
use crate::validator::ValidationError;

/// Errors that can occur loading a schema file
#[derive(Debug, Error)]
pub enum ParseError {
    /// IO error reading file
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// YAML deserialization error
    #[error("Invalid YAML: {source}")]
    Yaml {
        #[from]
        source: serde_yaml::Error,
    },
    /// The definition parsed but does not form a valid registry
    #[error("Invalid schema: {0}")]
    Registry(#[from] RegistryError),
}

/// Any error this crate returns
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Expr(#[from] ExprError),
    #[error(transparent)]
    SpecParse(#[from] SpecParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Query(#[from] QueryError),
}
