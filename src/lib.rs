//! shapeql - Validate selection specs and compute the shape of what they select
//!
//! This library provides:
//! - Schema types (objects, properties, links with polymorphic targets, computed fields)
//! - Schema parsing from YAML
//! - A build-once, read-only schema registry
//! - Typed expressions (literals and operators) usable wherever a property is
//! - Selection validation with batched, path-addressed errors
//! - Shape resolution
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `schema/` - scalar types, cardinalities, objects and their fields
//! - `expr/` - expression nodes and the operator signature table
//! - `selection/` - selection specs and their directives
//! - `query/` - the query facade handed to the execution layer
//!
//! **Verb modules** (transformations):
//! - `parser/` - YAML → SchemaDefinition → Registry
//! - `registry/` - SchemaDefinition → Registry (pointer resolution, target flattening)
//! - `target/` - link target DNF → variants + common fields
//! - `validator/` - object + SelectionSpec → ValidatedSpec
//! - `shape/` - ValidatedSpec → ResolvedShape
//!
//! # Example
//!
//! ```ignore
//! use shapeql::{parser, SelectionSpec};
//!
//! let registry = parser::load_file("schema.yaml")?;
//! let user = registry.object("User")?;
//! let spec = SelectionSpec::new()
//!     .include("name")
//!     .exclude("age")
//!     .nested("friends", SelectionSpec::new().include("name"));
//! let query = user.shape(&spec)?;
//! assert_eq!(query.resolved_shape().to_string(), "{name: str, friends: Array<{name: str}>}");
//! ```

pub mod schema;
pub mod expr;
pub mod target;
pub mod registry;
pub mod selection;
pub mod validator;
pub mod shape;
pub mod query;
pub mod parser;
pub mod error;

// Re-export commonly used types
pub use schema::{Cardinality, Dnf, Field, FieldKind, Link, ObjectId, Property, ScalarType, SchemaDefinition, SchemaObject};
pub use expr::{Expr, ExprError, ExprType, Literal, Operator, PropertyRef, LinkRef};
pub use target::{flatten, TargetShape, Variant, TargetError};
pub use registry::{Registry, RegistryBuilder, RegistryId, ObjectRef, RegistryError, install_global, global};
pub use selection::{Directive, SelectionSpec, SpecParseError};
pub use validator::{validate, ValidatedSpec, ValidationError, ValidationIssue, IssueKind};
pub use shape::{resolve, ResolvedShape, ShapeType, ResolveError};
pub use query::{Query, QueryError};
pub use error::{Error, ParseError};
