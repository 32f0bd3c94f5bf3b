//! Schema types (nouns)
//!
//! Objects, their pointers, and the definition records they are built from.

mod definition;
mod object;
mod types;

pub use definition::{
    SchemaDefinition, RegistryOptions, EnumDefinition, ObjectDefinition, FieldDefinition,
    DEFAULT_MAX_SELECTION_DEPTH,
};
pub use object::{ObjectId, FieldKind, Property, Link, Dnf, ComputedField, Field, SchemaObject};
pub use types::{ScalarType, Cardinality, ParseScalarTypeError, ParseCardinalityError};
