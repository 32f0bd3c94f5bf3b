//! Shape resolver (verb module)
//!
//! Turns a validated selection spec into the declared type of every field
//! a query honoring it will produce.

mod error;
mod resolve;
mod types;

pub use error::ResolveError;
pub use resolve::resolve;
pub use types::{ResolvedShape, ShapeType};
