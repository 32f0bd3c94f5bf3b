//! Selection spec types (nouns)

mod parse;
mod spec;

pub use parse::{SpecParseError, EXPR_KEY};
pub use spec::{Directive, SelectionSpec};
