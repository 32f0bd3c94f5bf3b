//! Target resolver module
//!
//! Flattens polymorphic link targets (disjunctions of conjunctions of
//! objects) into the set of variant shapes reachable through the link.

mod error;
mod flatten;

pub use error::TargetError;
pub use flatten::{flatten, TargetShape, Variant};
