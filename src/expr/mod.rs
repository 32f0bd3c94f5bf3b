//! Computed values (expression factory)
//!
//! Builds typed expression nodes that may stand in for a property anywhere a
//! selection is accepted. Operator signatures are checked at construction.

mod def;
mod error;
mod factory;
mod node;
mod operator;

pub use def::{ExprDef, OpDef, LiteralDef, TypedLiteralDef, PointerResolver};
pub use error::ExprError;
pub use factory::{
    literal, apply, operator,
    plus, minus, multiply, divide, modulo, concat,
    eq, neq, lt, lte, gt, gte, and, or,
    len, lower, upper, not, count, exists, sum, min, max, avg,
};
pub use node::{Expr, ExprType, Literal, PropertyRef, LinkRef};
pub use operator::Operator;
