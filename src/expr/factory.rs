//! Expression factory
//!
//! Every constructor type-checks its operands immediately and returns the
//! typed node, or the signature violation.

use super::error::ExprError;
use super::node::{Expr, Literal};
use super::operator::Operator;

/// Wrap a constant
pub fn literal(value: impl Into<Literal>) -> Expr {
    Expr::Literal(value.into())
}

/// Apply an operator to operands
pub fn apply(op: Operator, operands: Vec<Expr>) -> Result<Expr, ExprError> {
    let types: Vec<_> = operands.iter().map(Expr::ty).collect();
    let ty = op.result_type(&types)?;
    tracing::trace!(operator = %op, result = %ty, "expr.apply");
    Ok(Expr::Apply {
        op,
        args: operands,
        ty,
    })
}

/// Apply an operator looked up by name
pub fn operator(name: &str, operands: Vec<Expr>) -> Result<Expr, ExprError> {
    apply(name.parse()?, operands)
}

macro_rules! binary {
    ($($(#[$doc:meta])* $name:ident => $op:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name(l: impl Into<Expr>, r: impl Into<Expr>) -> Result<Expr, ExprError> {
                apply(Operator::$op, vec![l.into(), r.into()])
            }
        )*
    };
}

macro_rules! unary {
    ($($(#[$doc:meta])* $name:ident => $op:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name(x: impl Into<Expr>) -> Result<Expr, ExprError> {
                apply(Operator::$op, vec![x.into()])
            }
        )*
    };
}

binary! {
    /// `plus(T, T) -> T` over numerics
    plus => Plus,
    minus => Minus,
    multiply => Multiply,
    /// Integer division yields `float64`
    divide => Divide,
    modulo => Modulo,
    concat => Concat,
    eq => Eq,
    neq => Neq,
    lt => Lt,
    lte => Lte,
    gt => Gt,
    gte => Gte,
    and => And,
    or => Or,
}

unary! {
    /// `len(T) -> int64` for str, bytes and json
    len => Len,
    lower => Lower,
    upper => Upper,
    not => Not,
    /// Accepts links as well as scalars
    count => Count,
    exists => Exists,
    sum => Sum,
    min => Min,
    max => Max,
    avg => Avg,
}
