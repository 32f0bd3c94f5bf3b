//! Expression construction errors

use thiserror::Error;
use super::node::ExprType;
use super::operator::Operator;

/// Errors raised while building an expression.
///
/// Type errors surface when the node is constructed, never later.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    /// An operand's type is outside the operator's signature
    #[error("operator '{operator}' expects {expected} at operand {position}, found {found}")]
    OperatorTypeMismatch {
        operator: Operator,
        position: usize,
        expected: String,
        found: ExprType,
    },
    /// Wrong number of operands
    #[error("operator '{operator}' takes {expected} operand(s), got {found}")]
    ArityMismatch {
        operator: Operator,
        expected: usize,
        found: usize,
    },
    /// Operator name not in the table
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
    /// A pointer path in an expression definition did not resolve
    #[error("unknown pointer '{0}' in expression")]
    UnknownPointer(String),
    /// A literal definition could not be interpreted
    #[error("invalid {kind} literal '{input}'")]
    InvalidLiteral { kind: &'static str, input: String },
}
