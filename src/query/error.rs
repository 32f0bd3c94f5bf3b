use thiserror::Error;
use crate::expr::ExprType;

/// Errors refining a query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Filter predicates must evaluate to `bool`
    #[error("filter predicate must be bool, found {found}")]
    NotAPredicate { found: ExprType },
}
