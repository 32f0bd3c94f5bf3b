use tracing::{debug, trace};
use crate::error::Error;
use crate::expr::{Expr, ExprType};
use crate::registry::ObjectRef;
use crate::schema::{ObjectId, ScalarType};
use crate::selection::SelectionSpec;
use crate::shape::{self, ResolvedShape};
use crate::validator::{self, ValidatedSpec};
use super::error::QueryError;

/// Handle returned by `shape(spec)`.
///
/// Carries the validated spec (what was asked for) and the resolved shape
/// (what will come back) for the execution layer. Refinements never change
/// the shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    object: ObjectId,
    object_name: String,
    spec: ValidatedSpec,
    shape: ResolvedShape,
    filters: Vec<Expr>,
}

impl Query {
    /// Validate `spec` against `object`, then resolve its shape
    pub fn shape(object: ObjectRef<'_>, spec: &SelectionSpec) -> Result<Query, Error> {
        let validated = validator::validate(object, spec)?;
        let shape = shape::resolve(object, &validated)?;
        debug!(object = object.name(), fields = shape.len(), "query.shape");
        Ok(Query {
            object: object.id(),
            object_name: object.name().to_string(),
            spec: validated,
            shape,
            filters: Vec::new(),
        })
    }

    /// Add a predicate the execution layer must apply.
    ///
    /// Predicates combine by conjunction in the order they were added.
    pub fn filter(mut self, predicate: Expr) -> Result<Query, QueryError> {
        let found = predicate.ty();
        if found != ExprType::Scalar(ScalarType::Bool) {
            return Err(QueryError::NotAPredicate { found });
        }
        trace!(object = %self.object_name, predicate = %predicate, "query.filter");
        self.filters.push(predicate);
        Ok(self)
    }

    pub fn object(&self) -> ObjectId {
        self.object
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn spec(&self) -> &ValidatedSpec {
        &self.spec
    }

    /// Declared output contract
    pub fn resolved_shape(&self) -> &ResolvedShape {
        &self.shape
    }

    pub fn filters(&self) -> &[Expr] {
        &self.filters
    }
}
