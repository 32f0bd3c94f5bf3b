use indexmap::IndexMap;
use tracing::debug;
use crate::expr::Expr;
use crate::registry::{ObjectRef, Registry};
use crate::schema::{Field, Link, ObjectId, Property};
use crate::validator::{LinkSelection, SpecOwner, ValidatedEntry, ValidatedSpec};
use super::error::ResolveError;
use super::types::{ResolvedShape, ShapeType};

/// Resolve the output shape of a validated spec.
///
/// Recursion follows the spec, never the schema graph, so cyclic schemas
/// resolve in as many steps as the spec is deep.
///
/// # Arguments
/// * `object` - The object the spec was validated against
/// * `spec` - Output of [`validate`](crate::validator::validate) for `object`
pub fn resolve(object: ObjectRef<'_>, spec: &ValidatedSpec) -> Result<ResolvedShape, ResolveError> {
    if spec.registry() != object.registry().id() {
        return Err(ResolveError::ForeignRegistry {
            object: object.name().to_string(),
            expected: object.registry().id(),
            found: spec.registry(),
        });
    }
    if spec.owner() != &SpecOwner::Object(object.id()) {
        return Err(ResolveError::SpecMismatch {
            expected: object.name().to_string(),
            found: describe_owner(object.registry(), spec.owner()),
        });
    }
    let shape = resolve_level(object.registry(), spec)?;
    debug!(object = object.name(), fields = shape.len(), "shape.resolve.complete");
    Ok(shape)
}

fn describe_owner(registry: &Registry, owner: &SpecOwner) -> String {
    let name = |id: ObjectId| {
        registry
            .object_by_id(id)
            .map(|o| o.name().to_string())
            .unwrap_or_else(|| id.to_string())
    };
    match owner {
        SpecOwner::Object(id) => name(*id),
        SpecOwner::Target(dnf) => dnf
            .clauses()
            .iter()
            .map(|clause| clause.iter().map(|id| name(*id)).collect::<Vec<_>>().join(" & "))
            .collect::<Vec<_>>()
            .join(" | "),
    }
}

fn resolve_level(registry: &Registry, spec: &ValidatedSpec) -> Result<ResolvedShape, ResolveError> {
    let mut shape = ResolvedShape::new();
    for (key, entry) in spec.entries() {
        let ty = match entry {
            ValidatedEntry::Property(p) => property_type(p),
            ValidatedEntry::Computed(c) => computed_type(&c.name, &c.expr)?,
            ValidatedEntry::Alias(expr) => computed_type(key, expr)?,
            ValidatedEntry::Link { link, selection } => link_type(registry, link, selection)?,
        };
        shape.insert(key, ty);
    }
    Ok(shape)
}

fn property_type(property: &Property) -> ShapeType {
    ShapeType::Scalar(property.scalar.clone()).with_cardinality(property.cardinality, false)
}

fn computed_type(name: &str, expr: &Expr) -> Result<ShapeType, ResolveError> {
    expr.result_type()
        .map(ShapeType::Scalar)
        .ok_or_else(|| ResolveError::NotComputable(name.to_string()))
}

fn link_type(registry: &Registry, link: &Link, selection: &LinkSelection) -> Result<ShapeType, ResolveError> {
    let inner = match selection {
        LinkSelection::Nested(spec) => {
            if spec.owner() != &SpecOwner::Target(link.target.clone()) {
                return Err(ResolveError::SpecMismatch {
                    expected: describe_owner(registry, &SpecOwner::Target(link.target.clone())),
                    found: describe_owner(registry, spec.owner()),
                });
            }
            resolve_level(registry, spec)?
        }
        LinkSelection::Default => {
            let target = registry
                .target(link)
                .ok_or_else(|| ResolveError::UnknownTarget(link.name.clone()))?;
            default_shape(&target.common)?
        }
    };
    Ok(ShapeType::Object(inner).with_cardinality(link.cardinality, true))
}

/// Properties and computed fields of a field set; links stay unexpanded
fn default_shape(fields: &IndexMap<String, Field>) -> Result<ResolvedShape, ResolveError> {
    let mut shape = ResolvedShape::new();
    for (name, field) in fields {
        match field {
            Field::Property(p) => {
                shape.insert(name.as_str(), property_type(p));
            }
            Field::Computed(c) => {
                shape.insert(name.as_str(), computed_type(name, &c.expr)?);
            }
            Field::Link(_) => {}
        }
    }
    Ok(shape)
}
