//! Schema objects and the pointers they carry

use indexmap::IndexMap;
use std::fmt;
use super::types::{Cardinality, ScalarType};
use crate::expr::Expr;

/// Stable identity of an object inside a registry arena.
///
/// Links refer to their targets by id, so an object may point at itself or at
/// an object declared after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) u32);

impl ObjectId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discriminant shared by every pointer-like schema entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Computable,
    Property,
    Link,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Computable => write!(f, "computable"),
            FieldKind::Property => write!(f, "property"),
            FieldKind::Link => write!(f, "link"),
        }
    }
}

/// A scalar-valued pointer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    pub name: String,
    pub scalar: ScalarType,
    pub cardinality: Cardinality,
}

impl Property {
    pub fn new(name: impl Into<String>, scalar: ScalarType, cardinality: Cardinality) -> Self {
        Self {
            name: name.into(),
            scalar,
            cardinality,
        }
    }
}

/// Polymorphic link target: a disjunction of conjunctions of objects.
///
/// Each clause is one alternative shape; the members of a clause are
/// co-required facets whose field sets are intersected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dnf(pub(crate) Vec<Vec<ObjectId>>);

impl Dnf {
    /// Target with a single clause holding a single object
    pub fn single(object: ObjectId) -> Self {
        Dnf(vec![vec![object]])
    }

    pub fn new(clauses: Vec<Vec<ObjectId>>) -> Self {
        Dnf(clauses)
    }

    pub fn clauses(&self) -> &[Vec<ObjectId>] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A relational pointer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    pub name: String,
    pub target: Dnf,
    pub cardinality: Cardinality,
}

impl Link {
    pub fn new(name: impl Into<String>, target: Dnf, cardinality: Cardinality) -> Self {
        Self {
            name: name.into(),
            target,
            cardinality,
        }
    }
}

/// A field whose value is an expression declared in the schema
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedField {
    pub name: String,
    pub expr: Expr,
}

/// Any named entry of a schema object
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Property(Property),
    Link(Link),
    Computed(ComputedField),
}

impl Field {
    pub fn name(&self) -> &str {
        match self {
            Field::Property(p) => &p.name,
            Field::Link(l) => &l.name,
            Field::Computed(c) => &c.name,
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Property(_) => FieldKind::Property,
            Field::Link(_) => FieldKind::Link,
            Field::Computed(_) => FieldKind::Computable,
        }
    }

    /// Whether two same-named fields describe the same value.
    ///
    /// Used when intersecting clause members and when collecting the fields
    /// shared by every variant of a link target.
    pub fn is_compatible(&self, other: &Field) -> bool {
        match (self, other) {
            (Field::Property(a), Field::Property(b)) => {
                a.scalar == b.scalar && a.cardinality == b.cardinality
            }
            (Field::Link(a), Field::Link(b)) => {
                a.target == b.target && a.cardinality == b.cardinality
            }
            (Field::Computed(a), Field::Computed(b)) => a.expr.ty() == b.expr.ty(),
            _ => false,
        }
    }
}

/// A named mapping from field name to field descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaObject {
    pub id: ObjectId,
    pub name: String,
    pub fields: IndexMap<String, Field>,
}

impl SchemaObject {
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn get_property(&self, name: &str) -> Option<&Property> {
        match self.fields.get(name)? {
            Field::Property(p) => Some(p),
            _ => None,
        }
    }

    pub fn get_link(&self, name: &str) -> Option<&Link> {
        match self.fields.get(name)? {
            Field::Link(l) => Some(l),
            _ => None,
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    /// Iterate links in declaration order
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.fields.values().filter_map(|f| match f {
            Field::Link(l) => Some(l),
            _ => None,
        })
    }
}
