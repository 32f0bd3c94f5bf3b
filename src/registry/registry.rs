//! Read-only registry and object handles

use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use crate::error::Error;
use crate::expr::{Expr, ExprError, LinkRef, PointerResolver, PropertyRef};
use crate::query::Query;
use crate::schema::{Dnf, Field, Link, ObjectId, RegistryOptions, SchemaDefinition, SchemaObject};
use crate::selection::SelectionSpec;
use crate::target::TargetShape;
use crate::validator::{self, ValidatedSpec, ValidationError};
use super::builder::RegistryBuilder;
use super::error::RegistryError;

static NEXT_REGISTRY: AtomicU64 = AtomicU64::new(1);

/// Identity of one built registry; two builds of the same schema differ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistryId(u64);

impl fmt::Display for RegistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "registry#{}", self.0)
    }
}

/// Immutable arena of schema objects.
///
/// Nothing mutates a registry after [`RegistryBuilder::build`], so a shared
/// reference may be read from any number of threads.
#[derive(Debug)]
pub struct Registry {
    id: RegistryId,
    objects: Vec<SchemaObject>,
    by_name: HashMap<String, ObjectId>,
    /// Flattened shape per distinct link target
    targets: HashMap<Dnf, TargetShape>,
    enums: IndexMap<String, Vec<String>>,
    options: RegistryOptions,
}

impl Registry {
    pub(crate) fn new(
        objects: Vec<SchemaObject>,
        by_name: HashMap<String, ObjectId>,
        targets: HashMap<Dnf, TargetShape>,
        enums: IndexMap<String, Vec<String>>,
        options: RegistryOptions,
    ) -> Self {
        Self {
            id: RegistryId(NEXT_REGISTRY.fetch_add(1, Ordering::Relaxed)),
            objects,
            by_name,
            targets,
            enums,
            options,
        }
    }

    pub fn id(&self) -> RegistryId {
        self.id
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Build a registry from a deserialized schema definition
    pub fn from_definition(def: &SchemaDefinition) -> Result<Self, RegistryError> {
        RegistryBuilder::from_definition(def).build()
    }

    /// Look up an object by name
    pub fn object(&self, name: &str) -> Result<ObjectRef<'_>, RegistryError> {
        self.by_name
            .get(name)
            .and_then(|id| self.object_by_id(*id))
            .ok_or_else(|| RegistryError::UndefinedObject {
                name: name.to_string(),
                referenced_by: None,
            })
    }

    pub fn object_by_id(&self, id: ObjectId) -> Option<ObjectRef<'_>> {
        self.objects.get(id.index()).map(|object| ObjectRef {
            registry: self,
            object,
        })
    }

    /// All objects in definition order
    pub fn objects(&self) -> impl Iterator<Item = ObjectRef<'_>> {
        self.objects.iter().map(move |object| ObjectRef {
            registry: self,
            object,
        })
    }

    /// Flattened target of a link defined in this registry
    pub fn target(&self, link: &Link) -> Option<&TargetShape> {
        self.targets.get(&link.target)
    }

    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    pub fn enum_values(&self, name: &str) -> Option<&[String]> {
        self.enums.get(name).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Resolves `Object.field` paths, and bare `field` paths against `context`
    pub fn pointers(&self, context: Option<ObjectId>) -> RegistryPointers<'_> {
        RegistryPointers {
            registry: self,
            context,
        }
    }
}

/// Handle to one object of a registry
#[derive(Debug, Clone, Copy)]
pub struct ObjectRef<'r> {
    registry: &'r Registry,
    object: &'r SchemaObject,
}

impl<'r> ObjectRef<'r> {
    pub fn id(&self) -> ObjectId {
        self.object.id
    }

    pub fn name(&self) -> &'r str {
        &self.object.name
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn schema(&self) -> &'r SchemaObject {
        self.object
    }

    pub fn field(&self, name: &str) -> Option<&'r Field> {
        self.object.get_field(name)
    }

    /// Reference to a property, usable as an expression operand or override
    pub fn property(&self, name: &str) -> Option<PropertyRef> {
        self.object.get_property(name).map(|p| PropertyRef {
            object: self.object.id,
            object_name: self.object.name.clone(),
            property: p.clone(),
        })
    }

    /// Reference to a link, usable with aggregates or as an override
    pub fn link(&self, name: &str) -> Option<LinkRef> {
        self.object.get_link(name).map(|l| LinkRef {
            object: self.object.id,
            object_name: self.object.name.clone(),
            link: l.clone(),
        })
    }

    /// Flattened target of one of this object's links
    pub fn target(&self, link: &str) -> Option<&'r TargetShape> {
        self.registry.target(self.object.get_link(link)?)
    }

    pub fn validate(&self, spec: &SelectionSpec) -> Result<ValidatedSpec, ValidationError> {
        validator::validate(*self, spec)
    }

    /// Validate and resolve a selection spec into a query handle
    pub fn shape(&self, spec: &SelectionSpec) -> Result<Query, Error> {
        Query::shape(*self, spec)
    }
}

/// [`PointerResolver`] over a built registry
#[derive(Debug, Clone, Copy)]
pub struct RegistryPointers<'r> {
    registry: &'r Registry,
    context: Option<ObjectId>,
}

impl PointerResolver for RegistryPointers<'_> {
    fn resolve_pointer(&self, path: &str) -> Result<Expr, ExprError> {
        let unknown = || ExprError::UnknownPointer(path.to_string());
        let (object, field) = match path.split_once('.') {
            Some((object, field)) => (self.registry.object(object).map_err(|_| unknown())?, field),
            None => {
                let id = self.context.ok_or_else(unknown)?;
                (self.registry.object_by_id(id).ok_or_else(unknown)?, path)
            }
        };
        if let Some(p) = object.property(field) {
            return Ok(Expr::Property(p));
        }
        object.link(field).map(Expr::Link).ok_or_else(unknown)
    }
}
