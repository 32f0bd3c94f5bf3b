//! Registry build phase
//!
//! Objects are registered by name and receive a stable [`ObjectId`] the moment
//! they are first mentioned, so fields may reference objects that are defined
//! later (or the object itself). Everything is resolved and checked in
//! [`RegistryBuilder::build`]; afterwards the registry is read-only.

use indexmap::IndexMap;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;
use crate::expr::{Expr, ExprDef, ExprError, LinkRef, PointerResolver, PropertyRef};
use crate::schema::{
    Cardinality, ComputedField, Dnf, Field, FieldDefinition, Link, ObjectId, Property,
    RegistryOptions, ScalarType, SchemaDefinition, SchemaObject,
};
use crate::target;
use super::error::RegistryError;
use super::registry::Registry;

#[derive(Debug, Default)]
struct PendingObject {
    fields: Vec<PendingField>,
}

/// A field as handed to the builder
#[derive(Debug)]
enum PendingField {
    /// Typed property from [`RegistryBuilder::property`]
    Property(Property),
    Declared(FieldDefinition),
}

impl PendingField {
    fn name(&self) -> &str {
        match self {
            PendingField::Property(p) => &p.name,
            PendingField::Declared(def) => def.name(),
        }
    }
}

/// Collects object definitions until [`build`](Self::build)
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    options: RegistryOptions,
    enums: IndexMap<String, Vec<String>>,
    duplicate_enum: Option<String>,
    objects: IndexMap<String, PendingObject>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a deserialized schema definition
    pub fn from_definition(def: &SchemaDefinition) -> Self {
        let mut builder = Self::new();
        builder.options(def.options.clone());
        for e in &def.enums {
            builder.enumeration(&e.name, e.values.clone());
        }
        for object in &def.objects {
            builder.define(&object.name);
            for field in &object.fields {
                builder.push_field(&object.name, field.clone());
            }
        }
        builder
    }

    pub fn options(&mut self, options: RegistryOptions) -> &mut Self {
        self.options = options;
        self
    }

    /// Declare an enumerated scalar type
    pub fn enumeration(&mut self, name: &str, values: Vec<String>) -> &mut Self {
        if self.enums.insert(name.to_string(), values).is_some() && self.duplicate_enum.is_none() {
            self.duplicate_enum = Some(name.to_string());
        }
        self
    }

    /// Register an object, or return the id it already has.
    ///
    /// Repeated calls with the same name are no-ops.
    pub fn define(&mut self, name: &str) -> ObjectId {
        let entry = self.objects.entry(name.to_string());
        let id = ObjectId(entry.index() as u32);
        entry.or_default();
        id
    }

    /// Add a property to an object
    pub fn property(
        &mut self,
        object: &str,
        name: &str,
        scalar: ScalarType,
        cardinality: Cardinality,
    ) -> &mut Self {
        self.push(object, PendingField::Property(Property::new(name, scalar, cardinality)))
    }

    /// Add a link to an object; `target` is a list of clauses of object names
    pub fn link(
        &mut self,
        object: &str,
        name: &str,
        target: &[&[&str]],
        cardinality: Cardinality,
    ) -> &mut Self {
        let target = target
            .iter()
            .map(|clause| clause.iter().map(|s| s.to_string()).collect())
            .collect();
        self.push_field(
            object,
            FieldDefinition::Link {
                name: name.to_string(),
                target,
                cardinality,
            },
        )
    }

    /// Add a computed field to an object
    pub fn computed(&mut self, object: &str, name: &str, expr: ExprDef) -> &mut Self {
        self.push_field(
            object,
            FieldDefinition::Computed {
                name: name.to_string(),
                expr,
            },
        )
    }

    fn push_field(&mut self, object: &str, field: FieldDefinition) -> &mut Self {
        self.push(object, PendingField::Declared(field))
    }

    fn push(&mut self, object: &str, field: PendingField) -> &mut Self {
        self.define(object);
        if let Some(pending) = self.objects.get_mut(object) {
            pending.fields.push(field);
        }
        self
    }

    /// Resolve every name, compile computed fields, flatten every link target
    pub fn build(self) -> Result<Registry, RegistryError> {
        if let Some(name) = &self.duplicate_enum {
            return Err(RegistryError::DuplicateEnum(name.clone()));
        }
        for name in self.enums.keys() {
            if let Ok(builtin) = ScalarType::from_str(name) {
                return Err(RegistryError::EnumShadowsBuiltin {
                    name: name.clone(),
                    builtin,
                });
            }
        }

        let by_name: HashMap<String, ObjectId> = self
            .objects
            .keys()
            .enumerate()
            .map(|(i, name)| (name.clone(), ObjectId(i as u32)))
            .collect();

        // Pass 1: properties and links, so computed fields can see every pointer.
        let mut pointers: Vec<IndexMap<String, Field>> = Vec::with_capacity(self.objects.len());
        for (object_name, pending) in &self.objects {
            let mut table = IndexMap::new();
            let mut seen: Vec<&str> = Vec::new();
            for def in &pending.fields {
                if seen.contains(&def.name()) {
                    return Err(RegistryError::DuplicateField {
                        object: object_name.clone(),
                        field: def.name().to_string(),
                    });
                }
                seen.push(def.name());
                let resolved = match def {
                    PendingField::Property(p) => Some(self.check_property(object_name, p)?),
                    PendingField::Declared(def) => self.resolve_pointer_field(object_name, def, &by_name)?,
                };
                if let Some(field) = resolved {
                    table.insert(def.name().to_string(), field);
                }
            }
            pointers.push(table);
        }

        // Pass 2: final field maps in declaration order.
        let mut objects = Vec::with_capacity(self.objects.len());
        for (index, (object_name, pending)) in self.objects.iter().enumerate() {
            let id = ObjectId(index as u32);
            let mut fields = IndexMap::with_capacity(pending.fields.len());
            for def in &pending.fields {
                let field = match def {
                    PendingField::Declared(FieldDefinition::Computed { name, expr }) => {
                        let resolver = BuildPointers {
                            names: &self.objects,
                            by_name: &by_name,
                            pointers: &pointers,
                            context: id,
                        };
                        Field::Computed(compile_computed(object_name, name, expr, &resolver)?)
                    }
                    _ => match pointers[index].get(def.name()) {
                        Some(field) => field.clone(),
                        None => continue,
                    },
                };
                fields.insert(def.name().to_string(), field);
            }
            objects.push(SchemaObject {
                id,
                name: object_name.clone(),
                fields,
            });
        }

        let mut targets = HashMap::new();
        for object in &objects {
            for link in object.links() {
                if targets.contains_key(&link.target) {
                    continue;
                }
                let shape = target::flatten(&link.target, &objects).map_err(|e| {
                    RegistryError::from_target(format!("{}.{}", object.name, link.name), e)
                })?;
                targets.insert(link.target.clone(), shape);
            }
        }

        debug!(
            objects = objects.len(),
            targets = targets.len(),
            enums = self.enums.len(),
            "registry.build.complete"
        );

        Ok(Registry::new(objects, by_name, targets, self.enums, self.options))
    }

    fn resolve_pointer_field(
        &self,
        object_name: &str,
        def: &FieldDefinition,
        by_name: &HashMap<String, ObjectId>,
    ) -> Result<Option<Field>, RegistryError> {
        match def {
            FieldDefinition::Property { name, scalar, cardinality } => {
                let scalar = self.resolve_scalar(object_name, name, scalar)?;
                Ok(Some(Field::Property(Property::new(name, scalar, *cardinality))))
            }
            FieldDefinition::Link { name, target, cardinality } => {
                let mut clauses = Vec::with_capacity(target.len());
                for clause in target {
                    let mut members = Vec::with_capacity(clause.len());
                    for member in clause {
                        let id = by_name.get(member).ok_or_else(|| RegistryError::UndefinedObject {
                            name: member.to_string(),
                            referenced_by: Some(format!("{}.{}", object_name, name)),
                        })?;
                        members.push(*id);
                    }
                    clauses.push(members);
                }
                Ok(Some(Field::Link(Link::new(name, Dnf::new(clauses), *cardinality))))
            }
            FieldDefinition::Computed { .. } => Ok(None),
        }
    }

    /// A typed property is kept as given; enum types must still be declared
    fn check_property(&self, object_name: &str, property: &Property) -> Result<Field, RegistryError> {
        if let ScalarType::Enum(type_name) = &property.scalar {
            if !self.enums.contains_key(type_name) {
                return Err(RegistryError::UnknownScalarType {
                    object: object_name.to_string(),
                    field: property.name.clone(),
                    type_name: type_name.clone(),
                });
            }
        }
        Ok(Field::Property(property.clone()))
    }

    fn resolve_scalar(&self, object: &str, field: &str, type_name: &str) -> Result<ScalarType, RegistryError> {
        if let Ok(scalar) = ScalarType::from_str(type_name) {
            return Ok(scalar);
        }
        if self.enums.contains_key(type_name) {
            return Ok(ScalarType::Enum(type_name.to_string()));
        }
        Err(RegistryError::UnknownScalarType {
            object: object.to_string(),
            field: field.to_string(),
            type_name: type_name.to_string(),
        })
    }
}

fn compile_computed(
    object: &str,
    field: &str,
    expr: &ExprDef,
    resolver: &dyn PointerResolver,
) -> Result<ComputedField, RegistryError> {
    let expr = expr.compile(resolver).map_err(|source| RegistryError::InvalidComputedField {
        object: object.to_string(),
        field: field.to_string(),
        source,
    })?;
    if !expr.is_computable() {
        return Err(RegistryError::ComputedFieldNotComputable {
            object: object.to_string(),
            field: field.to_string(),
        });
    }
    Ok(ComputedField {
        name: field.to_string(),
        expr,
    })
}

/// Resolves pointer paths against the partially built arena.
///
/// Only properties and links are visible; computed fields cannot reference
/// other computed fields.
struct BuildPointers<'a> {
    names: &'a IndexMap<String, PendingObject>,
    by_name: &'a HashMap<String, ObjectId>,
    pointers: &'a [IndexMap<String, Field>],
    context: ObjectId,
}

impl PointerResolver for BuildPointers<'_> {
    fn resolve_pointer(&self, path: &str) -> Result<Expr, ExprError> {
        let unknown = || ExprError::UnknownPointer(path.to_string());
        let (object, field) = match path.split_once('.') {
            Some((object, field)) => (*self.by_name.get(object).ok_or_else(unknown)?, field),
            None => (self.context, path),
        };
        let (object_name, _) = self.names.get_index(object.index()).ok_or_else(unknown)?;
        match self.pointers[object.index()].get(field) {
            Some(Field::Property(p)) => Ok(Expr::Property(PropertyRef {
                object,
                object_name: object_name.clone(),
                property: p.clone(),
            })),
            Some(Field::Link(l)) => Ok(Expr::Link(LinkRef {
                object,
                object_name: object_name.clone(),
                link: l.clone(),
            })),
            _ => Err(unknown()),
        }
    }
}
