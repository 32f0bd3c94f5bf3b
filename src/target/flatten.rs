//! DNF flattening
//!
//! A link target is an ordered list of clauses; each clause is an ordered list
//! of objects. Flattening produces one [`Variant`] per clause:
//! - a single-member clause is that object's field set
//! - a multi-member clause keeps only fields every member defines, and
//!   rejects members that define the same field incompatibly
//!
//! The generically selectable fields of the link are those shared (and
//! compatible) across every variant.

use indexmap::IndexMap;
use crate::schema::{Dnf, Field, ObjectId, SchemaObject};
use super::error::TargetError;

/// One possible resolved shape of a link
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    /// Clause members in declaration order, duplicates removed
    pub members: Vec<ObjectId>,
    pub fields: IndexMap<String, Field>,
}

impl Variant {
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

/// Flattened view of a link target
#[derive(Debug, Clone, PartialEq)]
pub struct TargetShape {
    pub variants: Vec<Variant>,
    /// Fields present and compatible in every variant, in first-variant order
    pub common: IndexMap<String, Field>,
}

impl TargetShape {
    pub fn is_polymorphic(&self) -> bool {
        self.variants.len() > 1
    }

    /// Variants that define a field by this name
    pub fn variants_defining<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Variant> + 'a {
        self.variants.iter().filter(move |v| v.has_field(name))
    }
}

/// Flatten a target DNF against an object arena indexed by [`ObjectId`]
pub fn flatten(dnf: &Dnf, objects: &[SchemaObject]) -> Result<TargetShape, TargetError> {
    if dnf.is_empty() {
        return Err(TargetError::EmptyTarget);
    }

    let mut variants: Vec<Variant> = Vec::with_capacity(dnf.clauses().len());
    for (index, clause) in dnf.clauses().iter().enumerate() {
        let variant = flatten_clause(index, clause, objects)?;
        if !variants.iter().any(|v| v.members == variant.members) {
            variants.push(variant);
        }
    }

    let common = common_fields(&variants);
    Ok(TargetShape { variants, common })
}

fn lookup(id: ObjectId, objects: &[SchemaObject]) -> Result<&SchemaObject, TargetError> {
    objects.get(id.index()).ok_or(TargetError::UnknownObject(id))
}

fn flatten_clause(
    index: usize,
    clause: &[ObjectId],
    objects: &[SchemaObject],
) -> Result<Variant, TargetError> {
    let mut members: Vec<ObjectId> = Vec::with_capacity(clause.len());
    for id in clause {
        if !members.contains(id) {
            members.push(*id);
        }
    }
    let Some(first) = members.first() else {
        return Err(TargetError::EmptyClause { clause: index });
    };

    if members.len() == 1 {
        let object = lookup(*first, objects)?;
        return Ok(Variant {
            members,
            fields: object.fields.clone(),
        });
    }

    let resolved = members
        .iter()
        .map(|id| lookup(*id, objects))
        .collect::<Result<Vec<_>, _>>()?;

    // Conflicts are checked over every member pair that shares a name, even
    // when the name is missing elsewhere and drops out of the intersection.
    let mut seen: IndexMap<&str, (&SchemaObject, &Field)> = IndexMap::new();
    for object in &resolved {
        for (name, field) in &object.fields {
            if let Some((owner, existing)) = seen.get(name.as_str()) {
                if !existing.is_compatible(field) {
                    return Err(TargetError::Conflict {
                        clause: index,
                        field: name.clone(),
                        first: owner.name.clone(),
                        second: object.name.clone(),
                    });
                }
                continue;
            }
            seen.insert(name.as_str(), (*object, field));
        }
    }

    let fields = resolved[0]
        .fields
        .iter()
        .filter(|(name, _)| resolved[1..].iter().all(|o| o.fields.contains_key(name.as_str())))
        .map(|(name, field)| (name.clone(), field.clone()))
        .collect();

    Ok(Variant { members, fields })
}

fn common_fields(variants: &[Variant]) -> IndexMap<String, Field> {
    let Some((first, rest)) = variants.split_first() else {
        return IndexMap::new();
    };
    first
        .fields
        .iter()
        .filter(|(name, field)| {
            rest.iter().all(|v| {
                v.fields
                    .get(name.as_str())
                    .map_or(false, |other| field.is_compatible(other))
            })
        })
        .map(|(name, field)| (name.clone(), field.clone()))
        .collect()
}
