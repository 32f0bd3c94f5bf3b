//! Selection validation
//!
//! Each level of a spec is checked against a field set: the object's own
//! fields at the root, and the fields common to every variant of a link's
//! target below it. Every key of a level is checked; a bad key never stops
//! its siblings from being reported.

use indexmap::IndexMap;
use tracing::{debug, trace};
use crate::expr::{Expr, LinkRef, PropertyRef};
use crate::registry::{ObjectRef, Registry, RegistryId};
use crate::schema::{ComputedField, Dnf, Field, FieldKind, Link, ObjectId, Property};
use crate::selection::{Directive, SelectionSpec};
use crate::target::TargetShape;
use super::error::{IssueKind, ValidationError, ValidationIssue};

/// The field set a validated level was checked against
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpecOwner {
    Object(ObjectId),
    /// Common fields of a link target
    Target(Dnf),
}

/// How an included link is to be expanded
#[derive(Debug, Clone, PartialEq)]
pub enum LinkSelection {
    /// Every property and computed field common to the target's variants
    Default,
    Nested(ValidatedSpec),
}

/// One accepted key of a spec
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedEntry {
    Property(Property),
    Computed(ComputedField),
    Link { link: Link, selection: LinkSelection },
    /// A computable standing in for a field, or added under a new name
    Alias(Expr),
}

impl ValidatedEntry {
    pub fn kind(&self) -> FieldKind {
        match self {
            ValidatedEntry::Property(_) => FieldKind::Property,
            ValidatedEntry::Link { .. } => FieldKind::Link,
            ValidatedEntry::Computed(_) | ValidatedEntry::Alias(_) => FieldKind::Computable,
        }
    }
}

/// A selection spec whose every directive has been decided.
///
/// Entries keep the order of the spec they came from. Excluded keys are kept
/// apart so the execution layer can tell "left out" from "never mentioned".
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSpec {
    registry: RegistryId,
    owner: SpecOwner,
    entries: IndexMap<String, ValidatedEntry>,
    excluded: Vec<String>,
}

impl ValidatedSpec {
    pub fn owner(&self) -> &SpecOwner {
        &self.owner
    }

    /// The registry whose objects this spec was checked against
    pub fn registry(&self) -> RegistryId {
        self.registry
    }

    pub fn get(&self, key: &str) -> Option<&ValidatedEntry> {
        self.entries.get(key)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ValidatedEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Validate a selection spec against an object
pub fn validate(object: ObjectRef<'_>, spec: &SelectionSpec) -> Result<ValidatedSpec, ValidationError> {
    let level = Level {
        registry: object.registry(),
        fields: &object.schema().fields,
        owners: vec![object.id()],
        target: None,
        depth: 1,
    };
    let mut issues = Vec::new();
    let validated = level.validate(SpecOwner::Object(object.id()), spec, "", &mut issues);

    if issues.is_empty() {
        debug!(object = object.name(), entries = validated.len(), "validate.complete");
        Ok(validated)
    } else {
        debug!(object = object.name(), issues = issues.len(), "validate.rejected");
        Err(ValidationError { issues })
    }
}

enum Outcome {
    Entry(ValidatedEntry),
    Excluded,
}

struct Level<'r> {
    registry: &'r Registry,
    fields: &'r IndexMap<String, Field>,
    /// Objects whose pointers name the fields of this level
    owners: Vec<ObjectId>,
    target: Option<&'r TargetShape>,
    depth: usize,
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

impl<'r> Level<'r> {
    fn validate(
        &self,
        owner: SpecOwner,
        spec: &SelectionSpec,
        path: &str,
        issues: &mut Vec<ValidationIssue>,
    ) -> ValidatedSpec {
        let before = issues.len();
        let mut entries = IndexMap::with_capacity(spec.len());
        let mut excluded = Vec::new();

        for (key, directive) in spec.iter() {
            let key_path = join(path, key);
            match self.check(key, directive, &key_path, issues) {
                Ok(Outcome::Entry(entry)) => {
                    entries.insert(key.to_string(), entry);
                }
                Ok(Outcome::Excluded) => excluded.push(key.to_string()),
                Err(kind) => issues.push(ValidationIssue { path: key_path, kind }),
            }
        }

        trace!(
            path,
            depth = self.depth,
            keys = spec.len(),
            issues = issues.len() - before,
            "validate.level"
        );
        ValidatedSpec {
            registry: self.registry.id(),
            owner,
            entries,
            excluded,
        }
    }

    fn check(
        &self,
        key: &str,
        directive: &Directive,
        path: &str,
        issues: &mut Vec<ValidationIssue>,
    ) -> Result<Outcome, IssueKind> {
        let alias = match directive {
            Directive::Override(expr) if expr.is_computable() => Some(expr),
            _ => None,
        };

        let Some(field) = self.fields.get(key) else {
            return match alias {
                Some(expr) => Ok(Outcome::Entry(ValidatedEntry::Alias(expr.clone()))),
                None => Err(self.missing(key)),
            };
        };
        if let Some(expr) = alias {
            return Ok(Outcome::Entry(ValidatedEntry::Alias(expr.clone())));
        }
        if let Directive::Exclude = directive {
            return Ok(Outcome::Excluded);
        }

        let entry = match (field, directive) {
            (Field::Property(p), Directive::Include) => ValidatedEntry::Property(p.clone()),
            (Field::Property(p), Directive::Override(Expr::Property(r))) if self.same_property(r, p) => {
                ValidatedEntry::Property(p.clone())
            }
            (Field::Computed(c), Directive::Include) => ValidatedEntry::Computed(c.clone()),
            (Field::Link(l), Directive::Include) => ValidatedEntry::Link {
                link: l.clone(),
                selection: LinkSelection::Default,
            },
            (Field::Link(l), Directive::Override(Expr::Link(r))) if self.same_link(r, l) => ValidatedEntry::Link {
                link: l.clone(),
                selection: LinkSelection::Default,
            },
            (Field::Link(l), Directive::Nested(nested)) => ValidatedEntry::Link {
                link: l.clone(),
                selection: LinkSelection::Nested(self.nested(l, nested, path, issues)?),
            },
            _ => {
                return Err(IssueKind::InvalidDirective {
                    field: field.kind(),
                    found: directive.describe(),
                })
            }
        };
        Ok(Outcome::Entry(entry))
    }

    fn nested(
        &self,
        link: &Link,
        spec: &SelectionSpec,
        path: &str,
        issues: &mut Vec<ValidationIssue>,
    ) -> Result<ValidatedSpec, IssueKind> {
        let max = self.registry.options().max_selection_depth;
        if self.depth >= max {
            return Err(IssueKind::DepthExceeded { max });
        }
        let target = self.registry.target(link).ok_or(IssueKind::UnknownField)?;

        let mut owners: Vec<ObjectId> = Vec::new();
        for id in target.variants.iter().flat_map(|v| v.members.iter()) {
            if !owners.contains(id) {
                owners.push(*id);
            }
        }
        let level = Level {
            registry: self.registry,
            fields: &target.common,
            owners,
            target: Some(target),
            depth: self.depth + 1,
        };
        Ok(level.validate(SpecOwner::Target(link.target.clone()), spec, path, issues))
    }

    /// Issue for a key outside this level's field set
    fn missing(&self, key: &str) -> IssueKind {
        let Some(target) = self.target else {
            return IssueKind::UnknownField;
        };
        let variants: Vec<String> = target
            .variants_defining(key)
            .map(|v| {
                v.members
                    .iter()
                    .filter_map(|id| self.registry.object_by_id(*id))
                    .map(|o| o.name())
                    .collect::<Vec<_>>()
                    .join(" & ")
            })
            .collect();
        if variants.is_empty() {
            IssueKind::UnknownField
        } else {
            IssueKind::AmbiguousVariantField { variants }
        }
    }

    fn same_property(&self, r: &PropertyRef, p: &Property) -> bool {
        self.owners.contains(&r.object) && r.property == *p
    }

    fn same_link(&self, r: &LinkRef, l: &Link) -> bool {
        self.owners.contains(&r.object) && r.link == *l
    }
}
