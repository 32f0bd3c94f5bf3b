//! Selection spec types

use indexmap::IndexMap;
use crate::expr::{Expr, LinkRef, PropertyRef};

/// How one key of a selection spec is to be treated
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// `true`: include the field's default value/shape
    Include,
    /// `false`: leave the field out
    Exclude,
    /// A pointer reference or a computable standing in for the field
    Override(Expr),
    /// Narrow a link to a sub-selection
    Nested(SelectionSpec),
}

impl From<bool> for Directive {
    fn from(b: bool) -> Self {
        if b {
            Directive::Include
        } else {
            Directive::Exclude
        }
    }
}

impl From<Expr> for Directive {
    fn from(e: Expr) -> Self {
        Directive::Override(e)
    }
}

impl From<PropertyRef> for Directive {
    fn from(p: PropertyRef) -> Self {
        Directive::Override(Expr::Property(p))
    }
}

impl From<LinkRef> for Directive {
    fn from(l: LinkRef) -> Self {
        Directive::Override(Expr::Link(l))
    }
}

impl From<SelectionSpec> for Directive {
    fn from(s: SelectionSpec) -> Self {
        Directive::Nested(s)
    }
}

impl Directive {
    /// Short description used in error messages
    pub fn describe(&self) -> &'static str {
        match self {
            Directive::Include | Directive::Exclude => "boolean",
            Directive::Override(Expr::Property(_)) => "property reference",
            Directive::Override(Expr::Link(_)) => "link reference",
            Directive::Override(_) => "computable",
            Directive::Nested(_) => "nested selection",
        }
    }
}

/// Caller-supplied mapping from field name to directive.
///
/// Keys keep insertion order; the resolved shape follows it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSpec {
    entries: IndexMap<String, Directive>,
}

impl SelectionSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, directive: impl Into<Directive>) -> Self {
        self.insert(key, directive);
        self
    }

    pub fn include(self, key: impl Into<String>) -> Self {
        self.with(key, Directive::Include)
    }

    pub fn exclude(self, key: impl Into<String>) -> Self {
        self.with(key, Directive::Exclude)
    }

    pub fn nested(self, key: impl Into<String>, spec: SelectionSpec) -> Self {
        self.with(key, Directive::Nested(spec))
    }

    pub fn insert(&mut self, key: impl Into<String>, directive: impl Into<Directive>) -> Option<Directive> {
        self.entries.insert(key.into(), directive.into())
    }

    pub fn get(&self, key: &str) -> Option<&Directive> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Directive)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, D: Into<Directive>> FromIterator<(K, D)> for SelectionSpec {
    fn from_iter<I: IntoIterator<Item = (K, D)>>(iter: I) -> Self {
        let mut spec = SelectionSpec::new();
        for (k, d) in iter {
            spec.insert(k, d);
        }
        spec
    }
}
