//! Types for resolved shapes

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use crate::schema::{Cardinality, ScalarType};

/// Declared type of one field of a resolved shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    Scalar(ScalarType),
    /// Value may be absent
    Optional(Box<ShapeType>),
    /// Zero or more values
    Array(Box<ShapeType>),
    Object(ResolvedShape),
}

impl ShapeType {
    /// Wrap a single-value type according to a cardinality.
    ///
    /// `at_least_one` is only a collection for links; a property declared
    /// `at_least_one` still yields one required value.
    pub(crate) fn with_cardinality(self, cardinality: Cardinality, at_least_one_is_array: bool) -> Self {
        match cardinality {
            Cardinality::One => self,
            Cardinality::AtMostOne => ShapeType::Optional(Box::new(self)),
            Cardinality::Many => ShapeType::Array(Box::new(self)),
            Cardinality::AtLeastOne if at_least_one_is_array => ShapeType::Array(Box::new(self)),
            Cardinality::AtLeastOne => self,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, ShapeType::Optional(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ShapeType::Array(_))
    }

    /// The type inside any `Optional`/`Array` wrapper
    pub fn innermost(&self) -> &ShapeType {
        match self {
            ShapeType::Optional(inner) | ShapeType::Array(inner) => inner.innermost(),
            other => other,
        }
    }

    /// The nested shape of a link, looking through wrappers
    pub fn as_object(&self) -> Option<&ResolvedShape> {
        match self.innermost() {
            ShapeType::Object(shape) => Some(shape),
            _ => None,
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeType::Scalar(s) => write!(f, "{}", s),
            ShapeType::Optional(inner) => write!(f, "Optional<{}>", inner),
            ShapeType::Array(inner) => write!(f, "Array<{}>", inner),
            ShapeType::Object(shape) => write!(f, "{}", shape),
        }
    }
}

/// Field name to declared type, in selection order.
///
/// Renders as `{name: str, friends: Array<{name: str}>}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedShape {
    fields: IndexMap<String, ShapeType>,
}

impl ResolvedShape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, ty: ShapeType) -> Option<ShapeType> {
        self.fields.insert(name.into(), ty)
    }

    pub fn get(&self, name: &str) -> Option<&ShapeType> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ShapeType)> {
        self.fields.iter().map(|(k, t)| (k.as_str(), t))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ShapeType)> for ResolvedShape {
    fn from_iter<I: IntoIterator<Item = (K, ShapeType)>>(iter: I) -> Self {
        let mut shape = ResolvedShape::new();
        for (k, t) in iter {
            shape.insert(k, t);
        }
        shape
    }
}

impl fmt::Display for ResolvedShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, ty)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, ty)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let inner: ResolvedShape = vec![("name", ShapeType::Scalar(ScalarType::Str))].into_iter().collect();
        let shape: ResolvedShape = vec![
            ("name", ShapeType::Scalar(ScalarType::Str)),
            ("nickname", ShapeType::Optional(Box::new(ShapeType::Scalar(ScalarType::Str)))),
            ("friends", ShapeType::Array(Box::new(ShapeType::Object(inner)))),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            shape.to_string(),
            "{name: str, nickname: Optional<str>, friends: Array<{name: str}>}"
        );
        assert_eq!(ResolvedShape::new().to_string(), "{}");
    }

    #[test]
    fn test_cardinality_wrapping() {
        let str_ty = || ShapeType::Scalar(ScalarType::Str);
        assert_eq!(str_ty().with_cardinality(Cardinality::One, false), str_ty());
        assert!(str_ty().with_cardinality(Cardinality::AtMostOne, false).is_optional());
        assert!(str_ty().with_cardinality(Cardinality::Many, false).is_array());
        assert_eq!(str_ty().with_cardinality(Cardinality::AtLeastOne, false), str_ty());
        assert!(str_ty().with_cardinality(Cardinality::AtLeastOne, true).is_array());
    }

    #[test]
    fn test_serialize() {
        let shape: ResolvedShape = vec![
            ("name", ShapeType::Scalar(ScalarType::Str)),
            ("tags", ShapeType::Array(Box::new(ShapeType::Scalar(ScalarType::Str)))),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": { "scalar": "str" },
                "tags": { "array": { "scalar": "str" } }
            })
        );
    }

    #[test]
    fn test_as_object_looks_through_wrappers() {
        let inner: ResolvedShape = vec![("name", ShapeType::Scalar(ScalarType::Str))].into_iter().collect();
        let ty = ShapeType::Optional(Box::new(ShapeType::Object(inner.clone())));
        assert_eq!(ty.as_object(), Some(&inner));
        assert_eq!(ShapeType::Scalar(ScalarType::Bool).as_object(), None);
    }
}
