//! Expression nodes

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use crate::schema::{Link, ObjectId, Property, ScalarType};
use super::operator::Operator;

/// Constant values an expression can wrap
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(DateTime<Utc>),
    LocalDate(NaiveDate),
}

impl Literal {
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Literal::Str(_) => ScalarType::Str,
            Literal::Int(_) => ScalarType::Int64,
            Literal::Float(_) => ScalarType::Float64,
            Literal::Bool(_) => ScalarType::Bool,
            Literal::DateTime(_) => ScalarType::DateTime,
            Literal::LocalDate(_) => ScalarType::LocalDate,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => write!(f, "{:?}", s),
            Literal::Int(i) => write!(f, "{}", i),
            Literal::Float(x) => write!(f, "{}", x),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::DateTime(dt) => write!(f, "<datetime>{:?}", dt.to_rfc3339()),
            Literal::LocalDate(d) => write!(f, "<local_date>\"{}\"", d),
        }
    }
}

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Literal::Str(v.to_string())
    }
}

impl From<String> for Literal {
    fn from(v: String) -> Self {
        Literal::Str(v)
    }
}

impl From<i64> for Literal {
    fn from(v: i64) -> Self {
        Literal::Int(v)
    }
}

impl From<i32> for Literal {
    fn from(v: i32) -> Self {
        Literal::Int(v as i64)
    }
}

impl From<f64> for Literal {
    fn from(v: f64) -> Self {
        Literal::Float(v)
    }
}

impl From<bool> for Literal {
    fn from(v: bool) -> Self {
        Literal::Bool(v)
    }
}

impl From<DateTime<Utc>> for Literal {
    fn from(v: DateTime<Utc>) -> Self {
        Literal::DateTime(v)
    }
}

impl From<NaiveDate> for Literal {
    fn from(v: NaiveDate) -> Self {
        Literal::LocalDate(v)
    }
}

/// A property reached through its owning object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyRef {
    pub object: ObjectId,
    pub object_name: String,
    pub property: Property,
}

/// A link reached through its owning object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkRef {
    pub object: ObjectId,
    pub object_name: String,
    pub link: Link,
}

/// Static type of an expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExprType {
    Scalar(ScalarType),
    /// Set of objects reached through a link; only aggregates accept it
    Object,
}

impl ExprType {
    pub fn as_scalar(&self) -> Option<&ScalarType> {
        match self {
            ExprType::Scalar(s) => Some(s),
            ExprType::Object => None,
        }
    }
}

impl fmt::Display for ExprType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprType::Scalar(s) => write!(f, "{}", s),
            ExprType::Object => write!(f, "object"),
        }
    }
}

/// A value-producing expression.
///
/// `Property` and `Link` are bare pointer references; every other variant is a
/// computable. Nothing here is ever evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Property(PropertyRef),
    Link(LinkRef),
    /// Operator application; `ty` is fixed when the node is built
    Apply {
        op: Operator,
        args: Vec<Expr>,
        ty: ScalarType,
    },
}

impl Expr {
    pub fn ty(&self) -> ExprType {
        match self {
            Expr::Literal(l) => ExprType::Scalar(l.scalar_type()),
            Expr::Property(p) => ExprType::Scalar(p.property.scalar.clone()),
            Expr::Link(_) => ExprType::Object,
            Expr::Apply { ty, .. } => ExprType::Scalar(ty.clone()),
        }
    }

    /// Literal or operator application, as opposed to a bare pointer
    pub fn is_computable(&self) -> bool {
        matches!(self, Expr::Literal(_) | Expr::Apply { .. })
    }

    /// Result type of a computable; `None` for bare pointers
    pub fn result_type(&self) -> Option<ScalarType> {
        match self {
            Expr::Literal(l) => Some(l.scalar_type()),
            Expr::Apply { ty, .. } => Some(ty.clone()),
            Expr::Property(_) | Expr::Link(_) => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(l) => write!(f, "{}", l),
            Expr::Property(p) => write!(f, "{}.{}", p.object_name, p.property.name),
            Expr::Link(l) => write!(f, "{}.{}", l.object_name, l.link.name),
            Expr::Apply { op, args, .. } => {
                write!(f, "{}(", op)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<Literal> for Expr {
    fn from(l: Literal) -> Self {
        Expr::Literal(l)
    }
}

impl From<PropertyRef> for Expr {
    fn from(p: PropertyRef) -> Self {
        Expr::Property(p)
    }
}

impl From<LinkRef> for Expr {
    fn from(l: LinkRef) -> Self {
        Expr::Link(l)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Cardinality;

    fn name_ref() -> PropertyRef {
        PropertyRef {
            object: ObjectId(0),
            object_name: "User".into(),
            property: Property::new("name", ScalarType::Str, Cardinality::One),
        }
    }

    #[test]
    fn test_literal_types() {
        assert_eq!(Literal::from(42).scalar_type(), ScalarType::Int64);
        assert_eq!(Literal::from(1.5).scalar_type(), ScalarType::Float64);
        assert_eq!(Literal::from("x").scalar_type(), ScalarType::Str);
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(Literal::from(d).scalar_type(), ScalarType::LocalDate);
    }

    #[test]
    fn test_pointer_is_not_computable() {
        let e = Expr::from(name_ref());
        assert!(!e.is_computable());
        assert_eq!(e.result_type(), None);
        assert_eq!(e.ty(), ExprType::Scalar(ScalarType::Str));
        assert!(Expr::from(Literal::from(true)).is_computable());
    }

    #[test]
    fn test_display() {
        let e = Expr::Apply {
            op: Operator::Len,
            args: vec![Expr::from(name_ref())],
            ty: ScalarType::Int64,
        };
        assert_eq!(e.to_string(), "len(User.name)");
        assert_eq!(Expr::from(Literal::from("a")).to_string(), "\"a\"");
    }
}
