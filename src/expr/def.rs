//! Serialized expression form shared by schema files and JSON selection specs

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use super::error::ExprError;
use super::factory;
use super::node::{Expr, Literal};

/// Expression as written in YAML or JSON
///
/// ```yaml
/// op:
///   name: plus
///   args:
///     - prop: age
///     - literal: 1
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExprDef {
    /// Pointer path: `name` (relative to the current object) or `User.name`
    Prop(String),
    Literal(LiteralDef),
    Op(OpDef),
}

/// Operator application
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OpDef {
    pub name: String,
    #[serde(default)]
    pub args: Vec<ExprDef>,
}

/// Literal value; plain YAML/JSON scalars or a typed temporal wrapper
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LiteralDef {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Typed(TypedLiteralDef),
}

/// `{ datetime: "2024-01-01T00:00:00Z" }` or `{ local_date: "2024-01-01" }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypedLiteralDef {
    Datetime(String),
    LocalDate(String),
}

/// Looks up pointer paths while compiling an [`ExprDef`]
pub trait PointerResolver {
    fn resolve_pointer(&self, path: &str) -> Result<Expr, ExprError>;
}

impl ExprDef {
    /// Build the typed expression, checking every operator signature
    pub fn compile(&self, resolver: &dyn PointerResolver) -> Result<Expr, ExprError> {
        match self {
            ExprDef::Prop(path) => resolver.resolve_pointer(path),
            ExprDef::Literal(lit) => Ok(Expr::Literal(lit.to_literal()?)),
            ExprDef::Op(op) => {
                let args = op
                    .args
                    .iter()
                    .map(|a| a.compile(resolver))
                    .collect::<Result<Vec<_>, _>>()?;
                factory::operator(&op.name, args)
            }
        }
    }
}

impl LiteralDef {
    pub fn to_literal(&self) -> Result<Literal, ExprError> {
        Ok(match self {
            LiteralDef::Bool(b) => Literal::Bool(*b),
            LiteralDef::Int(i) => Literal::Int(*i),
            LiteralDef::Float(x) => Literal::Float(*x),
            LiteralDef::Str(s) => Literal::Str(s.clone()),
            LiteralDef::Typed(TypedLiteralDef::Datetime(s)) => {
                let dt = DateTime::parse_from_rfc3339(s).map_err(|_| ExprError::InvalidLiteral {
                    kind: "datetime",
                    input: s.clone(),
                })?;
                Literal::DateTime(dt.with_timezone(&Utc))
            }
            LiteralDef::Typed(TypedLiteralDef::LocalDate(s)) => {
                let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                    ExprError::InvalidLiteral {
                        kind: "local_date",
                        input: s.clone(),
                    }
                })?;
                Literal::LocalDate(d)
            }
        })
    }
}
