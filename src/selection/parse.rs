//! Selection specs from JSON
//!
//! ```json
//! {
//!   "name": true,
//!   "age": false,
//!   "friends": { "name": true },
//!   "zzz": { "$expr": { "op": { "name": "len", "args": [ { "prop": "User.name" } ] } } }
//! }
//! ```
//!
//! Bare pointer paths inside `$expr` resolve against the root object.

use serde_json::Value;
use thiserror::Error;
use crate::expr::{ExprDef, ExprError};
use crate::registry::ObjectRef;
use super::spec::{Directive, SelectionSpec};

/// Key marking an object as an expression rather than a nested selection
pub const EXPR_KEY: &str = "$expr";

/// Errors turning JSON into a [`SelectionSpec`]
#[derive(Debug, Error)]
pub enum SpecParseError {
    /// Input is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The spec (or a nested spec) is not a JSON object
    #[error("selection at '{path}' must be an object")]
    NotAnObject { path: String },
    /// A directive is neither a boolean, an object, nor an expression
    #[error("directive at '{path}' must be a boolean, an object or {{\"$expr\": ...}}, found {found}")]
    InvalidDirective { path: String, found: &'static str },
    /// `$expr` mixed with other keys
    #[error("'$expr' at '{path}' must be the only key")]
    MixedExpr { path: String },
    /// `$expr` body does not match the expression grammar
    #[error("malformed expression at '{path}': {source}")]
    MalformedExpr {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// The expression failed to build
    #[error("invalid expression at '{path}': {source}")]
    Expr {
        path: String,
        #[source]
        source: ExprError,
    },
}

impl SelectionSpec {
    /// Parse a JSON selection spec for `root`
    pub fn from_json(value: &Value, root: ObjectRef<'_>) -> Result<Self, SpecParseError> {
        parse_level(value, root, "")
    }

    /// Parse a JSON string selection spec for `root`
    pub fn from_json_str(json: &str, root: ObjectRef<'_>) -> Result<Self, SpecParseError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json(&value, root)
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn parse_level(value: &Value, root: ObjectRef<'_>, path: &str) -> Result<SelectionSpec, SpecParseError> {
    let Value::Object(map) = value else {
        return Err(SpecParseError::NotAnObject { path: path.to_string() });
    };

    let mut spec = SelectionSpec::new();
    for (key, value) in map {
        let key_path = join(path, key);
        let directive = match value {
            Value::Bool(b) => Directive::from(*b),
            Value::Object(inner) if inner.contains_key(EXPR_KEY) => {
                if inner.len() != 1 {
                    return Err(SpecParseError::MixedExpr { path: key_path });
                }
                let def: ExprDef = serde_json::from_value(inner[EXPR_KEY].clone()).map_err(|source| {
                    SpecParseError::MalformedExpr {
                        path: key_path.clone(),
                        source,
                    }
                })?;
                let pointers = root.registry().pointers(Some(root.id()));
                let expr = def.compile(&pointers).map_err(|source| SpecParseError::Expr {
                    path: key_path.clone(),
                    source,
                })?;
                Directive::Override(expr)
            }
            Value::Object(_) => Directive::Nested(parse_level(value, root, &key_path)?),
            other => {
                return Err(SpecParseError::InvalidDirective {
                    path: key_path,
                    found: kind_of(other),
                })
            }
        };
        spec.insert(key.clone(), directive);
    }
    Ok(spec)
}
