//! Operator table and signature checking

use std::fmt;
use std::str::FromStr;
use crate::schema::ScalarType;
use super::error::ExprError;
use super::node::ExprType;

/// Operators the expression factory can apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Arithmetic
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    // Strings
    Concat,
    Len,
    Lower,
    Upper,
    // Comparison
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    // Logic
    And,
    Or,
    Not,
    // Aggregates
    Count,
    Exists,
    Sum,
    Min,
    Max,
    Avg,
}

impl Operator {
    pub fn arity(&self) -> usize {
        match self {
            Operator::Len
            | Operator::Lower
            | Operator::Upper
            | Operator::Not
            | Operator::Count
            | Operator::Exists
            | Operator::Sum
            | Operator::Min
            | Operator::Max
            | Operator::Avg => 1,
            _ => 2,
        }
    }

    /// Check operand types against this operator's signature and derive the
    /// result type.
    pub fn result_type(&self, args: &[ExprType]) -> Result<ScalarType, ExprError> {
        if args.len() != self.arity() {
            return Err(ExprError::ArityMismatch {
                operator: *self,
                expected: self.arity(),
                found: args.len(),
            });
        }

        match self {
            Operator::Plus | Operator::Minus | Operator::Multiply | Operator::Modulo => {
                self.numeric_pair(args)
            }
            Operator::Divide => {
                let ty = self.numeric_pair(args)?;
                Ok(if ty.is_integer() { ScalarType::Float64 } else { ty })
            }
            Operator::Concat => {
                let l = self.scalar_at(args, 0, "str or bytes", |t| {
                    matches!(t, ScalarType::Str | ScalarType::Bytes)
                })?;
                self.same_as(args, 1, &l)?;
                Ok(l)
            }
            Operator::Len => {
                self.scalar_at(args, 0, "str, bytes or json", ScalarType::has_length)?;
                Ok(ScalarType::Int64)
            }
            Operator::Lower | Operator::Upper => {
                self.scalar_at(args, 0, "str", |t| *t == ScalarType::Str)
            }
            Operator::Eq | Operator::Neq => {
                let l = self.scalar_at(args, 0, "scalar", |_| true)?;
                self.comparable_with(args, &l)?;
                Ok(ScalarType::Bool)
            }
            Operator::Lt | Operator::Lte | Operator::Gt | Operator::Gte => {
                let l = self.scalar_at(args, 0, "orderable scalar", ScalarType::is_orderable)?;
                self.comparable_with(args, &l)?;
                Ok(ScalarType::Bool)
            }
            Operator::And | Operator::Or => {
                self.scalar_at(args, 0, "bool", |t| *t == ScalarType::Bool)?;
                self.scalar_at(args, 1, "bool", |t| *t == ScalarType::Bool)
            }
            Operator::Not => self.scalar_at(args, 0, "bool", |t| *t == ScalarType::Bool),
            Operator::Count => Ok(ScalarType::Int64),
            Operator::Exists => Ok(ScalarType::Bool),
            Operator::Sum => self.scalar_at(args, 0, "numeric", ScalarType::is_numeric),
            Operator::Avg => {
                let t = self.scalar_at(args, 0, "numeric", ScalarType::is_numeric)?;
                Ok(if t == ScalarType::Decimal { t } else { ScalarType::Float64 })
            }
            Operator::Min | Operator::Max => {
                self.scalar_at(args, 0, "orderable scalar", ScalarType::is_orderable)
            }
        }
    }

    fn mismatch(&self, position: usize, expected: impl Into<String>, found: &ExprType) -> ExprError {
        ExprError::OperatorTypeMismatch {
            operator: *self,
            position,
            expected: expected.into(),
            found: found.clone(),
        }
    }

    fn scalar_at(
        &self,
        args: &[ExprType],
        position: usize,
        expected: &str,
        accept: impl Fn(&ScalarType) -> bool,
    ) -> Result<ScalarType, ExprError> {
        match &args[position] {
            ExprType::Scalar(t) if accept(t) => Ok(t.clone()),
            other => Err(self.mismatch(position, expected, other)),
        }
    }

    fn numeric_pair(&self, args: &[ExprType]) -> Result<ScalarType, ExprError> {
        let l = self.scalar_at(args, 0, "numeric", ScalarType::is_numeric)?;
        let r = self.scalar_at(args, 1, "numeric", ScalarType::is_numeric)?;
        l.promote(&r).ok_or_else(|| self.mismatch(1, "numeric", &args[1]))
    }

    fn same_as(&self, args: &[ExprType], position: usize, ty: &ScalarType) -> Result<(), ExprError> {
        match &args[position] {
            ExprType::Scalar(t) if t == ty => Ok(()),
            other => Err(self.mismatch(position, ty.to_string(), other)),
        }
    }

    // Equal types, or two numerics (which promote).
    fn comparable_with(&self, args: &[ExprType], left: &ScalarType) -> Result<(), ExprError> {
        match &args[1] {
            ExprType::Scalar(t) if t == left || left.promote(t).is_some() => Ok(()),
            other => Err(self.mismatch(1, format!("{} or a compatible type", left), other)),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::Plus => "plus",
            Operator::Minus => "minus",
            Operator::Multiply => "multiply",
            Operator::Divide => "divide",
            Operator::Modulo => "modulo",
            Operator::Concat => "concat",
            Operator::Len => "len",
            Operator::Lower => "lower",
            Operator::Upper => "upper",
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Not => "not",
            Operator::Count => "count",
            Operator::Exists => "exists",
            Operator::Sum => "sum",
            Operator::Min => "min",
            Operator::Max => "max",
            Operator::Avg => "avg",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Operator {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plus" | "add" | "+" => Ok(Operator::Plus),
            "minus" | "subtract" | "-" => Ok(Operator::Minus),
            "multiply" | "times" | "*" => Ok(Operator::Multiply),
            "divide" | "/" => Ok(Operator::Divide),
            "modulo" | "mod" | "%" => Ok(Operator::Modulo),
            "concat" | "++" => Ok(Operator::Concat),
            "len" | "length" => Ok(Operator::Len),
            "lower" => Ok(Operator::Lower),
            "upper" => Ok(Operator::Upper),
            "eq" | "=" => Ok(Operator::Eq),
            "neq" | "ne" | "!=" => Ok(Operator::Neq),
            "lt" | "<" => Ok(Operator::Lt),
            "lte" | "<=" => Ok(Operator::Lte),
            "gt" | ">" => Ok(Operator::Gt),
            "gte" | ">=" => Ok(Operator::Gte),
            "and" => Ok(Operator::And),
            "or" => Ok(Operator::Or),
            "not" => Ok(Operator::Not),
            "count" => Ok(Operator::Count),
            "exists" => Ok(Operator::Exists),
            "sum" => Ok(Operator::Sum),
            "min" | "minimum" => Ok(Operator::Min),
            "max" | "maximum" => Ok(Operator::Max),
            "avg" | "average" | "mean" => Ok(Operator::Avg),
            _ => Err(ExprError::UnknownOperator(s.to_string())),
        }
    }
}
