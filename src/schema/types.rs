//! Scalar types and cardinalities

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Semantic value types a property (or an expression) can carry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// UTF-8 string
    Str,
    /// Boolean
    Bool,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 32-bit floating point
    Float32,
    /// 64-bit floating point
    Float64,
    /// Arbitrary precision integer
    BigInt,
    /// Arbitrary precision decimal
    Decimal,
    /// UUID
    Uuid,
    /// JSON document
    Json,
    /// Raw bytes
    Bytes,
    /// Timezone-aware timestamp
    DateTime,
    /// Calendar date without a timezone
    LocalDate,
    /// Wall-clock time without a timezone
    LocalTime,
    /// Time span
    Duration,
    /// Enumerated type declared in the schema's `enums` section
    Enum(String),
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarType::Str => write!(f, "str"),
            ScalarType::Bool => write!(f, "bool"),
            ScalarType::Int16 => write!(f, "int16"),
            ScalarType::Int32 => write!(f, "int32"),
            ScalarType::Int64 => write!(f, "int64"),
            ScalarType::Float32 => write!(f, "float32"),
            ScalarType::Float64 => write!(f, "float64"),
            ScalarType::BigInt => write!(f, "bigint"),
            ScalarType::Decimal => write!(f, "decimal"),
            ScalarType::Uuid => write!(f, "uuid"),
            ScalarType::Json => write!(f, "json"),
            ScalarType::Bytes => write!(f, "bytes"),
            ScalarType::DateTime => write!(f, "datetime"),
            ScalarType::LocalDate => write!(f, "local_date"),
            ScalarType::LocalTime => write!(f, "local_time"),
            ScalarType::Duration => write!(f, "duration"),
            ScalarType::Enum(name) => write!(f, "{}", name),
        }
    }
}

/// Error when parsing a built-in scalar type name
#[derive(Debug, Clone, PartialEq)]
pub struct ParseScalarTypeError {
    pub input: String,
}

impl fmt::Display for ParseScalarTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown scalar type '{}'", self.input)
    }
}

impl std::error::Error for ParseScalarTypeError {}

/// Parses built-in scalar names only.
///
/// Enum types depend on the schema's declarations and are resolved by the
/// registry builder, never here.
impl FromStr for ScalarType {
    type Err = ParseScalarTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "str" | "string" | "text" => Ok(ScalarType::Str),
            "bool" | "boolean" => Ok(ScalarType::Bool),
            "int16" | "i16" | "smallint" => Ok(ScalarType::Int16),
            "int32" | "i32" | "int" | "integer" => Ok(ScalarType::Int32),
            "int64" | "i64" | "long" => Ok(ScalarType::Int64),
            "float32" | "f32" | "float" => Ok(ScalarType::Float32),
            "float64" | "f64" | "double" | "number" => Ok(ScalarType::Float64),
            "bigint" => Ok(ScalarType::BigInt),
            "decimal" | "numeric" => Ok(ScalarType::Decimal),
            "uuid" => Ok(ScalarType::Uuid),
            "json" => Ok(ScalarType::Json),
            "bytes" => Ok(ScalarType::Bytes),
            "datetime" | "timestamp" => Ok(ScalarType::DateTime),
            "local_date" | "date" => Ok(ScalarType::LocalDate),
            "local_time" | "time" => Ok(ScalarType::LocalTime),
            "duration" => Ok(ScalarType::Duration),
            _ => Err(ParseScalarTypeError { input: s.to_string() }),
        }
    }
}

impl Serialize for ScalarType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl ScalarType {
    /// Check if this is a numeric type
    pub fn is_numeric(&self) -> bool {
        self.numeric_rank().is_some()
    }

    /// Check if this is an integer type
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ScalarType::Int16 | ScalarType::Int32 | ScalarType::Int64 | ScalarType::BigInt
        )
    }

    /// Check if this is a floating point type
    pub fn is_float(&self) -> bool {
        matches!(self, ScalarType::Float32 | ScalarType::Float64)
    }

    /// Check if this is a temporal type
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            ScalarType::DateTime | ScalarType::LocalDate | ScalarType::LocalTime | ScalarType::Duration
        )
    }

    /// Types with a total order (usable with `lt`, `min`, ...)
    pub fn is_orderable(&self) -> bool {
        self.is_numeric()
            || self.is_temporal()
            || matches!(self, ScalarType::Str | ScalarType::Bool | ScalarType::Enum(_))
    }

    /// Types `len` accepts
    pub fn has_length(&self) -> bool {
        matches!(self, ScalarType::Str | ScalarType::Bytes | ScalarType::Json)
    }

    // Integers widen toward decimal; floats sit on a separate branch.
    fn numeric_rank(&self) -> Option<u8> {
        match self {
            ScalarType::Int16 => Some(0),
            ScalarType::Int32 => Some(1),
            ScalarType::Int64 => Some(2),
            ScalarType::BigInt => Some(3),
            ScalarType::Decimal => Some(4),
            ScalarType::Float32 => Some(5),
            ScalarType::Float64 => Some(6),
            _ => None,
        }
    }

    /// Common type of two numeric operands, or `None` if either is not numeric.
    ///
    /// Any float operand produces `float64` unless both are `float32`.
    pub fn promote(&self, other: &ScalarType) -> Option<ScalarType> {
        let (l, r) = (self.numeric_rank()?, other.numeric_rank()?);
        if self == other {
            return Some(self.clone());
        }
        if self.is_float() || other.is_float() {
            return Some(ScalarType::Float64);
        }
        Some(if l >= r { self.clone() } else { other.clone() })
    }
}

// ============================================================================
// Cardinality
// ============================================================================

/// How many values a pointer may hold and whether absence is legal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// Zero or one value
    AtMostOne,
    /// Exactly one value
    One,
    /// Zero or more values
    Many,
    /// One or more values
    AtLeastOne,
}

impl Default for Cardinality {
    fn default() -> Self {
        Cardinality::One
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::AtMostOne => write!(f, "at_most_one"),
            Cardinality::One => write!(f, "one"),
            Cardinality::Many => write!(f, "many"),
            Cardinality::AtLeastOne => write!(f, "at_least_one"),
        }
    }
}

/// Error when parsing a cardinality string
#[derive(Debug, Clone)]
pub struct ParseCardinalityError {
    pub input: String,
}

impl fmt::Display for ParseCardinalityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown cardinality '{}'. Valid options: at_most_one, one, many, at_least_one",
            self.input
        )
    }
}

impl std::error::Error for ParseCardinalityError {}

impl FromStr for Cardinality {
    type Err = ParseCardinalityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "at_most_one" | "atmostone" | "optional" => Ok(Cardinality::AtMostOne),
            "one" | "required" => Ok(Cardinality::One),
            "many" => Ok(Cardinality::Many),
            "at_least_one" | "atleastone" => Ok(Cardinality::AtLeastOne),
            _ => Err(ParseCardinalityError { input: s.to_string() }),
        }
    }
}

impl<'de> Deserialize<'de> for Cardinality {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Cardinality::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Cardinality {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
