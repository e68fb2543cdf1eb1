//! Value types for rule expressions

use std::fmt;
use std::str::FromStr;

/// The type a node evaluates to.
///
/// Assigned when the node is constructed (from a literal's shape, a field
/// descriptor, or an operator's category) and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum ValueType {
    String,
    Number,
    Date,
    Bool,
}

impl ValueType {
    /// Get canonical name for error messages
    pub fn canonical_name(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Date => "date",
            ValueType::Bool => "bool",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl FromStr for ValueType {
    type Err = UnknownValueType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" | "str" | "char" | "varchar" | "text" => Ok(ValueType::String),
            "number" | "num" | "int" | "integer" | "decimal" | "float" => Ok(ValueType::Number),
            "date" | "datetime" | "timestamp" => Ok(ValueType::Date),
            "bool" | "boolean" => Ok(ValueType::Bool),
            _ => Err(UnknownValueType(s.to_string())),
        }
    }
}

/// A `NAME:TYPE` declaration named a type this parser does not know.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown value type '{0}', expected string, number, date or bool")]
pub struct UnknownValueType(pub String);
