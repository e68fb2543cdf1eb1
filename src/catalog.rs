//! Operator catalog
//!
//! Static classification tables mapping operator and function spellings to
//! categories. The tables are baked into the binary and shared read-only by
//! every parse call.

use crate::ast::ValueType;

// ============================================================================
// Categories
// ============================================================================

/// Operator categories. Each category fixes the arity/shape an operator
/// demands during reduction and the type of the expression it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCategory {
    /// `=`, `<>`, `!=`, `>`, `<`, `>=`, `<=`
    Comparison,
    /// `like`
    StringComparison,
    /// `+`, `-`, `*`, `/`
    Arithmetic,
    /// `%`, canonicalised to `mod` when bound
    ModuloInfix,
    /// `mod(a, b)`
    ModuloFunction,
    /// `to_date(text, format)`
    DateFunction,
    /// `to_char(date, format)`
    CharFunction,
    /// `upper`, `lower`, `trim`
    StringFunction,
    /// `is null`, `is not null`
    BoolPostfix,
    /// `and`, `or`
    BoolInfix,
    /// `in`, `not in`
    List,
}

impl OpCategory {
    /// The type an expression built from this category evaluates to.
    pub fn result_type(self) -> ValueType {
        match self {
            OpCategory::Comparison
            | OpCategory::StringComparison
            | OpCategory::BoolPostfix
            | OpCategory::BoolInfix
            | OpCategory::List => ValueType::Bool,
            OpCategory::Arithmetic | OpCategory::ModuloInfix | OpCategory::ModuloFunction => {
                ValueType::Number
            }
            OpCategory::DateFunction => ValueType::Date,
            OpCategory::CharFunction | OpCategory::StringFunction => ValueType::String,
        }
    }
}

// ============================================================================
// Tables
// ============================================================================

/// Every spelling the lexer may match; longest match wins.
///
/// Multi-word spellings match with exactly one interior space: the lexer
/// compares catalog text literally against the input, it does not
/// re-tokenize words.
pub const SPELLINGS: &[&str] = &[
    "=",
    "<>",
    "!=",
    ">=",
    "<=",
    ">",
    "<",
    "like",
    "+",
    "-",
    "*",
    "/",
    "%",
    "mod",
    "to_date",
    "to_char",
    "upper",
    "lower",
    "trim",
    "is not null",
    "is null",
    "not in",
    "in",
    "and",
    "or",
];

/// Field names that resolve without a descriptor, as the current timestamp.
pub const CURRENT_TIME_FIELDS: &[&str] = &["sysdate", "now", "current_timestamp"];

/// Boolean infix operators ordered loosest-binding first; later entries are
/// combined earlier at equal bracket depth.
pub const BOOL_INFIX: &[&str] = &["or", "and"];

/// Classify a canonical (lowercase) spelling.
pub fn classify(op: &str) -> Option<OpCategory> {
    match op {
        "=" | "<>" | "!=" | ">" | "<" | ">=" | "<=" => Some(OpCategory::Comparison),
        "like" => Some(OpCategory::StringComparison),
        "+" | "-" | "*" | "/" => Some(OpCategory::Arithmetic),
        "%" => Some(OpCategory::ModuloInfix),
        "mod" => Some(OpCategory::ModuloFunction),
        "to_date" => Some(OpCategory::DateFunction),
        "to_char" => Some(OpCategory::CharFunction),
        "upper" | "lower" | "trim" => Some(OpCategory::StringFunction),
        "is null" | "is not null" => Some(OpCategory::BoolPostfix),
        "and" | "or" => Some(OpCategory::BoolInfix),
        "in" | "not in" => Some(OpCategory::List),
        _ => None,
    }
}

/// Position of a boolean infix operator in the combination order; higher
/// binds tighter.
pub fn bool_precedence(op: &str) -> usize {
    BOOL_INFIX.iter().position(|s| *s == op).unwrap_or(0)
}
