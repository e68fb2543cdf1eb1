//! Rule parsing pipeline
//!
//! `tokenize` flattens the rule into a token sequence, `reduce` rewrites it
//! to a fixpoint, and `parse` checks that exactly one boolean-typed node
//! remains and hands it to the caller.

pub mod error;
mod lexer;
mod reduce;
mod subselect;

pub use error::ParseError;
pub use lexer::tokenize;
pub use reduce::reduce;

use crate::ast::{Node, ValueType};
use crate::fields::FieldDescriptors;

/// Parse a rule into a single boolean-typed tree.
///
/// Each call owns its own token sequence; the catalog tables are the only
/// shared state and they are read-only, so concurrent calls need no
/// synchronization.
///
/// # Errors
/// Returns `ParseError` when the rule does not lex, an operator's operands
/// do not match its required shape, or the fixpoint is not a single boolean
/// condition.
pub fn parse(rule: &str, fields: &FieldDescriptors) -> Result<Node, ParseError> {
    let mut tokens = lexer::tokenize(rule, fields)?;
    reduce::reduce(&mut tokens)?;
    match tokens.pop() {
        Some(root) if tokens.is_empty() && root.value_type() == Some(ValueType::Bool) => Ok(root),
        _ => Err(ParseError::UnresolvableRule),
    }
}
