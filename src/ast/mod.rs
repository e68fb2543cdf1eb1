//! Data model for parsed rules

mod node;
mod values;

pub use node::{Literal, Node, Operands};
pub use values::{UnknownValueType, ValueType};
