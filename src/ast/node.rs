//! Rule tree nodes
//!
//! [`Node`] is both an element of the lexer's token sequence and the finished
//! expression tree: reduction rewrites runs of tokens into `Expr` and `List`
//! nodes until a single boolean-typed node remains.

use std::fmt;

use crate::ast::ValueType;

/// A literal value appearing in a rule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Literal {
    Str(String),
    Num(f64),
}

/// Operands of a reduced expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Operands {
    One(Box<Node>),
    Two(Box<Node>, Box<Node>),
}

/// An element of the token sequence.
///
/// `Op`, `Open`, `Close` and `Separator` exist only between lexing and
/// reduction; they never appear in a finished tree. `SubSelect` survives only
/// as a `List` item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Node {
    Literal(Literal),
    Field {
        name: String,
        value_type: ValueType,
    },
    /// Unreduced operator token, canonical lowercase spelling.
    Op(String),
    Open,
    Close,
    Separator,
    /// Opaque sub-select text captured between balanced brackets.
    SubSelect(String),
    Expr {
        op: String,
        operands: Operands,
        value_type: ValueType,
    },
    List {
        subject: Box<Node>,
        negated: bool,
        items: Vec<Node>,
    },
}

impl Node {
    pub fn string(s: impl Into<String>) -> Self {
        Node::Literal(Literal::Str(s.into()))
    }

    pub fn number(n: f64) -> Self {
        Node::Literal(Literal::Num(n))
    }

    pub fn field(name: impl Into<String>, value_type: ValueType) -> Self {
        Node::Field {
            name: name.into(),
            value_type,
        }
    }

    pub fn unary(op: impl Into<String>, operand: Node, value_type: ValueType) -> Self {
        Node::Expr {
            op: op.into(),
            operands: Operands::One(Box::new(operand)),
            value_type,
        }
    }

    pub fn binary(op: impl Into<String>, lhs: Node, rhs: Node, value_type: ValueType) -> Self {
        Node::Expr {
            op: op.into(),
            operands: Operands::Two(Box::new(lhs), Box::new(rhs)),
            value_type,
        }
    }

    pub fn list(subject: Node, negated: bool, items: Vec<Node>) -> Self {
        Node::List {
            subject: Box::new(subject),
            negated,
            items,
        }
    }

    /// The type this node evaluates to, or `None` for structural tokens.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Node::Literal(Literal::Str(_)) => Some(ValueType::String),
            Node::Literal(Literal::Num(_)) => Some(ValueType::Number),
            Node::Field { value_type, .. } | Node::Expr { value_type, .. } => Some(*value_type),
            Node::List { .. } => Some(ValueType::Bool),
            Node::Op(_) | Node::Open | Node::Close | Node::Separator | Node::SubSelect(_) => None,
        }
    }

    /// Whether this node can stand where an operand is required.
    pub fn is_value(&self) -> bool {
        self.value_type().is_some()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::to_sql(self, &crate::render::Oracle))
    }
}
