//! Dialect rendering
//!
//! Walks a finished tree read-only and prints it in a concrete SQL dialect.
//! The Oracle form round-trips: parsing it again with the same descriptors
//! yields a structurally equal tree.

mod mysql;
mod oracle;

pub use mysql::MySql;
pub use oracle::Oracle;

use itertools::Itertools;

use crate::ast::{Literal, Node, Operands};
use crate::catalog::{self, OpCategory};

/// Dialect-specific spellings. Everything else is shared by [`to_sql`].
pub trait Dialect {
    /// Name of the dialect.
    fn name(&self) -> &'static str;

    /// Spelling of the 2-argument string-to-date conversion.
    fn date_fn(&self) -> &'static str {
        "to_date"
    }

    /// Spelling of the 2-argument date-to-string conversion.
    fn char_fn(&self) -> &'static str {
        "to_char"
    }

    /// Render a modulo expression.
    fn modulo(&self, lhs: &str, rhs: &str) -> String {
        format!("mod({lhs}, {rhs})")
    }
}

/// Render a node in the given dialect.
pub fn to_sql(node: &Node, dialect: &dyn Dialect) -> String {
    match node {
        Node::Literal(Literal::Str(s)) => format!("'{}'", s.replace('\'', "''")),
        Node::Literal(Literal::Num(n)) => render_number(*n),
        Node::Field { name, .. } => name.clone(),
        Node::Op(op) => op.clone(),
        Node::Open => "(".to_string(),
        Node::Close => ")".to_string(),
        Node::Separator => ",".to_string(),
        Node::SubSelect(text) => text.clone(),
        Node::Expr { op, operands, .. } => render_expr(op, operands, dialect),
        Node::List {
            subject,
            negated,
            items,
        } => {
            let body = items.iter().map(|item| to_sql(item, dialect)).join(", ");
            let op = if *negated { "not in" } else { "in" };
            format!("{} {} ({})", to_sql(subject, dialect), op, body)
        }
    }
}

fn render_expr(op: &str, operands: &Operands, dialect: &dyn Dialect) -> String {
    match (catalog::classify(op), operands) {
        (Some(OpCategory::BoolInfix), Operands::Two(lhs, rhs)) => {
            format!(
                "{} {} {}",
                bool_operand(lhs, dialect),
                op,
                bool_operand(rhs, dialect)
            )
        }
        (Some(OpCategory::BoolPostfix), Operands::One(operand)) => {
            format!("{} {}", to_sql(operand, dialect), op)
        }
        (Some(OpCategory::ModuloFunction), Operands::Two(lhs, rhs)) => {
            dialect.modulo(&to_sql(lhs, dialect), &to_sql(rhs, dialect))
        }
        (Some(OpCategory::DateFunction), Operands::Two(lhs, rhs)) => {
            format!(
                "{}({}, {})",
                dialect.date_fn(),
                to_sql(lhs, dialect),
                to_sql(rhs, dialect)
            )
        }
        (Some(OpCategory::CharFunction), Operands::Two(lhs, rhs)) => {
            format!(
                "{}({}, {})",
                dialect.char_fn(),
                to_sql(lhs, dialect),
                to_sql(rhs, dialect)
            )
        }
        (Some(OpCategory::StringFunction), Operands::One(operand)) => {
            format!("{}({})", op, to_sql(operand, dialect))
        }
        // comparisons, like, arithmetic
        (_, Operands::Two(lhs, rhs)) => {
            format!("{} {} {}", to_sql(lhs, dialect), op, to_sql(rhs, dialect))
        }
        (_, Operands::One(operand)) => format!("{} {}", to_sql(operand, dialect), op),
    }
}

/// Parenthesise nested boolean infix operands so the tree shape survives
/// re-parsing.
fn bool_operand(node: &Node, dialect: &dyn Dialect) -> String {
    let rendered = to_sql(node, dialect);
    match node {
        Node::Expr { op, .. } if catalog::classify(op) == Some(OpCategory::BoolInfix) => {
            format!("({rendered})")
        }
        _ => rendered,
    }
}

fn render_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
