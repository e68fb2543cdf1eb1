//! Reduction engine
//!
//! Four rewriting passes run right to left over the token sequence until a
//! full round changes nothing. Every successful rewrite strictly shrinks the
//! sequence, so the loop terminates. Scanning right to left means a rewrite
//! never shifts an index the pass has yet to visit.

use log::debug;

use crate::ast::{Node, ValueType};
use crate::catalog::{self, OpCategory};
use crate::parser::error::ParseError;

/// Run all passes to a fixpoint.
///
/// A fully reduced sequence (one node) returns immediately without
/// rewriting, so reduction is idempotent.
///
/// # Errors
/// Returns `ParseError` when an operator's surroundings do not match the
/// shape its category demands.
pub fn reduce(tokens: &mut Vec<Node>) -> Result<(), ParseError> {
    let mut round = 0usize;
    loop {
        if tokens.len() <= 1 {
            return Ok(());
        }
        let mut changed = false;
        changed |= bind_values(tokens)?;
        changed |= bind_conditions(tokens)?;
        changed |= drop_dead_brackets(tokens);
        changed |= combine_boolean(tokens);
        round += 1;
        debug!("reduction round {round}: {} tokens left", tokens.len());
        if !changed {
            return Ok(());
        }
    }
}

/// Pass A: bind function calls, arithmetic, modulo and postfix operators
/// into value-typed expressions.
fn bind_values(tokens: &mut Vec<Node>) -> Result<bool, ParseError> {
    let mut changed = false;
    let mut i = tokens.len();
    while i > 0 {
        i -= 1;
        let Node::Op(op) = &tokens[i] else { continue };
        let op = op.clone();
        match catalog::classify(&op) {
            Some(OpCategory::ModuloInfix) => {
                // infix % is the same operation as mod(a, b); keep one spelling
                bind_binary(tokens, i, "mod", ValueType::Number)?;
                i -= 1;
                changed = true;
            }
            Some(OpCategory::Arithmetic) => {
                bind_binary(tokens, i, &op, ValueType::Number)?;
                i -= 1;
                changed = true;
            }
            Some(
                cat @ (OpCategory::DateFunction
                | OpCategory::CharFunction
                | OpCategory::ModuloFunction),
            ) => {
                bind_call2(tokens, i, &op, cat.result_type())?;
                changed = true;
            }
            Some(OpCategory::StringFunction) => {
                bind_call1(tokens, i, &op, ValueType::String)?;
                changed = true;
            }
            Some(OpCategory::BoolPostfix) => {
                bind_postfix(tokens, i, &op)?;
                i -= 1;
                changed = true;
            }
            _ => {}
        }
    }
    Ok(changed)
}

/// Pass B: bind comparisons and `in`/`not in` lists into boolean-typed
/// expressions.
fn bind_conditions(tokens: &mut Vec<Node>) -> Result<bool, ParseError> {
    let mut changed = false;
    let mut i = tokens.len();
    while i > 0 {
        i -= 1;
        let Node::Op(op) = &tokens[i] else { continue };
        let op = op.clone();
        match catalog::classify(&op) {
            Some(OpCategory::Comparison | OpCategory::StringComparison) => {
                bind_binary(tokens, i, &op, ValueType::Bool)?;
                i -= 1;
                changed = true;
            }
            Some(OpCategory::List) => {
                bind_list(tokens, i, &op)?;
                i -= 1;
                changed = true;
            }
            _ => {}
        }
    }
    Ok(changed)
}

/// Pass C: drop empty `()` pairs and brackets wrapping a single value.
fn drop_dead_brackets(tokens: &mut Vec<Node>) -> bool {
    let mut changed = false;
    let mut i = tokens.len();
    while i > 0 {
        i -= 1;
        if !matches!(tokens[i], Node::Open) {
            continue;
        }
        if matches!(tokens.get(i + 1), Some(Node::Close)) {
            tokens.drain(i..=i + 1);
            changed = true;
            continue;
        }
        let singleton = tokens.get(i + 1).is_some_and(Node::is_value)
            && matches!(tokens.get(i + 2), Some(Node::Close));
        if singleton {
            tokens.remove(i + 2);
            let inner = tokens.remove(i + 1);
            tokens[i] = inner;
            changed = true;
        }
    }
    changed
}

/// Pass D: combine exactly one boolean infix operator, preferring deeper
/// bracket nesting, then tighter-binding operators, then the rightmost
/// occurrence. Operators whose neighbors are not yet boolean values are left
/// for later rounds.
fn combine_boolean(tokens: &mut Vec<Node>) -> bool {
    struct Candidate {
        index: usize,
        depth: usize,
        precedence: usize,
    }

    let mut best: Option<Candidate> = None;
    let mut depth = 0usize;
    for i in (0..tokens.len()).rev() {
        match &tokens[i] {
            Node::Close => depth += 1,
            Node::Open => depth = depth.saturating_sub(1),
            Node::Op(op) if catalog::classify(op) == Some(OpCategory::BoolInfix) => {
                let bool_neighbors = i > 0
                    && i + 1 < tokens.len()
                    && tokens[i - 1].value_type() == Some(ValueType::Bool)
                    && tokens[i + 1].value_type() == Some(ValueType::Bool);
                if !bool_neighbors {
                    continue;
                }
                let precedence = catalog::bool_precedence(op);
                let better = best.as_ref().map_or(true, |b| {
                    depth > b.depth || (depth == b.depth && precedence > b.precedence)
                });
                if better {
                    best = Some(Candidate {
                        index: i,
                        depth,
                        precedence,
                    });
                }
            }
            _ => {}
        }
    }

    let Some(c) = best else { return false };
    let Node::Op(op) = tokens[c.index].clone() else {
        return false;
    };
    let rhs = tokens.remove(c.index + 1);
    let lhs = tokens.remove(c.index - 1);
    tokens[c.index - 1] = Node::binary(op, lhs, rhs, ValueType::Bool);
    true
}

// ============================================================================
// Rewrites shared by the passes
// ============================================================================

/// Rewrite `value OP value` at `i` into a two-operand expression.
fn bind_binary(
    tokens: &mut Vec<Node>,
    i: usize,
    op: &str,
    value_type: ValueType,
) -> Result<(), ParseError> {
    let shape_ok =
        i > 0 && i + 1 < tokens.len() && tokens[i - 1].is_value() && tokens[i + 1].is_value();
    if !shape_ok {
        return Err(ParseError::MalformedOperator { op: op.to_string() });
    }
    let rhs = tokens.remove(i + 1);
    let lhs = tokens.remove(i - 1);
    tokens[i - 1] = Node::binary(op, lhs, rhs, value_type);
    Ok(())
}

/// Rewrite `value OP` at `i` into a one-operand boolean expression.
fn bind_postfix(tokens: &mut Vec<Node>, i: usize, op: &str) -> Result<(), ParseError> {
    if i == 0 || !tokens[i - 1].is_value() {
        return Err(ParseError::MalformedOperator { op: op.to_string() });
    }
    let operand = tokens.remove(i - 1);
    tokens[i - 1] = Node::unary(op, operand, ValueType::Bool);
    Ok(())
}

/// Rewrite the exact pattern `OP ( value , value )` at `i` into a
/// two-operand expression. Anything else is a malformed call.
fn bind_call2(
    tokens: &mut Vec<Node>,
    i: usize,
    op: &str,
    value_type: ValueType,
) -> Result<(), ParseError> {
    let shape_ok = i + 5 < tokens.len()
        && matches!(tokens[i + 1], Node::Open)
        && tokens[i + 2].is_value()
        && matches!(tokens[i + 3], Node::Separator)
        && tokens[i + 4].is_value()
        && matches!(tokens[i + 5], Node::Close);
    if !shape_ok {
        return Err(ParseError::MalformedFunction { op: op.to_string() });
    }
    let rhs = tokens.remove(i + 4);
    let lhs = tokens.remove(i + 2);
    tokens.splice(i..=i + 3, [Node::binary(op, lhs, rhs, value_type)]);
    Ok(())
}

/// Rewrite the exact pattern `OP ( value )` at `i` into a one-operand
/// expression.
fn bind_call1(
    tokens: &mut Vec<Node>,
    i: usize,
    op: &str,
    value_type: ValueType,
) -> Result<(), ParseError> {
    let shape_ok = i + 3 < tokens.len()
        && matches!(tokens[i + 1], Node::Open)
        && tokens[i + 2].is_value()
        && matches!(tokens[i + 3], Node::Close);
    if !shape_ok {
        return Err(ParseError::MalformedFunction { op: op.to_string() });
    }
    let operand = tokens.remove(i + 2);
    tokens.splice(i..=i + 2, [Node::unary(op, operand, value_type)]);
    Ok(())
}

/// Rewrite `value IN ( value [, value]* )` at `i` into a list expression.
/// The bracket pair must contain value tokens strictly alternating with
/// separators; an empty pair is an empty list.
fn bind_list(tokens: &mut Vec<Node>, i: usize, op: &str) -> Result<(), ParseError> {
    if i == 0 || !tokens[i - 1].is_value() || !matches!(tokens.get(i + 1), Some(Node::Open)) {
        return Err(ParseError::MalformedOperator { op: op.to_string() });
    }

    let mut j = i + 2;
    let close = if matches!(tokens.get(j), Some(Node::Close)) {
        j
    } else {
        loop {
            match tokens.get(j) {
                Some(n) if is_list_value(n) => j += 1,
                _ => return Err(ParseError::MalformedList { op: op.to_string() }),
            }
            match tokens.get(j) {
                Some(Node::Separator) => j += 1,
                Some(Node::Close) => break j,
                _ => return Err(ParseError::MalformedList { op: op.to_string() }),
            }
        }
    };

    let negated = op == "not in";
    let mut parts: Vec<Node> = tokens.drain(i - 1..=close).collect();
    let subject = parts.remove(0);
    let items: Vec<Node> = parts.into_iter().filter(is_list_value).collect();
    tokens.insert(i - 1, Node::list(subject, negated, items));
    Ok(())
}

/// Values legal inside a list: anything with a type, plus raw sub-selects.
fn is_list_value(node: &Node) -> bool {
    node.is_value() || matches!(node, Node::SubSelect(_))
}
