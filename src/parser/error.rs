use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Everything that can go wrong while parsing a rule, using miette for
/// diagnostics.
///
/// Lexer errors carry the rule source and a span so the offending position
/// renders underlined; reduction errors are raised after positions have been
/// erased from the token sequence and stay span-less.
#[derive(Debug, Clone, Diagnostic, Error)]
pub enum ParseError {
    #[error("too many closing brackets")]
    #[diagnostic(
        code(rowsift::parse::extra_closing_bracket),
        help("remove the ')' or add a matching '('")
    )]
    ExtraClosingBracket {
        #[source_code]
        src: String,
        #[label("this bracket closes nothing")]
        span: SourceSpan,
    },

    #[error("too many opening brackets")]
    #[diagnostic(code(rowsift::parse::unclosed_bracket), help("add a matching ')'"))]
    UnclosedBracket {
        #[source_code]
        src: String,
        #[label("this bracket is never closed")]
        span: SourceSpan,
    },

    #[error("invalid data at position {pos}")]
    #[diagnostic(
        code(rowsift::parse::unrecognized_token),
        help("expected a literal, a declared field name, or an operator")
    )]
    UnrecognizedToken {
        pos: usize,
        #[source_code]
        src: String,
        #[label("cannot make sense of this")]
        span: SourceSpan,
    },

    #[error("operator '{op}' is missing an operand")]
    #[diagnostic(code(rowsift::parse::malformed_operator))]
    MalformedOperator { op: String },

    #[error("invalid definition for function '{op}'")]
    #[diagnostic(
        code(rowsift::parse::malformed_function),
        help("function arguments are comma-separated values inside brackets")
    )]
    MalformedFunction { op: String },

    #[error("invalid list definition for operator '{op}'")]
    #[diagnostic(
        code(rowsift::parse::malformed_list),
        help("lists look like: status in ('a', 'b', 'c')")
    )]
    MalformedList { op: String },

    #[error("rule cannot be evaluated")]
    #[diagnostic(
        code(rowsift::parse::unresolvable),
        help("the rule must reduce to a single boolean condition")
    )]
    UnresolvableRule,
}

impl ParseError {
    pub(crate) fn extra_closing_bracket(src: &str, pos: usize) -> Self {
        ParseError::ExtraClosingBracket {
            src: src.to_string(),
            span: point_span(src, pos),
        }
    }

    pub(crate) fn unclosed_bracket(src: &str, pos: usize) -> Self {
        ParseError::UnclosedBracket {
            src: src.to_string(),
            span: point_span(src, pos),
        }
    }

    pub(crate) fn unrecognized(src: &str, pos: usize) -> Self {
        ParseError::UnrecognizedToken {
            pos,
            src: src.to_string(),
            span: point_span(src, pos),
        }
    }
}

/// Span of the character at `pos`, kept non-zero-width where possible so
/// miette renders an arrow even at end of input.
fn point_span(src: &str, pos: usize) -> SourceSpan {
    if let Some(c) = src.get(pos..).and_then(|rest| rest.chars().next()) {
        (pos, c.len_utf8()).into()
    } else if let Some((i, c)) = src.char_indices().last() {
        (i, c.len_utf8()).into()
    } else {
        (0, 0).into()
    }
}
