//! Hand-written lexer
//!
//! Turns the raw rule string plus field descriptors into a flat token
//! sequence. Operator and field matching is case-insensitive and
//! longest-match; extracted text keeps the case it was written in. Every
//! input character lands in exactly one token, whitespace excepted.

use log::trace;

use crate::ast::{Node, ValueType};
use crate::catalog::{self, OpCategory};
use crate::fields::FieldDescriptors;
use crate::parser::error::ParseError;
use crate::parser::subselect;

/// Lex a rule into its token sequence.
///
/// # Errors
/// Returns `ParseError` for bracket imbalance or input no literal, operator,
/// field name or sub-select pattern accounts for.
pub fn tokenize(input: &str, fields: &FieldDescriptors) -> Result<Vec<Node>, ParseError> {
    Lexer {
        input,
        fields,
        pos: 0,
        tokens: Vec::new(),
        open_brackets: Vec::new(),
    }
    .run()
}

struct Lexer<'a> {
    input: &'a str,
    fields: &'a FieldDescriptors,
    pos: usize,
    tokens: Vec<Node>,
    /// byte positions of not-yet-closed opening brackets
    open_brackets: Vec<usize>,
}

enum WordMatch {
    Op(&'static str),
    Field(ValueType),
}

impl Lexer<'_> {
    fn run(mut self) -> Result<Vec<Node>, ParseError> {
        while let Some(c) = self.peek() {
            match c {
                c if c.is_whitespace() => self.pos += c.len_utf8(),
                ',' => {
                    self.tokens.push(Node::Separator);
                    self.pos += 1;
                }
                '(' => {
                    self.open_brackets.push(self.pos);
                    self.tokens.push(Node::Open);
                    self.pos += 1;
                }
                ')' => {
                    if self.open_brackets.pop().is_none() {
                        return Err(ParseError::extra_closing_bracket(self.input, self.pos));
                    }
                    self.tokens.push(Node::Close);
                    self.pos += 1;
                }
                '\'' => match self.scan_string() {
                    Some((text, consumed)) => {
                        self.tokens.push(Node::string(text));
                        self.pos += consumed;
                    }
                    // no closing quote; the position falls through to the
                    // sub-select/invalid-data handling like any other
                    // unmatched input
                    None => self.no_match()?,
                },
                c if c.is_ascii_digit() || (c == '.' && self.second_is_digit()) => {
                    self.scan_number()?;
                }
                _ => self.scan_word()?,
            }
        }
        if let Some(&pos) = self.open_brackets.first() {
            return Err(ParseError::unclosed_bracket(self.input, pos));
        }
        trace!(
            "lexed {} tokens from {} bytes",
            self.tokens.len(),
            self.input.len()
        );
        Ok(self.tokens)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn second_is_digit(&self) -> bool {
        self.input
            .as_bytes()
            .get(self.pos + 1)
            .is_some_and(u8::is_ascii_digit)
    }

    /// Scan a quoted string whose opening quote sits at `self.pos`. Returns
    /// the unescaped content and the bytes consumed, or `None` when no
    /// closing quote exists.
    ///
    /// `''` inside a string is a literal quote. A degenerate three-quote run
    /// with no content (`'''` not followed by a fourth quote) reads as the
    /// empty string; with a fourth quote it is an escaped quote at string
    /// start instead.
    fn scan_string(&self) -> Option<(String, usize)> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        if bytes.get(start + 1) == Some(&b'\'')
            && bytes.get(start + 2) == Some(&b'\'')
            && bytes.get(start + 3) != Some(&b'\'')
        {
            return Some((String::new(), 3));
        }
        let mut out = String::new();
        let mut i = start + 1;
        while i < bytes.len() {
            if bytes[i] == b'\'' {
                if bytes.get(i + 1) == Some(&b'\'') {
                    out.push('\'');
                    i += 2;
                } else {
                    return Some((out, i + 1 - start));
                }
            } else {
                let c = self.input[i..].chars().next()?;
                out.push(c);
                i += c.len_utf8();
            }
        }
        None
    }

    /// Scan a run of digits with at most one `.`; a leading `.` is accepted.
    fn scan_number(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let bytes = self.input.as_bytes();
        let mut seen_dot = false;
        while let Some(&b) = bytes.get(self.pos) {
            match b {
                b'0'..=b'9' => self.pos += 1,
                b'.' if !seen_dot => {
                    seen_dot = true;
                    self.pos += 1;
                }
                _ => break,
            }
        }
        match self.input[start..self.pos].parse::<f64>() {
            Ok(n) => {
                self.tokens.push(Node::number(n));
                Ok(())
            }
            Err(_) => Err(ParseError::unrecognized(self.input, start)),
        }
    }

    /// Longest case-insensitive match among operator spellings and field
    /// names. At equal length the operator spelling takes the token.
    fn scan_word(&mut self) -> Result<(), ParseError> {
        let rest = &self.input.as_bytes()[self.pos..];
        let mut best: Option<(usize, WordMatch)> = None;

        for &spelling in catalog::SPELLINGS {
            if best.as_ref().map_or(true, |(len, _)| spelling.len() > *len)
                && starts_with_ignore_case(rest, spelling)
            {
                best = Some((spelling.len(), WordMatch::Op(spelling)));
            }
        }
        for (name, ty) in self.fields.candidates() {
            if best.as_ref().map_or(true, |(len, _)| name.len() > *len)
                && starts_with_ignore_case(rest, name)
            {
                best = Some((name.len(), WordMatch::Field(ty)));
            }
        }

        match best {
            Some((len, WordMatch::Op(spelling))) => {
                self.tokens.push(Node::Op(spelling.to_string()));
                self.pos += len;
                Ok(())
            }
            Some((len, WordMatch::Field(ty))) => {
                let text = &self.input[self.pos..self.pos + len];
                self.tokens.push(Node::field(text, ty));
                self.pos += len;
                Ok(())
            }
            None => self.no_match(),
        }
    }

    /// Input nothing matched may still open a raw sub-select, but only
    /// directly after `in (` / `not in (`.
    fn no_match(&mut self) -> Result<(), ParseError> {
        let n = self.tokens.len();
        let after_list_open = n >= 2
            && matches!(self.tokens[n - 1], Node::Open)
            && matches!(&self.tokens[n - 2], Node::Op(op)
                if catalog::classify(op) == Some(OpCategory::List));
        if after_list_open {
            if let Some(text) = subselect::scan(self.input, self.pos) {
                trace!("captured sub-select at {}: {:?}", self.pos, text);
                self.tokens.push(Node::SubSelect(text.to_string()));
                self.pos += text.len();
                return Ok(());
            }
        }
        Err(ParseError::unrecognized(self.input, self.pos))
    }
}

fn starts_with_ignore_case(rest: &[u8], prefix: &str) -> bool {
    let prefix = prefix.as_bytes();
    rest.len() >= prefix.len() && rest[..prefix.len()].eq_ignore_ascii_case(prefix)
}
