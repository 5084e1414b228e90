use serde::{Deserialize, Serialize};

use crate::atom::AtomKind;
use crate::error::Error;

/// A single token cut from the source text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Original text of the token
    pub lexeme: String,
    /// Line number where token appears (1-indexed)
    pub line: usize,
    /// Column number where token starts (1-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: String, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme,
            line,
            column,
        }
    }

    /// Literal kind of a `Text` token
    pub fn classify(&self) -> AtomKind {
        classify(&self.lexeme)
    }
}

/// Token types produced by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Any other run of characters, to be classified
    Text,
    /// String still open at end of input (lexeme starts with `"`)
    UnterminatedString,
}

/// Decides which literal a token denotes
///
/// Checked in order: integer, float, string, symbol, quote marker. Anything
/// else becomes an `Error` carrying `Can't parse: <token>`.
pub fn classify(token: &str) -> AtomKind {
    if let Some(n) = parse_integer(token) {
        return AtomKind::Int(n);
    }
    if let Some(x) = parse_float(token) {
        return AtomKind::Float(x);
    }
    if is_string(token) {
        return AtomKind::String(token[1..token.len() - 1].to_string());
    }
    if is_symbol(token) {
        return AtomKind::Symbol(token.to_string());
    }
    if token == "'" {
        return AtomKind::Quote;
    }
    AtomKind::Error(Error::cant_parse(token).to_string())
}

/// `-?[0-9]+` that fits an `i64`
pub fn is_integer(token: &str) -> bool {
    parse_integer(token).is_some()
}

/// `<int>.<digits>` with an optional `e`/`E` exponent
pub fn is_float(token: &str) -> bool {
    parse_float(token).is_some()
}

/// At least two characters, wrapped in `"`
pub fn is_string(token: &str) -> bool {
    token.len() > 1 && token.starts_with('"') && token.ends_with('"')
}

/// Non-empty, no leading digit, no quote or backslash anywhere
pub fn is_symbol(token: &str) -> bool {
    match token.chars().next() {
        None => false,
        Some(first) if first.is_ascii_digit() => false,
        Some(_) => !token.chars().any(|c| matches!(c, '\'' | '"' | '\\')),
    }
}

/// Digits only; the empty string counts
fn is_natural(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_digit())
}

/// `-?[0-9]+`, judged by form alone
fn is_signed_digits(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && is_natural(digits)
}

fn parse_integer(token: &str) -> Option<i64> {
    if !is_signed_digits(token) {
        return None;
    }
    token.parse().ok()
}

/// The whole part and the exponent are checked by form only, so a float
/// may carry more digits than an `i64` holds
fn parse_float(token: &str) -> Option<f64> {
    let (whole, fraction) = token.split_once('.')?;
    if fraction.contains('.') || !is_signed_digits(whole) {
        return None;
    }

    match fraction.split_once(|c: char| c == 'e' || c == 'E') {
        Some((mantissa, exponent)) => {
            if !is_natural(mantissa) || !is_signed_digits(exponent) {
                return None;
            }
        }
        None => {
            if !is_natural(fraction) {
                return None;
            }
        }
    }

    token.parse().ok()
}
