//! Lexical analysis
//!
//! Cuts source text into parentheses and text tokens, and decides which
//! literal each text token denotes.

mod sexpr_scanner;
mod token;

pub use sexpr_scanner::SExprScanner;
pub use token::{classify, is_float, is_integer, is_string, is_symbol, Token, TokenKind};
