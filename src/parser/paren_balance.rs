//! Parenthesis bookkeeping for incremental input
//!
//! Lets a line-based front end decide whether the text typed so far is a
//! complete program or whether it should keep reading lines.

use crate::lexer::{SExprScanner, TokenKind};

/// Parenthesis counts outside strings and comments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParenStats {
    /// Number of `(`
    pub open_count: usize,
    /// Number of `)`
    pub close_count: usize,
    /// Input ends inside a string literal
    pub open_string: bool,
}

impl ParenStats {
    /// Counts parentheses the same way the reader sees them
    pub fn of(source: &str) -> Self {
        let mut stats = ParenStats::default();
        for token in SExprScanner::new(source) {
            match token.kind {
                TokenKind::LeftParen => stats.open_count += 1,
                TokenKind::RightParen => stats.close_count += 1,
                TokenKind::UnterminatedString => stats.open_string = true,
                TokenKind::Text => {}
            }
        }
        stats
    }

    /// Check if parentheses are balanced
    pub fn is_balanced(&self) -> bool {
        self.open_count == self.close_count
    }

    /// More lines are needed before the input reads as a whole program
    pub fn needs_more_input(&self) -> bool {
        self.open_string || self.open_count > self.close_count
    }
}
