use std::collections::VecDeque;

use super::token::{Token, TokenKind};
use crate::error::{Diagnostic, Error};

/// What the scanner is currently inside of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Plain,
    InsideString,
    InsideComment,
}

/// Character-by-character scanner for S-expression source
///
/// Reads each character exactly once and cuts the input into parentheses and
/// text tokens. Tokens come out lazily, so a caller that stops early leaves
/// the rest of the input unread (see [`SExprScanner::remaining`]).
pub struct SExprScanner {
    /// Source code as character vector
    source: Vec<char>,
    /// Current position in source
    current: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
    state: ScanState,
    /// Token being accumulated
    token: String,
    token_line: usize,
    token_column: usize,
    /// Previous character was a backslash inside a string
    escaped: bool,
    /// Tokens cut but not yet handed out
    ready: VecDeque<Token>,
    finished: bool,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl SExprScanner {
    /// Creates a new S-expression scanner from source code
    pub fn new(source: &str) -> Self {
        SExprScanner {
            source: source.chars().collect(),
            current: 0,
            line: 1,
            column: 1,
            state: ScanState::Plain,
            token: String::new(),
            token_line: 1,
            token_column: 1,
            escaped: false,
            ready: VecDeque::new(),
            finished: false,
            diagnostics: Vec::new(),
        }
    }

    /// Scans all tokens from source code and returns them as a vector
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    /// Produces the next token, or `None` once the input is exhausted
    pub fn next_token(&mut self) -> Option<Token> {
        while self.ready.is_empty() && !self.finished {
            if self.is_at_end() {
                self.finish();
            } else {
                let c = self.advance();
                self.scan_char(c);
            }
        }
        self.ready.pop_front()
    }

    /// Input not yet read
    pub fn remaining(&self) -> String {
        self.source[self.current..].iter().collect()
    }

    /// Line and column of the next unread character
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    /// Structural anomalies seen so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    fn scan_char(&mut self, c: char) {
        match self.state {
            ScanState::Plain => self.scan_plain(c),
            ScanState::InsideComment => {
                if c == '\n' {
                    self.state = ScanState::Plain;
                    self.token.clear();
                }
            }
            ScanState::InsideString => self.scan_string(c),
        }
    }

    fn scan_plain(&mut self, c: char) {
        match c {
            '(' => {
                self.flush();
                self.add_token(TokenKind::LeftParen, "(");
            }
            ')' => {
                self.flush();
                self.add_token(TokenKind::RightParen, ")");
            }
            ';' => {
                self.flush();
                self.state = ScanState::InsideComment;
            }
            '\'' => {
                // Only a quote standing on its own is a marker; inside a
                // token it is kept as an ordinary character.
                self.push_char(c);
                if self.token.len() == 1 {
                    self.flush();
                }
            }
            ' ' | '\t' | '\n' | '\r' => self.flush(),
            '"' => {
                if self.token.is_empty() {
                    self.push_char(c);
                    self.escaped = false;
                    self.state = ScanState::InsideString;
                } else {
                    self.stray_quote();
                }
            }
            _ => self.push_char(c),
        }
    }

    fn scan_string(&mut self, c: char) {
        match c {
            '\\' => self.escaped = true,
            '"' if !self.escaped => {
                self.token.push(c);
                self.flush();
                self.state = ScanState::Plain;
            }
            _ => {
                self.token.push(c);
                self.escaped = false;
            }
        }
    }

    fn stray_quote(&mut self) {
        // The column has already moved past the quote
        let column = self.column - 1;
        let line = self.line;
        tracing::warn!(
            line,
            column,
            token = %self.token,
            "dropping '\"' that follows a token"
        );
        self.diagnostics
            .push(Diagnostic::new(Error::StrayQuote { line, column }, line, column));
    }

    /// End of input: a pending plain token still counts, an open string does not
    fn finish(&mut self) {
        match self.state {
            ScanState::Plain => self.flush(),
            ScanState::InsideString => {
                let lexeme = std::mem::take(&mut self.token);
                tracing::debug!(
                    line = self.token_line,
                    column = self.token_column,
                    "input ended inside a string"
                );
                self.ready.push_back(Token::new(
                    TokenKind::UnterminatedString,
                    lexeme,
                    self.token_line,
                    self.token_column,
                ));
            }
            ScanState::InsideComment => self.token.clear(),
        }
        self.finished = true;
    }

    fn push_char(&mut self, c: char) {
        if self.token.is_empty() {
            // The character was already consumed, so it sits one column back
            self.token_line = self.line;
            self.token_column = self.column - 1;
        }
        self.token.push(c);
    }

    fn flush(&mut self) {
        if self.token.is_empty() {
            return;
        }
        let lexeme = std::mem::take(&mut self.token);
        self.ready.push_back(Token::new(
            TokenKind::Text,
            lexeme,
            self.token_line,
            self.token_column,
        ));
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    fn add_token(&mut self, kind: TokenKind, lexeme: &str) {
        let column = if self.column > 1 { self.column - 1 } else { 1 };
        self.ready
            .push_back(Token::new(kind, lexeme.to_string(), self.line, column));
    }
}

impl Iterator for SExprScanner {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
