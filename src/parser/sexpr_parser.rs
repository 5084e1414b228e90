use super::config::ParserConfig;
use crate::atom::{AtomId, AtomKind, AtomTree};
use crate::error::{Diagnostic, Error};
use crate::lexer::{SExprScanner, Token, TokenKind};

/// A list opened past the nesting limit whose contents are being skipped
struct Overflow {
    /// Lists still open inside the skipped region, itself included
    depth: usize,
    line: usize,
    column: usize,
}

/// Builds an [`AtomTree`] from S-expression source
///
/// Parsing never fails: malformed tokens become `Error` atoms and structural
/// anomalies are collected as [`Diagnostic`]s.
pub struct SExprParser {
    scanner: SExprScanner,
    config: ParserConfig,
    diagnostics: Vec<Diagnostic>,
}

impl SExprParser {
    /// Creates a parser with the default configuration
    pub fn new(source: &str) -> Self {
        Self::with_config(source, ParserConfig::default())
    }

    /// Creates a parser with an explicit configuration
    pub fn with_config(source: &str, config: ParserConfig) -> Self {
        SExprParser {
            scanner: SExprScanner::new(source),
            config,
            diagnostics: Vec::new(),
        }
    }

    /// Problems noticed so far, in source order
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Input left unread, non-empty only after an unbalanced `)`
    pub fn remaining(&self) -> String {
        self.scanner.remaining()
    }

    /// Reads the top-level sequence
    ///
    /// Stops at end of input or at a `)` that closes nothing. Calling it
    /// again continues with whatever input is left.
    pub fn parse(&mut self) -> AtomTree {
        let mut tree = AtomTree::new();
        // Open slot of the sequence being filled
        let mut slot = tree.root();
        // Branches whose contents are being read, innermost last
        let mut open: Vec<AtomId> = Vec::new();
        let mut overflow: Option<Overflow> = None;

        while let Some(token) = self.scanner.next_token() {
            self.collect_scanner_diagnostics();

            if let Some(skipped) = overflow.as_mut() {
                match token.kind {
                    TokenKind::LeftParen => skipped.depth += 1,
                    TokenKind::RightParen => skipped.depth -= 1,
                    _ => {}
                }
                if skipped.depth == 0 {
                    let (line, column) = (skipped.line, skipped.column);
                    overflow = None;
                    slot = self.nesting_too_deep(&mut tree, slot, line, column);
                }
                continue;
            }

            match token.kind {
                TokenKind::LeftParen => {
                    if open.len() >= self.config.max_depth {
                        tracing::warn!(
                            line = token.line,
                            column = token.column,
                            limit = self.config.max_depth,
                            "list nesting exceeds limit, skipping its contents"
                        );
                        overflow = Some(Overflow {
                            depth: 1,
                            line: token.line,
                            column: token.column,
                        });
                    } else {
                        open.push(slot);
                        slot = tree.open_branch(slot);
                    }
                }
                TokenKind::RightParen => match open.pop() {
                    Some(branch) => slot = tree.push_next(branch),
                    None => {
                        self.unexpected_close(&token);
                        break;
                    }
                },
                TokenKind::Text => {
                    tree.set_kind(slot, token.classify());
                    slot = tree.push_next(slot);
                }
                TokenKind::UnterminatedString => {
                    if self.config.report_unterminated {
                        let error = Error::UnterminatedString {
                            token: token.lexeme.clone(),
                        };
                        slot = self.place_error(&mut tree, slot, error, token.line, token.column);
                    }
                }
            }
        }
        self.collect_scanner_diagnostics();

        // Input ended inside a list that was too deep to keep
        if let Some(skipped) = overflow.take() {
            slot = self.nesting_too_deep(&mut tree, slot, skipped.line, skipped.column);
        }

        if !open.is_empty() {
            tracing::debug!(depth = open.len(), "input ended inside a list");
            if self.config.report_unterminated {
                let error = Error::UnterminatedList { depth: open.len() };
                let (line, column) = self.scanner.position();
                self.place_error(&mut tree, slot, error, line, column);
            }
        }

        tracing::debug!(
            atoms = tree.len(),
            diagnostics = self.diagnostics.len(),
            "parsed program"
        );
        tree
    }

    /// Writes an `Error` atom into `slot` and returns the new open slot
    fn place_error(
        &mut self,
        tree: &mut AtomTree,
        slot: AtomId,
        error: Error,
        line: usize,
        column: usize,
    ) -> AtomId {
        tree.set_kind(slot, AtomKind::Error(error.to_string()));
        self.diagnostics
            .push(Diagnostic::new(error, line, column).with_atom());
        tree.push_next(slot)
    }

    fn nesting_too_deep(
        &mut self,
        tree: &mut AtomTree,
        slot: AtomId,
        line: usize,
        column: usize,
    ) -> AtomId {
        let error = Error::NestingTooDeep {
            limit: self.config.max_depth,
        };
        self.place_error(tree, slot, error, line, column)
    }

    fn unexpected_close(&mut self, token: &Token) {
        tracing::warn!(
            line = token.line,
            column = token.column,
            "unbalanced ')' ends the program"
        );
        let error = Error::UnexpectedClose {
            line: token.line,
            column: token.column,
        };
        self.diagnostics
            .push(Diagnostic::new(error, token.line, token.column));
    }

    fn collect_scanner_diagnostics(&mut self) {
        self.diagnostics.append(&mut self.scanner.diagnostics);
    }
}

/// Parses `source` with the default configuration
pub fn parse(source: &str) -> AtomTree {
    SExprParser::new(source).parse()
}
