//! # atomreader - a minimal S-expression reader
//!
//! Turns raw text into a tree of typed atoms representing a Lisp-like
//! program, and renders that tree back to text. There is no evaluator: the
//! crate stops at "text in, typed tree out".
//!
//! ## Quick Start
//!
//! ```rust
//! use atomreader::{parse, AtomKind};
//!
//! let tree = parse("(+ 1 2)");
//!
//! let list = tree.top_level().next().unwrap();
//! let items: Vec<_> = list.children().map(|n| n.kind().clone()).collect();
//! assert_eq!(
//!     items,
//!     vec![AtomKind::Symbol("+".to_string()), AtomKind::Int(1), AtomKind::Int(2)]
//! );
//!
//! // Printing reads back as the same tree
//! assert_eq!(tree.to_string(), "(+ 1 2)");
//! ```
//!
//! ## Malformed input
//!
//! Reading never fails. Tokens that are not a valid literal become `Error`
//! atoms in place, and reading carries on:
//!
//! ```rust
//! use atomreader::parse;
//!
//! let tree = parse("(a 12a b)");
//! let errors: Vec<_> = tree.errors().into_iter().map(|(_, msg)| msg).collect();
//! assert_eq!(errors, vec!["Can't parse: 12a"]);
//! ```
//!
//! Structural anomalies that leave nothing in the tree are reported as
//! diagnostics on the parser and through `tracing`:
//!
//! ```rust
//! use atomreader::{Parser, ParserConfig};
//!
//! let config = ParserConfig::default().with_report_unterminated(true);
//! let mut parser = Parser::with_config("(define s \"open", config);
//! let tree = parser.parse();
//!
//! assert!(tree.has_errors());
//! assert_eq!(parser.diagnostics().len(), 2); // open string, open list
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Scanner → Tokens → Parser → AtomTree → Printer
//! ```
//!
//! - [`Scanner`] - character state machine (plain / string / comment)
//! - [`lexer::classify`] - decides the literal kind of a token
//! - [`Parser`] - links tokens into an arena of atoms
//! - [`AtomTree`] - the result; `Display` prints it back as source

pub mod atom;
pub mod error;
pub mod lexer;
pub mod parser;

/// Version of the reader
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export main types
pub use atom::{Atom, AtomId, AtomKind, AtomTree, Form, Node};
pub use error::{Diagnostic, Error, Result, Severity};
pub use lexer::{SExprScanner, Token, TokenKind};
pub use parser::{parse, ParenStats, ParserConfig, SExprParser};

/// Type alias for the S-expression scanner (lexer).
/// Cuts raw source text into tokens for the parser.
pub type Scanner = SExprScanner;

/// Type alias for the S-expression parser.
/// Links tokens into an atom tree.
pub type Parser = SExprParser;
