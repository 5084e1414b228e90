//! S-expression parser
//!
//! Turns scanner tokens into an [`crate::atom::AtomTree`].

mod config;
mod paren_balance;
mod sexpr_parser;

pub use config::{ParserConfig, DEFAULT_MAX_DEPTH};
pub use paren_balance::ParenStats;
pub use sexpr_parser::{parse, SExprParser};
