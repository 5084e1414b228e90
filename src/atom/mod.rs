//! Atom model
//!
//! The tagged-node tree a parse produces. Atoms live in an arena
//! ([`AtomTree`]) and refer to their successor and list contents by index.

mod form;
mod printer;
mod tree;

pub use form::Form;
pub use printer::{escape_string, format_float};
pub use tree::{Atom, AtomId, AtomKind, AtomTree, Node, Siblings};
