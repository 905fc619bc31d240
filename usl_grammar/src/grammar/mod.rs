//! USL grammar: layered tokenizer, composite units and the syntagmatic tree
//!
//! Components are strictly bottom-up: morphemes feed sets, sets feed groups
//! and polymorphemes, polymorphemes feed lexemes, lexemes feed the
//! syntagmatic-function tree, and a word wraps one tree with at most one
//! role-path marker.

pub mod error;
pub mod lexeme;
pub mod morpheme;
pub mod morpheme_set;
pub mod polymorpheme;
pub mod syntagma;
pub mod word;
