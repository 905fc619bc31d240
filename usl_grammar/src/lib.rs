// Internal modules
pub mod config;
pub mod grammar;
#[macro_use]
pub mod logging;
pub mod rebuild;
pub mod translation;
pub mod utils;

// Re-export key types for library consumers
pub use grammar::error::{ParseError, ParseResult, StyleError};
pub use grammar::lexeme::Lexeme;
pub use grammar::morpheme::Morpheme;
pub use grammar::morpheme_set::MorphemeSet;
pub use grammar::polymorpheme::{Polymorpheme, PolymorphemeGroup};
pub use grammar::syntagma::{Actant, FunctionSlot, Process, Quality, SyntagmaticFunction};
pub use grammar::word::Word;
pub use rebuild::{Decompose, FieldMap, FieldValue, RebuildError, Recompose};
pub use translation::{MemoryTranslationStore, TranslationSet, TranslationStore};
