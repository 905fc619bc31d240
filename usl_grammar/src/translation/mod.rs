//! Natural-language translations attached to grammar units

use crate::logging::codes::{self, Code};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Translations of one unit, grouped by language tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranslationSet {
    translations: BTreeMap<String, Vec<String>>,
}

impl TranslationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, lang: &str, text: &str) {
        self.translations
            .entry(lang.to_string())
            .or_default()
            .push(text.to_string());
    }

    pub fn get(&self, lang: &str) -> Option<&[String]> {
        self.translations.get(lang).map(Vec::as_slice)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.translations.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }
}

/// No translation is recorded for a unit in the requested language.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no '{lang}' translation recorded for '{usl}'")]
pub struct MissingTranslationError {
    pub usl: String,
    pub lang: String,
}

impl MissingTranslationError {
    pub fn error_code(&self) -> Code {
        codes::translation::MISSING_TRANSLATION
    }
}

/// Lookup of recorded translations, keyed by a unit's canonical text.
pub trait TranslationStore {
    /// The translations of `usl` into `lang`.
    fn lookup(&self, usl: &str, lang: &str) -> Result<&[String], MissingTranslationError>;

    /// Whether any translation of `usl` is recorded, in any language.
    fn contains(&self, usl: &str) -> bool;
}

/// In-memory [`TranslationStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryTranslationStore {
    entries: HashMap<String, TranslationSet>,
}

impl MemoryTranslationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, usl: &str, lang: &str, text: &str) {
        self.entries
            .entry(usl.to_string())
            .or_default()
            .add(lang, text);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TranslationStore for MemoryTranslationStore {
    fn lookup(&self, usl: &str, lang: &str) -> Result<&[String], MissingTranslationError> {
        self.entries
            .get(usl)
            .and_then(|set| set.get(lang))
            .ok_or_else(|| MissingTranslationError {
                usl: usl.to_string(),
                lang: lang.to_string(),
            })
    }

    fn contains(&self, usl: &str) -> bool {
        self.entries.contains_key(usl)
    }
}
