//! Structured decomposition and reconstruction of grammar units
//!
//! Every grammar unit can be taken apart into a [`FieldMap`], a plain tree
//! of tagged fields, and rebuilt from one. Reconstruction re-validates
//! everything the text parser would have checked: morpheme contents are
//! re-parsed, flags are cross-checked against the re-parse, slot names must
//! be known and a stored role path must address an existing node.

use crate::grammar::error::{ParseError, StyleError};
use crate::grammar::lexeme::Lexeme;
use crate::grammar::morpheme::Morpheme;
use crate::grammar::morpheme_set::MorphemeSet;
use crate::grammar::polymorpheme::{Polymorpheme, PolymorphemeGroup};
use crate::grammar::syntagma::{Actant, FunctionSlot, Process, Quality, SyntagmaticFunction};
use crate::grammar::word::Word;
use crate::logging::codes::{self, Code};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

// ============================================================================
// Field model
// ============================================================================

/// An ordered map of named fields, the unit of decomposition.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// A single field of a decomposed unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(u64),
    Flag(bool),
    Unit(FieldMap),
    Items(Vec<FieldValue>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<u64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_unit(&self) -> Option<&FieldMap> {
        match self {
            FieldValue::Unit(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_items(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Items(items) => Some(items),
            _ => None,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Failure to reconstruct a unit from a field map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RebuildError {
    #[error("missing field '{field}'")]
    MissingField { field: &'static str },

    #[error("field '{field}' does not hold a {expected}")]
    FieldType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("expected a {expected} unit, found tag '{found}'")]
    UnitTag {
        expected: &'static str,
        found: String,
    },

    #[error("field '{field}' contradicts the re-parsed value")]
    Inconsistent { field: &'static str },

    #[error("unknown function slot name '{name}'")]
    UnknownSlot { name: String },

    #[error("stored text failed to re-parse: {0}")]
    Reparse(#[from] ParseError),

    #[error(transparent)]
    Style(#[from] StyleError),
}

impl RebuildError {
    /// Stable code for logging and classification.
    pub fn error_code(&self) -> Code {
        match self {
            RebuildError::MissingField { .. } => codes::rebuild::MISSING_FIELD,
            RebuildError::FieldType { .. } => codes::rebuild::FIELD_TYPE_MISMATCH,
            RebuildError::UnitTag { .. } => codes::rebuild::UNIT_TAG_MISMATCH,
            RebuildError::Inconsistent { .. } => codes::rebuild::INCONSISTENT_FIELD,
            RebuildError::UnknownSlot { .. } => codes::rebuild::UNKNOWN_SLOT_NAME,
            RebuildError::Reparse(_) => codes::rebuild::REPARSE_FAILURE,
            RebuildError::Style(style) => style.error_code(),
        }
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Take a unit apart into named fields.
pub trait Decompose {
    fn to_field_map(&self) -> FieldMap;
}

/// Rebuild a unit from named fields, re-validating grammar rules.
pub trait Recompose: Sized {
    fn from_field_map(map: &FieldMap) -> Result<Self, RebuildError>;
}

// ============================================================================
// Field access helpers
// ============================================================================

fn require<'a>(map: &'a FieldMap, field: &'static str) -> Result<&'a FieldValue, RebuildError> {
    map.get(field).ok_or(RebuildError::MissingField { field })
}

fn require_text<'a>(map: &'a FieldMap, field: &'static str) -> Result<&'a str, RebuildError> {
    require(map, field)?.as_text().ok_or(RebuildError::FieldType {
        field,
        expected: "text",
    })
}

fn require_number(map: &FieldMap, field: &'static str) -> Result<u64, RebuildError> {
    require(map, field)?
        .as_number()
        .ok_or(RebuildError::FieldType {
            field,
            expected: "number",
        })
}

fn require_flag(map: &FieldMap, field: &'static str) -> Result<bool, RebuildError> {
    require(map, field)?.as_flag().ok_or(RebuildError::FieldType {
        field,
        expected: "flag",
    })
}

fn require_unit<'a>(map: &'a FieldMap, field: &'static str) -> Result<&'a FieldMap, RebuildError> {
    require(map, field)?.as_unit().ok_or(RebuildError::FieldType {
        field,
        expected: "unit",
    })
}

fn require_items<'a>(
    map: &'a FieldMap,
    field: &'static str,
) -> Result<&'a [FieldValue], RebuildError> {
    require(map, field)?
        .as_items()
        .ok_or(RebuildError::FieldType {
            field,
            expected: "item list",
        })
}

fn optional_unit<'a>(
    map: &'a FieldMap,
    field: &'static str,
) -> Result<Option<&'a FieldMap>, RebuildError> {
    match map.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_unit()
            .map(Some)
            .ok_or(RebuildError::FieldType {
                field,
                expected: "unit",
            }),
    }
}

fn check_tag(map: &FieldMap, expected: &'static str) -> Result<(), RebuildError> {
    let found = require_text(map, "type")?;
    if found == expected {
        Ok(())
    } else {
        Err(RebuildError::UnitTag {
            expected,
            found: found.to_string(),
        })
    }
}

fn tagged(tag: &str) -> FieldMap {
    let mut map = FieldMap::new();
    map.insert("type".to_string(), FieldValue::Text(tag.to_string()));
    map
}

fn units_of<T: Decompose>(items: impl IntoIterator<Item = T>) -> FieldValue {
    FieldValue::Items(
        items
            .into_iter()
            .map(|item| FieldValue::Unit(item.to_field_map()))
            .collect(),
    )
}

fn recompose_items<T: Recompose>(
    items: &[FieldValue],
    field: &'static str,
) -> Result<Vec<T>, RebuildError> {
    items
        .iter()
        .map(|item| {
            let unit = item.as_unit().ok_or(RebuildError::FieldType {
                field,
                expected: "unit",
            })?;
            T::from_field_map(unit)
        })
        .collect()
}

// ============================================================================
// Morpheme
// ============================================================================

impl Decompose for Morpheme {
    fn to_field_map(&self) -> FieldMap {
        let mut map = tagged("morpheme");
        map.insert("usl".to_string(), FieldValue::Text(self.usl().to_string()));
        map.insert("layer".to_string(), FieldValue::Number(u64::from(self.layer())));
        map.insert("paradigm".to_string(), FieldValue::Flag(self.is_paradigm()));
        map
    }
}

impl Recompose for Morpheme {
    fn from_field_map(map: &FieldMap) -> Result<Self, RebuildError> {
        check_tag(map, "morpheme")?;
        let usl = require_text(map, "usl")?;
        let layer = require_number(map, "layer")?;
        let paradigm = require_flag(map, "paradigm")?;

        let morpheme = Morpheme::from_usl(usl)?;
        if u64::from(morpheme.layer()) != layer {
            return Err(RebuildError::Inconsistent { field: "layer" });
        }
        if morpheme.is_paradigm() != paradigm {
            return Err(RebuildError::Inconsistent { field: "paradigm" });
        }
        Ok(morpheme)
    }
}

// ============================================================================
// MorphemeSet
// ============================================================================

impl Decompose for MorphemeSet {
    fn to_field_map(&self) -> FieldMap {
        let mut map = tagged("morpheme_set");
        map.insert("morphemes".to_string(), units_of(self.iter().cloned()));
        map
    }
}

impl Recompose for MorphemeSet {
    fn from_field_map(map: &FieldMap) -> Result<Self, RebuildError> {
        check_tag(map, "morpheme_set")?;
        let members: Vec<Morpheme> = recompose_items(require_items(map, "morphemes")?, "morphemes")?;
        let set = MorphemeSet::from_morphemes(members);
        if set.has_paradigm() {
            return Err(RebuildError::Inconsistent { field: "morphemes" });
        }
        Ok(set)
    }
}

// ============================================================================
// Polymorpheme
// ============================================================================

impl Decompose for PolymorphemeGroup {
    fn to_field_map(&self) -> FieldMap {
        let mut map = tagged("polymorpheme_group");
        map.insert(
            "multiplicity".to_string(),
            FieldValue::Number(self.multiplicity()),
        );
        map.insert(
            "morphemes".to_string(),
            FieldValue::Unit(self.morphemes().to_field_map()),
        );
        map
    }
}

impl Recompose for PolymorphemeGroup {
    fn from_field_map(map: &FieldMap) -> Result<Self, RebuildError> {
        check_tag(map, "polymorpheme_group")?;
        let multiplicity = require_number(map, "multiplicity")?;
        let morphemes = MorphemeSet::from_field_map(require_unit(map, "morphemes")?)?;
        Ok(PolymorphemeGroup::new(multiplicity, morphemes))
    }
}

impl Decompose for Polymorpheme {
    fn to_field_map(&self) -> FieldMap {
        let mut map = tagged("polymorpheme");
        map.insert(
            "constant".to_string(),
            FieldValue::Unit(self.constant().to_field_map()),
        );
        map.insert("groups".to_string(), units_of(self.groups().iter().cloned()));
        map
    }
}

impl Recompose for Polymorpheme {
    fn from_field_map(map: &FieldMap) -> Result<Self, RebuildError> {
        check_tag(map, "polymorpheme")?;
        let constant = MorphemeSet::from_field_map(require_unit(map, "constant")?)?;
        let groups: Vec<PolymorphemeGroup> =
            recompose_items(require_items(map, "groups")?, "groups")?;
        Ok(Polymorpheme::from_parts(constant, groups))
    }
}

// ============================================================================
// Lexeme
// ============================================================================

impl Decompose for Lexeme {
    fn to_field_map(&self) -> FieldMap {
        let mut map = tagged("lexeme");
        map.insert(
            "flexion".to_string(),
            FieldValue::Unit(self.flexion().to_field_map()),
        );
        if let Some(content) = self.content() {
            map.insert("content".to_string(), FieldValue::Unit(content.to_field_map()));
        }
        map
    }
}

impl Recompose for Lexeme {
    fn from_field_map(map: &FieldMap) -> Result<Self, RebuildError> {
        check_tag(map, "lexeme")?;
        let flexion = Polymorpheme::from_field_map(require_unit(map, "flexion")?)?;
        let content = match optional_unit(map, "content")? {
            Some(unit) => Some(Polymorpheme::from_field_map(unit)?),
            None => None,
        };
        if content.as_ref().is_some_and(Polymorpheme::is_empty) {
            return Err(RebuildError::Inconsistent { field: "content" });
        }
        Ok(Lexeme::new(flexion, content))
    }
}

// ============================================================================
// Syntagmatic functions
// ============================================================================

impl Decompose for Quality {
    fn to_field_map(&self) -> FieldMap {
        let mut map = tagged("quality");
        map.insert("actor".to_string(), FieldValue::Unit(self.actor().to_field_map()));
        map
    }
}

impl Recompose for Quality {
    fn from_field_map(map: &FieldMap) -> Result<Self, RebuildError> {
        check_tag(map, "quality")?;
        let actor = Lexeme::from_field_map(require_unit(map, "actor")?)?;
        Ok(Quality::new(actor))
    }
}

impl Decompose for Actant {
    fn to_field_map(&self) -> FieldMap {
        let mut map = tagged("actant");
        map.insert("actor".to_string(), FieldValue::Unit(self.actor().to_field_map()));
        if let Some(dependant) = self.dependant() {
            map.insert(
                "dependant".to_string(),
                FieldValue::Unit(dependant.to_field_map()),
            );
        }
        if let Some(independant) = self.independant() {
            map.insert(
                "independant".to_string(),
                FieldValue::Unit(independant.to_field_map()),
            );
        }
        map
    }
}

impl Recompose for Actant {
    fn from_field_map(map: &FieldMap) -> Result<Self, RebuildError> {
        check_tag(map, "actant")?;
        let actor = Lexeme::from_field_map(require_unit(map, "actor")?)?;
        let dependant = match optional_unit(map, "dependant")? {
            Some(unit) => Some(Box::new(Actant::from_field_map(unit)?)),
            None => None,
        };
        let independant = match optional_unit(map, "independant")? {
            Some(unit) => Some(Quality::from_field_map(unit)?),
            None => None,
        };
        Ok(Actant::new(actor, dependant, independant))
    }
}

impl Decompose for Process {
    fn to_field_map(&self) -> FieldMap {
        let mut map = tagged("process");
        map.insert("valence".to_string(), FieldValue::Number(u64::from(self.valence())));
        map.insert("actor".to_string(), FieldValue::Unit(self.actor().to_field_map()));

        let mut slots = FieldMap::new();
        for (slot, actant) in self.slots() {
            slots.insert(
                slot.name().to_string(),
                FieldValue::Unit(actant.to_field_map()),
            );
        }
        map.insert("slots".to_string(), FieldValue::Unit(slots));
        map
    }
}

impl Recompose for Process {
    fn from_field_map(map: &FieldMap) -> Result<Self, RebuildError> {
        check_tag(map, "process")?;
        let valence = require_number(map, "valence")?;
        if !(1..=3).contains(&valence) {
            return Err(RebuildError::Inconsistent { field: "valence" });
        }
        let actor = Lexeme::from_field_map(require_unit(map, "actor")?)?;

        let mut slots = BTreeMap::new();
        for (name, value) in require_unit(map, "slots")? {
            let slot = FunctionSlot::from_name(name).ok_or_else(|| RebuildError::UnknownSlot {
                name: name.clone(),
            })?;
            let unit = value.as_unit().ok_or(RebuildError::FieldType {
                field: "slots",
                expected: "unit",
            })?;
            slots.insert(slot, Actant::from_field_map(unit)?);
        }

        Ok(Process::from_parts(valence as u8, actor, slots))
    }
}

impl Decompose for SyntagmaticFunction {
    fn to_field_map(&self) -> FieldMap {
        match self {
            SyntagmaticFunction::Process(node) => node.to_field_map(),
            SyntagmaticFunction::Actant(node) => node.to_field_map(),
            SyntagmaticFunction::Quality(node) => node.to_field_map(),
        }
    }
}

impl Recompose for SyntagmaticFunction {
    fn from_field_map(map: &FieldMap) -> Result<Self, RebuildError> {
        match require_text(map, "type")? {
            "process" => Ok(SyntagmaticFunction::Process(Process::from_field_map(map)?)),
            "actant" => Ok(SyntagmaticFunction::Actant(Actant::from_field_map(map)?)),
            "quality" => Ok(SyntagmaticFunction::Quality(Quality::from_field_map(map)?)),
            found => Err(RebuildError::UnitTag {
                expected: "syntagmatic function",
                found: found.to_string(),
            }),
        }
    }
}

// ============================================================================
// Word
// ============================================================================

impl Decompose for Word {
    fn to_field_map(&self) -> FieldMap {
        let mut map = tagged("word");
        map.insert(
            "function".to_string(),
            FieldValue::Unit(self.function().to_field_map()),
        );
        if let Some(role) = self.role_path() {
            map.insert("role".to_string(), units_of(role.iter().cloned()));
        }
        map
    }
}

impl Recompose for Word {
    fn from_field_map(map: &FieldMap) -> Result<Self, RebuildError> {
        check_tag(map, "word")?;
        let function = SyntagmaticFunction::from_field_map(require_unit(map, "function")?)?;

        let role_path = match map.get("role") {
            None => None,
            Some(value) => {
                let items = value.as_items().ok_or(RebuildError::FieldType {
                    field: "role",
                    expected: "item list",
                })?;
                let path: Vec<Morpheme> = recompose_items(items, "role")?;
                if !function.check_style(&path) {
                    return Err(StyleError::InvalidRolePath.into());
                }
                Some(path)
            }
        };

        Ok(Word::from_parts(function, role_path))
    }
}
