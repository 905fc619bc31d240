//! Error types for the USL grammar engine
//!
//! Three distinct failure kinds flow through parsing:
//! - grammar mismatches, recoverable signals that drive alternation and
//!   backtracking between sibling productions;
//! - style violations, semantic errors that abort the whole operation;
//! - resource-limit breaches, which also abort.
//!
//! Reconstruction incompatibilities live in [`crate::rebuild`]; they never
//! occur during ordinary text parsing.

use crate::logging::codes::{self, Code};
use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Failure of a parse operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A production did not match at the given offset. Recoverable: callers
    /// try the next alternative and keep the deepest offset for reporting.
    #[error("expected {production} at offset {offset}")]
    Mismatch {
        production: &'static str,
        offset: usize,
    },

    /// A complete expression was parsed but input remains.
    #[error("trailing input at offset {offset}")]
    TrailingInput { offset: usize },

    /// A configured resource limit was breached.
    #[error("{what} exceeds the configured limit of {limit}")]
    LimitExceeded { what: &'static str, limit: usize },

    /// Nesting ran past the maximum parse depth.
    #[error("nesting exceeds the maximum parse depth of {limit}")]
    DepthExceeded { limit: usize },

    /// A semantic rule was broken; aborts instead of backtracking.
    #[error(transparent)]
    Style(#[from] StyleError),
}

impl ParseError {
    pub fn mismatch(production: &'static str, offset: usize) -> Self {
        ParseError::Mismatch { production, offset }
    }

    /// Recoverable errors may be swallowed by alternation; everything else
    /// must propagate.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ParseError::Mismatch { .. })
    }

    /// The input offset the error refers to, when one applies.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::Mismatch { offset, .. } | ParseError::TrailingInput { offset } => {
                Some(*offset)
            }
            _ => None,
        }
    }

    /// Stable code for logging and classification.
    pub fn error_code(&self) -> Code {
        match self {
            ParseError::Mismatch { .. } => codes::grammar::PRODUCTION_MISMATCH,
            ParseError::TrailingInput { .. } => codes::grammar::TRAILING_INPUT,
            ParseError::LimitExceeded { .. } => codes::grammar::INPUT_TOO_LARGE,
            ParseError::DepthExceeded { .. } => codes::grammar::MAX_RECURSION_DEPTH,
            ParseError::Style(style) => style.error_code(),
        }
    }

    /// Merge two alternation failures, keeping the most informative one.
    ///
    /// A non-recoverable error always wins; between two mismatches the
    /// deeper offset wins.
    pub fn prefer_deeper(self, other: ParseError) -> ParseError {
        if !self.is_recoverable() {
            return self;
        }
        if !other.is_recoverable() {
            return other;
        }
        match (self.offset(), other.offset()) {
            (Some(a), Some(b)) if b > a => other,
            _ => self,
        }
    }
}

/// Non-recoverable style violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("conflicting role markers: at most one '!' may appear in a word")]
    ConflictingRoleMarkers,

    #[error("role path does not address an existing node")]
    InvalidRolePath,

    #[error("more than one dependant branch attached to a single actant")]
    DuplicateDependant,

    #[error("more than one independant branch attached to a single actant")]
    DuplicateIndependant,

    #[error("function slot '{slot}' occupied more than once")]
    DuplicateFunctionSlot { slot: &'static str },
}

impl StyleError {
    pub fn error_code(&self) -> Code {
        match self {
            StyleError::ConflictingRoleMarkers => codes::style::CONFLICTING_ROLE_MARKERS,
            StyleError::InvalidRolePath => codes::style::INVALID_ROLE_PATH,
            StyleError::DuplicateDependant => codes::style::DUPLICATE_DEPENDANT,
            StyleError::DuplicateIndependant => codes::style::DUPLICATE_INDEPENDANT,
            StyleError::DuplicateFunctionSlot { .. } => codes::style::DUPLICATE_FUNCTION_SLOT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_is_recoverable() {
        let err = ParseError::mismatch("morpheme", 4);
        assert!(err.is_recoverable());
        assert_eq!(err.offset(), Some(4));
        assert_eq!(err.error_code().as_str(), "E040");
    }

    #[test]
    fn test_style_is_not_recoverable() {
        let err = ParseError::from(StyleError::ConflictingRoleMarkers);
        assert!(!err.is_recoverable());
        assert_eq!(err.error_code().as_str(), "E060");
    }

    #[test]
    fn test_prefer_deeper_picks_largest_offset() {
        let shallow = ParseError::mismatch("actant", 2);
        let deep = ParseError::mismatch("process", 9);
        assert_eq!(shallow.clone().prefer_deeper(deep.clone()), deep.clone());
        assert_eq!(deep.clone().prefer_deeper(shallow), deep);
    }

    #[test]
    fn test_prefer_deeper_keeps_style_violation() {
        let mismatch = ParseError::mismatch("quality", 30);
        let style = ParseError::from(StyleError::DuplicateDependant);
        assert_eq!(mismatch.prefer_deeper(style.clone()), style);
    }

    #[test]
    fn test_error_display() {
        let err = ParseError::mismatch("lexeme", 7);
        assert_eq!(err.to_string(), "expected lexeme at offset 7");

        let err = ParseError::from(StyleError::DuplicateFunctionSlot { slot: "initiator" });
        assert!(err.to_string().contains("initiator"));
    }
}
