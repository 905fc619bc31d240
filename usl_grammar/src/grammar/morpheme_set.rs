//! MorphemeSet: duplicate-free morpheme collection with canonical order

use crate::grammar::error::{ParseError, ParseResult};
use crate::grammar::morpheme::Morpheme;
use crate::utils::scan;
use serde::Serialize;
use std::fmt;

const MAX_SET_MEMBERS: usize = crate::config::compile_time::grammar::MAX_SET_MEMBERS;

/// A set of non-paradigmatic morphemes.
///
/// Membership is by content equality; duplicates collapse silently. Members
/// are held in canonical order, so iteration, equality, hashing and
/// serialization are all deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MorphemeSet {
    members: Vec<Morpheme>,
}

impl MorphemeSet {
    /// The empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from arbitrary morphemes, collapsing duplicates and
    /// establishing canonical order.
    pub fn from_morphemes<I>(morphemes: I) -> Self
    where
        I: IntoIterator<Item = Morpheme>,
    {
        let mut members: Vec<Morpheme> = morphemes.into_iter().collect();
        members.sort();
        members.dedup();
        Self { members }
    }

    /// Parse one or more blank-separated morphemes starting at `offset`.
    ///
    /// Stops without failing at the first sub-parse failure or at the first
    /// paradigmatic morpheme (neither is consumed); zero accepted morphemes
    /// fails the production. Blanks after each accepted morpheme are
    /// consumed.
    pub fn parse(input: &str, offset: usize) -> ParseResult<(MorphemeSet, usize)> {
        let mut members = Vec::new();
        let mut cursor = offset;

        loop {
            match Morpheme::parse(input, cursor) {
                Ok((morpheme, end)) if !morpheme.is_paradigm() => {
                    members.push(morpheme);
                    cursor = scan::consume_blanks(input, end);
                }
                Ok(_) => break,
                Err(err) if err.is_recoverable() => break,
                Err(err) => return Err(err),
            }

            if members.len() > MAX_SET_MEMBERS {
                return Err(ParseError::LimitExceeded {
                    what: "morpheme set members",
                    limit: MAX_SET_MEMBERS,
                });
            }
        }

        if members.is_empty() {
            return Err(ParseError::mismatch("morpheme set", offset));
        }

        Ok((Self::from_morphemes(members), cursor))
    }

    /// Members in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Morpheme> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, morpheme: &Morpheme) -> bool {
        self.members.binary_search(morpheme).is_ok()
    }

    /// True iff any member is paradigmatic. The text grammar never accepts
    /// one here; reconstructed sets must be checked explicitly.
    pub fn has_paradigm(&self) -> bool {
        self.members.iter().any(Morpheme::is_paradigm)
    }
}

impl fmt::Display for MorphemeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, morpheme) in self.members.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", morpheme)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_accumulates_until_failure() {
        let (set, end) = MorphemeSet::parse("E: U: (", 0).unwrap();
        assert_eq!(set.len(), 2);
        // trailing blanks after the last accepted morpheme are consumed
        assert_eq!(end, 6);
    }

    #[test]
    fn test_parse_empty_fails() {
        assert_matches!(
            MorphemeSet::parse(")", 0),
            Err(ParseError::Mismatch { offset: 0, .. })
        );
    }

    #[test]
    fn test_duplicates_collapse_silently() {
        let (set, _) = MorphemeSet::parse("E: E:", 0).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_paradigmatic_member_stops_the_set() {
        let (set, end) = MorphemeSet::parse("U: E:+A:", 0).unwrap();
        assert_eq!(set.len(), 1);
        // the paradigmatic morpheme is left unconsumed
        assert_eq!(end, 3);
    }

    #[test]
    fn test_canonical_iteration_order() {
        let (set, _) = MorphemeSet::parse("wa. T: wo. E:", 0).unwrap();
        let order: Vec<&str> = set.iter().map(Morpheme::usl).collect();
        assert_eq!(order, vec!["E:", "T:", "wo.", "wa."]);
    }

    #[test]
    fn test_display_joins_with_single_blanks() {
        let (set, _) = MorphemeSet::parse("U:   E:", 0).unwrap();
        assert_eq!(set.to_string(), "E: U:");
    }

    #[test]
    fn test_set_equality_ignores_input_order() {
        let (a, _) = MorphemeSet::parse("E: U:", 0).unwrap();
        let (b, _) = MorphemeSet::parse("U: E:", 0).unwrap();
        assert_eq!(a, b);
    }
}
