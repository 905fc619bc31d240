//! Polymorphemes: constant morphemes plus multiplicity-tagged groups

use crate::grammar::error::{ParseError, ParseResult};
use crate::grammar::morpheme_set::MorphemeSet;
use crate::utils::scan;
use serde::Serialize;
use std::fmt;

// ============================================================================
// PolymorphemeGroup
// ============================================================================

/// A parenthesized morpheme set tagged with a selection multiplicity:
/// `m<n>(...)` reads as "select n members from this set".
///
/// The interior may be empty. Groups order by multiplicity first, then by
/// member set, which fixes the serialization order of a polymorpheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PolymorphemeGroup {
    multiplicity: u64,
    morphemes: MorphemeSet,
}

impl PolymorphemeGroup {
    pub fn new(multiplicity: u64, morphemes: MorphemeSet) -> Self {
        Self {
            multiplicity,
            morphemes,
        }
    }

    /// Parse `\s* m<digits> ( <set?> )` starting at `offset`.
    pub fn parse(input: &str, offset: usize) -> ParseResult<(PolymorphemeGroup, usize)> {
        let mismatch = || ParseError::mismatch("polymorpheme group", offset);

        let cursor = scan::consume_blanks(input, offset);
        let cursor = scan::match_char(input, cursor, 'm').ok_or_else(mismatch)?;
        let (multiplicity, cursor) = scan::take_digits(input, cursor).ok_or_else(mismatch)?;
        let cursor = scan::match_char(input, cursor, '(').ok_or_else(mismatch)?;

        let (morphemes, cursor) = match MorphemeSet::parse(input, cursor) {
            Ok((set, end)) => (set, end),
            Err(err) if err.is_recoverable() => (MorphemeSet::new(), cursor),
            Err(err) => return Err(err),
        };

        let cursor = scan::match_char(input, cursor, ')')
            .ok_or_else(|| ParseError::mismatch("')'", cursor))?;

        Ok((Self::new(multiplicity, morphemes), cursor))
    }

    pub fn multiplicity(&self) -> u64 {
        self.multiplicity
    }

    pub fn morphemes(&self) -> &MorphemeSet {
        &self.morphemes
    }
}

impl fmt::Display for PolymorphemeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}({})", self.multiplicity, self.morphemes)
    }
}

// ============================================================================
// Polymorpheme
// ============================================================================

/// A constant morpheme set followed by any number of groups. Both parts may
/// independently be empty, but the regular parse requires the whole to
/// consume at least one of them; the flexion variant accepts emptiness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Polymorpheme {
    constant: MorphemeSet,
    groups: Vec<PolymorphemeGroup>,
}

impl Polymorpheme {
    /// The empty polymorpheme, used as an empty flexion.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts<I>(constant: MorphemeSet, groups: I) -> Self
    where
        I: IntoIterator<Item = PolymorphemeGroup>,
    {
        let mut groups: Vec<PolymorphemeGroup> = groups.into_iter().collect();
        groups.sort();
        groups.dedup();
        Self { constant, groups }
    }

    /// Parse an optional constant set followed by zero or more groups.
    ///
    /// Fails when nothing at all is consumed; use [`Polymorpheme::parse_flexion`]
    /// where an empty result is acceptable.
    pub fn parse(input: &str, offset: usize) -> ParseResult<(Polymorpheme, usize)> {
        let (polymorpheme, end) = Self::parse_flexion(input, offset)?;
        if end == offset {
            return Err(ParseError::mismatch("polymorpheme", offset));
        }
        Ok((polymorpheme, end))
    }

    /// Like [`Polymorpheme::parse`] but an empty match succeeds, yielding the
    /// empty polymorpheme without consuming input.
    pub fn parse_flexion(input: &str, offset: usize) -> ParseResult<(Polymorpheme, usize)> {
        let (constant, mut cursor) = match MorphemeSet::parse(input, offset) {
            Ok((set, end)) => (set, end),
            Err(err) if err.is_recoverable() => (MorphemeSet::new(), offset),
            Err(err) => return Err(err),
        };

        let mut groups = Vec::new();
        loop {
            match PolymorphemeGroup::parse(input, cursor) {
                Ok((group, end)) => {
                    groups.push(group);
                    cursor = end;
                }
                Err(err) if err.is_recoverable() => break,
                Err(err) => return Err(err),
            }
        }

        Ok((Self::from_parts(constant, groups), cursor))
    }

    pub fn constant(&self) -> &MorphemeSet {
        &self.constant
    }

    pub fn groups(&self) -> &[PolymorphemeGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.constant.is_empty() && self.groups.is_empty()
    }
}

impl fmt::Display for Polymorpheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separate = false;
        if !self.constant.is_empty() {
            write!(f, "{}", self.constant)?;
            separate = true;
        }
        for group in &self.groups {
            if separate {
                f.write_str(" ")?;
            }
            write!(f, "{}", group)?;
            separate = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_group_parse_basic() {
        let (group, end) = PolymorphemeGroup::parse(" m2(U: A:)", 0).unwrap();
        assert_eq!(group.multiplicity(), 2);
        assert_eq!(group.morphemes().len(), 2);
        assert_eq!(end, 10);
    }

    #[test]
    fn test_group_parse_empty_interior() {
        let (group, end) = PolymorphemeGroup::parse("m3()", 0).unwrap();
        assert!(group.morphemes().is_empty());
        assert_eq!(end, 4);
    }

    #[test]
    fn test_group_parse_requires_closing_paren() {
        assert_matches!(
            PolymorphemeGroup::parse("m2(U: A:", 0),
            Err(ParseError::Mismatch { .. })
        );
    }

    #[test]
    fn test_group_parse_rejects_missing_multiplicity() {
        assert_matches!(
            PolymorphemeGroup::parse("m(U:)", 0),
            Err(ParseError::Mismatch { offset: 0, .. })
        );
    }

    #[test]
    fn test_polymorpheme_constant_and_group() {
        let (poly, end) = Polymorpheme::parse("E: m2(U: A:)", 0).unwrap();
        assert_eq!(poly.constant().len(), 1);
        assert_eq!(poly.groups().len(), 1);
        assert_eq!(end, 12);
        assert_eq!(poly.to_string(), "E: m2(U: A:)");
    }

    #[test]
    fn test_polymorpheme_groups_only() {
        let (poly, _) = Polymorpheme::parse("m1(U:) m2(A: B:)", 0).unwrap();
        assert!(poly.constant().is_empty());
        assert_eq!(poly.groups().len(), 2);
    }

    #[test]
    fn test_polymorpheme_rejects_empty() {
        assert_matches!(
            Polymorpheme::parse(")", 0),
            Err(ParseError::Mismatch { offset: 0, .. })
        );
    }

    #[test]
    fn test_flexion_accepts_empty() {
        let (poly, end) = Polymorpheme::parse_flexion(")", 0).unwrap();
        assert!(poly.is_empty());
        assert_eq!(end, 0);
    }

    #[test]
    fn test_groups_order_by_multiplicity_then_members() {
        let (a, _) = Polymorpheme::parse("m2(U:) m1(A:) m1(E:)", 0).unwrap();
        assert_eq!(a.to_string(), "m1(E:) m1(A:) m2(U:)");
    }

    #[test]
    fn test_duplicate_groups_collapse() {
        let (poly, _) = Polymorpheme::parse("m1(U:) m1(U:)", 0).unwrap();
        assert_eq!(poly.groups().len(), 1);
    }

    #[test]
    fn test_round_trip_is_stable() {
        let (poly, _) = Polymorpheme::parse("B: E: m2(U: A:) m1(T:)", 0).unwrap();
        let text = poly.to_string();
        let (again, end) = Polymorpheme::parse(&text, 0).unwrap();
        assert_eq!(end, text.len());
        assert_eq!(again, poly);
    }
}
