//! Syntagmatic-function trees: process, actant and quality nodes
//!
//! Every node in a word's function tree is addressed by a role path, a
//! sequence of grammatical code morphemes extending the parent's path by
//! exactly one code. The textual form writes the full path before each
//! node's actor lexeme, and an optional `!` marker in front of at most one
//! node designates the word's role.

pub mod actant;
pub mod process;
pub mod quality;

pub use actant::Actant;
pub use process::{FunctionSlot, Process};
pub use quality::Quality;

use crate::grammar::error::{ParseError, ParseResult, StyleError};
use crate::grammar::morpheme::Morpheme;
use crate::utils::scan;
use serde::Serialize;
use std::fmt;

/// Grammatical code addressing a dependant actant node.
pub const ACTANT_CODE: &str = "E:A:.";
/// Grammatical code addressing an independant quality node.
pub const QUALITY_CODE: &str = "E:U:.";
/// Separator between sibling branches of the tree.
pub const BRANCH_SEPARATOR: char = '>';
/// Marker designating the word role.
pub const ROLE_MARKER: char = '!';

const MAX_PARSE_DEPTH: usize = crate::config::compile_time::grammar::MAX_PARSE_DEPTH;
const MAX_ROLE_PATH_DEPTH: usize = crate::config::compile_time::grammar::MAX_ROLE_PATH_DEPTH;

// ============================================================================
// SyntagmaticFunction
// ============================================================================

/// One of the three node kinds a word's function tree may be rooted in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntagmaticFunction {
    Process(Process),
    Actant(Actant),
    Quality(Quality),
}

impl SyntagmaticFunction {
    /// Parse a function tree rooted at `offset`, trying process, actant and
    /// quality roots in that order and keeping the deepest failure.
    ///
    /// Returns the tree, the end offset and the role path captured by a `!`
    /// marker, if any.
    pub fn parse(
        input: &str,
        offset: usize,
    ) -> ParseResult<(SyntagmaticFunction, usize, Option<Vec<Morpheme>>)> {
        let process_err = match Process::parse(input, offset, 0) {
            Ok((node, end, role)) => return Ok((Self::Process(node), end, role)),
            Err(err) if err.is_recoverable() => err,
            Err(err) => return Err(err),
        };
        let actant_err = match Actant::parse(input, offset, &[], 0) {
            Ok((node, end, role)) => return Ok((Self::Actant(node), end, role)),
            Err(err) if err.is_recoverable() => err,
            Err(err) => return Err(err),
        };
        match Quality::parse(input, offset, &[], 0) {
            Ok((node, end, role)) => Ok((Self::Quality(node), end, role)),
            Err(quality_err) => Err(process_err.prefer_deeper(actant_err).prefer_deeper(quality_err)),
        }
    }

    /// Whether `path` addresses an existing node of this tree.
    pub fn check_style(&self, path: &[Morpheme]) -> bool {
        match self {
            Self::Process(node) => node.check_style(path),
            Self::Actant(node) => node.check_style(path),
            Self::Quality(node) => node.check_style(path),
        }
    }

    pub(crate) fn generate(&self, role: Option<&[Morpheme]>) -> String {
        match self {
            Self::Process(node) => node.generate(role),
            Self::Actant(node) => node.generate(role, ""),
            Self::Quality(node) => node.generate(role, ""),
        }
    }
}

impl fmt::Display for SyntagmaticFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.generate(None))
    }
}

// ============================================================================
// Shared parsing helpers
// ============================================================================

/// Match an optional role marker exactly at `offset`.
pub(crate) fn parse_marker(input: &str, offset: usize) -> (bool, usize) {
    match scan::match_char(input, offset, ROLE_MARKER) {
        Some(end) => (true, end),
        None => (false, offset),
    }
}

/// Parse a blank-separated run of morphemes forming a role path.
///
/// At least one morpheme is required at `offset` itself; further morphemes
/// are consumed greedily.
pub(crate) fn parse_path(input: &str, offset: usize) -> ParseResult<(Vec<Morpheme>, usize)> {
    let (first, mut cursor) = Morpheme::parse(input, offset)?;
    let mut path = vec![first];

    loop {
        let next = scan::consume_blanks(input, cursor);
        match Morpheme::parse(input, next) {
            Ok((morpheme, end)) => {
                path.push(morpheme);
                cursor = end;
            }
            Err(err) if err.is_recoverable() => break,
            Err(err) => return Err(err),
        }
        if path.len() > MAX_ROLE_PATH_DEPTH {
            return Err(ParseError::LimitExceeded {
                what: "role path codes",
                limit: MAX_ROLE_PATH_DEPTH,
            });
        }
    }

    Ok((path, cursor))
}

/// The code by which `path` extends `prefix`, when it extends it by exactly
/// one.
pub(crate) fn path_extension<'a>(path: &'a [Morpheme], prefix: &[Morpheme]) -> Option<&'a Morpheme> {
    if path.len() == prefix.len() + 1 && path[..prefix.len()] == *prefix {
        path.last()
    } else {
        None
    }
}

/// Merge role captures from sibling subtrees; two captures conflict.
pub(crate) fn merge_role(
    a: Option<Vec<Morpheme>>,
    b: Option<Vec<Morpheme>>,
) -> ParseResult<Option<Vec<Morpheme>>> {
    match (a, b) {
        (Some(_), Some(_)) => Err(StyleError::ConflictingRoleMarkers.into()),
        (Some(role), None) | (None, Some(role)) => Ok(Some(role)),
        (None, None) => Ok(None),
    }
}

/// Guard shared by every recursive node parse.
pub(crate) fn check_depth(depth: usize) -> ParseResult<()> {
    if depth >= MAX_PARSE_DEPTH {
        Err(ParseError::DepthExceeded {
            limit: MAX_PARSE_DEPTH,
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn code(usl: &str) -> Morpheme {
        Morpheme::from_usl(usl).unwrap()
    }

    #[test]
    fn test_parse_path_is_greedy() {
        let (path, end) = parse_path("E:A:. E:U:. (", 0).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(end, 11);
    }

    #[test]
    fn test_parse_path_requires_leading_morpheme() {
        assert_matches!(parse_path(" E:A:.", 0), Err(ParseError::Mismatch { .. }));
    }

    #[test]
    fn test_path_extension() {
        let prefix = vec![code("E:.n.-")];
        let path = vec![code("E:.n.-"), code("E:A:.")];
        assert_eq!(path_extension(&path, &prefix).map(Morpheme::usl), Some("E:A:."));
        assert_eq!(path_extension(&path, &[]), None);
        assert_eq!(path_extension(&prefix, &path), None);
    }

    #[test]
    fn test_merge_role_conflict() {
        let a = Some(vec![code("E:A:.")]);
        let b = Some(vec![code("E:U:.")]);
        assert_matches!(
            merge_role(a, b),
            Err(ParseError::Style(StyleError::ConflictingRoleMarkers))
        );
    }

    #[test]
    fn test_root_alternation_dispatch() {
        let (tree, _, _) = SyntagmaticFunction::parse("E:S:. (E:)", 0).unwrap();
        assert_matches!(tree, SyntagmaticFunction::Process(_));

        let (tree, _, _) = SyntagmaticFunction::parse("E:A:. (E:)", 0).unwrap();
        assert_matches!(tree, SyntagmaticFunction::Actant(_));

        let (tree, _, _) = SyntagmaticFunction::parse("E:U:. (E:)", 0).unwrap();
        assert_matches!(tree, SyntagmaticFunction::Quality(_));
    }
}
