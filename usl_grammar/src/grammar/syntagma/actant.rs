//! Actant node: a participant with optional dependant and independant
//! qualifications

use crate::grammar::error::{ParseError, ParseResult, StyleError};
use crate::grammar::lexeme::Lexeme;
use crate::grammar::morpheme::Morpheme;
use crate::grammar::syntagma::{
    check_depth, merge_role, parse_marker, parse_path, path_extension, Quality, ACTANT_CODE,
    BRANCH_SEPARATOR,
};
use crate::utils::scan;
use serde::Serialize;

/// An actant: an actor lexeme, at most one dependant actant subtree and at
/// most one independant quality.
///
/// Outside a process slot, an actant extends its parent path with the
/// `E:A:.` code; inside one, the slot code takes that place and the node is
/// built by the process parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Actant {
    actor: Lexeme,
    dependant: Option<Box<Actant>>,
    independant: Option<Quality>,
}

impl Actant {
    pub(crate) fn new(
        actor: Lexeme,
        dependant: Option<Box<Actant>>,
        independant: Option<Quality>,
    ) -> Actant {
        Actant {
            actor,
            dependant,
            independant,
        }
    }

    pub(crate) fn parse(
        input: &str,
        offset: usize,
        prefix: &[Morpheme],
        depth: usize,
    ) -> ParseResult<(Actant, usize, Option<Vec<Morpheme>>)> {
        check_depth(depth)?;

        let (marked, cursor) = parse_marker(input, offset);
        let cursor = scan::consume_blanks(input, cursor);

        let path_start = cursor;
        let (path, cursor) = parse_path(input, cursor)?;
        let cursor = scan::consume_blanks(input, cursor);

        let head = path_extension(&path, prefix)
            .ok_or_else(|| ParseError::mismatch("actant code", path_start))?;
        if head.usl() != ACTANT_CODE {
            return Err(ParseError::mismatch("actant code", path_start));
        }

        let mut role = if marked { Some(path.clone()) } else { None };

        let (actor, mut cursor) = Lexeme::parse(input, cursor)?;

        let mut dependant: Option<Box<Actant>> = None;
        let mut independant: Option<Quality> = None;
        loop {
            let branch = scan::consume_blanks(input, cursor);
            let Some(branch) = scan::match_char(input, branch, BRANCH_SEPARATOR) else {
                break;
            };
            let branch = scan::consume_blanks(input, branch);

            match Actant::parse(input, branch, &path, depth + 1) {
                Ok((child, end, child_role)) => {
                    if dependant.is_some() {
                        return Err(StyleError::DuplicateDependant.into());
                    }
                    dependant = Some(Box::new(child));
                    role = merge_role(role, child_role)?;
                    cursor = end;
                    continue;
                }
                Err(err) if err.is_recoverable() => {}
                Err(err) => return Err(err),
            }

            match Quality::parse(input, branch, &path, depth + 1) {
                Ok((child, end, child_role)) => {
                    if independant.is_some() {
                        return Err(StyleError::DuplicateIndependant.into());
                    }
                    independant = Some(child);
                    role = merge_role(role, child_role)?;
                    cursor = end;
                }
                Err(err) if err.is_recoverable() => break,
                Err(err) => return Err(err),
            }
        }

        Ok((Actant::new(actor, dependant, independant), cursor, role))
    }

    pub fn actor(&self) -> &Lexeme {
        &self.actor
    }

    pub fn dependant(&self) -> Option<&Actant> {
        self.dependant.as_deref()
    }

    pub fn independant(&self) -> Option<&Quality> {
        self.independant.as_ref()
    }

    /// Whether `path` addresses this node or one below it.
    pub fn check_style(&self, path: &[Morpheme]) -> bool {
        match path.first() {
            Some(head) if head.usl() == ACTANT_CODE => {
                path.len() == 1 || self.check_children(&path[1..])
            }
            _ => false,
        }
    }

    /// Whether `path` addresses a node among this actant's children. Used
    /// directly by process slots, whose own code replaces the actant code.
    pub(crate) fn check_children(&self, path: &[Morpheme]) -> bool {
        let dependant = self
            .dependant
            .as_deref()
            .is_some_and(|child| child.check_style(path));
        let independant = self
            .independant
            .as_ref()
            .is_some_and(|child| child.check_style(path));
        dependant || independant
    }

    pub(crate) fn generate(&self, role: Option<&[Morpheme]>, path_prefix: &str) -> String {
        let mut usl = String::new();
        let mut next_role = None;
        if let Some(path) = role {
            if path[0].usl() == ACTANT_CODE {
                if path.len() == 1 {
                    usl.push_str("! ");
                } else {
                    next_role = Some(&path[1..]);
                }
            }
        }

        let next_prefix = if path_prefix.is_empty() {
            ACTANT_CODE.to_string()
        } else {
            format!("{} {}", path_prefix, ACTANT_CODE)
        };
        usl.push_str(&next_prefix);
        usl.push(' ');
        usl.push_str(&self.actor.to_string());

        if let Some(dependant) = &self.dependant {
            usl.push_str(" > ");
            usl.push_str(&dependant.generate(next_role, &next_prefix));
        }
        if let Some(independant) = &self.independant {
            usl.push_str(" > ");
            usl.push_str(&independant.generate(next_role, &next_prefix));
        }
        usl
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
    fn test_parse_minimal_actant() {
        let (actant, end, role) = Actant::parse("E:A:. (E:)", 0, &[], 0).unwrap();
        assert_eq!(end, 10);
        assert!(role.is_none());
        assert!(actant.dependant().is_none());
        assert!(actant.independant().is_none());
    }

    #[test]
    fn test_parse_nested_dependant() {
        let input = "E:A:. (E:) > E:A:. E:A:. (U:)";
        let (actant, end, _) = Actant::parse(input, 0, &[], 0).unwrap();
        assert_eq!(end, input.len());
        assert!(actant.dependant().is_some());
    }

    #[test]
    fn test_parse_independant_branch() {
        let input = "E:A:. (E:) > E:A:. E:U:. (U:)";
        let (actant, _, _) = Actant::parse(input, 0, &[], 0).unwrap();
        assert!(actant.dependant().is_none());
        assert!(actant.independant().is_some());
    }

    #[test]
    fn test_duplicate_dependant_is_a_style_violation() {
        let input = "E:A:. (E:) > E:A:. E:A:. (U:) > E:A:. E:A:. (A:)";
        assert_matches!(
            Actant::parse(input, 0, &[], 0),
            Err(ParseError::Style(StyleError::DuplicateDependant))
        );
    }

    #[test]
    fn test_branch_with_stale_path_is_left_unconsumed() {
        // the second branch repeats the root path instead of extending it
        let input = "E:A:. (E:) > E:A:. (U:)";
        let (_, end, _) = Actant::parse(input, 0, &[], 0).unwrap();
        assert_eq!(end, 10);
    }

    #[test]
    fn test_role_marker_on_nested_node() {
        let input = "E:A:. (E:) > ! E:A:. E:U:. (U:)";
        let (_, _, role) = Actant::parse(input, 0, &[], 0).unwrap();
        let role = role.unwrap();
        assert_eq!(role.len(), 2);
        assert_eq!(role[1].usl(), "E:U:.");
    }

    #[test]
    fn test_two_role_markers_conflict() {
        let input = "! E:A:. (E:) > ! E:A:. E:U:. (U:)";
        assert_matches!(
            Actant::parse(input, 0, &[], 0),
            Err(ParseError::Style(StyleError::ConflictingRoleMarkers))
        );
    }

    #[test]
    fn test_check_style_descends_children() {
        let input = "E:A:. (E:) > E:A:. E:A:. (U:)";
        let (actant, _, _) = Actant::parse(input, 0, &[], 0).unwrap();
        assert!(actant.check_style(&[code("E:A:.")]));
        assert!(actant.check_style(&[code("E:A:."), code("E:A:.")]));
        assert!(!actant.check_style(&[code("E:A:."), code("E:U:.")]));
        assert!(!actant.check_style(&[code("E:U:.")]));
    }

    #[test]
    fn test_generate_writes_full_paths() {
        let input = "E:A:. (E:) > E:A:. E:U:. (U:)";
        let (actant, _, _) = Actant::parse(input, 0, &[], 0).unwrap();
        assert_eq!(actant.generate(None, ""), "E:A:. (E:) > E:A:. E:U:. (U:)");
    }
}
