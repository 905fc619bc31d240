//! Quality node: a leaf qualification

use crate::grammar::error::{ParseError, ParseResult};
use crate::grammar::lexeme::Lexeme;
use crate::grammar::morpheme::Morpheme;
use crate::grammar::syntagma::{
    check_depth, parse_marker, parse_path, path_extension, QUALITY_CODE,
};
use crate::utils::scan;
use serde::Serialize;

/// A quality: a leaf node carrying only its actor lexeme, addressed by the
/// `E:U:.` code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Quality {
    actor: Lexeme,
}

impl Quality {
    pub(crate) fn new(actor: Lexeme) -> Quality {
        Quality { actor }
    }

    pub(crate) fn parse(
        input: &str,
        offset: usize,
        prefix: &[Morpheme],
        depth: usize,
    ) -> ParseResult<(Quality, usize, Option<Vec<Morpheme>>)> {
        check_depth(depth)?;

        let (marked, cursor) = parse_marker(input, offset);
        let cursor = scan::consume_blanks(input, cursor);

        let path_start = cursor;
        let (path, cursor) = parse_path(input, cursor)?;
        let cursor = scan::consume_blanks(input, cursor);

        let head = path_extension(&path, prefix)
            .ok_or_else(|| ParseError::mismatch("quality code", path_start))?;
        if head.usl() != QUALITY_CODE {
            return Err(ParseError::mismatch("quality code", path_start));
        }

        let role = if marked { Some(path) } else { None };

        let (actor, cursor) = Lexeme::parse(input, cursor)?;
        Ok((Quality::new(actor), cursor, role))
    }

    pub fn actor(&self) -> &Lexeme {
        &self.actor
    }

    /// A quality has no children: only the single quality code addresses it.
    pub fn check_style(&self, path: &[Morpheme]) -> bool {
        path.len() == 1 && path[0].usl() == QUALITY_CODE
    }

    pub(crate) fn generate(&self, role: Option<&[Morpheme]>, path_prefix: &str) -> String {
        let mut usl = String::new();
        if let Some(path) = role {
            if path.len() == 1 && path[0].usl() == QUALITY_CODE {
                usl.push_str("! ");
            }
        }
        if !path_prefix.is_empty() {
            usl.push_str(path_prefix);
            usl.push(' ');
        }
        usl.push_str(QUALITY_CODE);
        usl.push(' ');
        usl.push_str(&self.actor.to_string());
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
    fn test_parse_minimal_quality() {
        let (quality, end, role) = Quality::parse("E:U:. (E:)(U:)", 0, &[], 0).unwrap();
        assert_eq!(end, 14);
        assert!(role.is_none());
        assert!(quality.actor().content().is_some());
    }

    #[test]
    fn test_parse_rejects_other_codes() {
        assert_matches!(
            Quality::parse("E:A:. (E:)", 0, &[], 0),
            Err(ParseError::Mismatch { .. })
        );
    }

    #[test]
    fn test_parse_requires_prefix_extension() {
        let prefix = vec![code("E:A:.")];
        assert_matches!(
            Quality::parse("E:U:. (E:)", 0, &prefix, 0),
            Err(ParseError::Mismatch { .. })
        );
        let (_, end, _) = Quality::parse("E:A:. E:U:. (E:)", 0, &prefix, 0).unwrap();
        assert_eq!(end, 16);
    }

    #[test]
    fn test_check_style_is_exact() {
        let (quality, _, _) = Quality::parse("E:U:. (E:)", 0, &[], 0).unwrap();
        assert!(quality.check_style(&[code("E:U:.")]));
        assert!(!quality.check_style(&[code("E:A:.")]));
        assert!(!quality.check_style(&[code("E:U:."), code("E:U:.")]));
        assert!(!quality.check_style(&[]));
    }

    #[test]
    fn test_generate_with_prefix() {
        let (quality, _, _) = Quality::parse("E:U:. (E:)", 0, &[], 0).unwrap();
        assert_eq!(quality.generate(None, "E:.n.-"), "E:.n.- E:U:. (E:)");
        assert_eq!(quality.generate(None, ""), "E:U:. (E:)");
    }
}
