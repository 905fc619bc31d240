//! Lexeme: a flexion paired with an optional content polymorpheme

use crate::grammar::error::{ParseError, ParseResult};
use crate::grammar::polymorpheme::Polymorpheme;
use crate::utils::scan;
use serde::Serialize;
use std::fmt;

/// A lexeme `(<flexion>)` or `(<flexion>)(<content>)`.
///
/// The flexion may be empty; the content, when its parentheses are written,
/// must not be. The two pairs are contiguous: no blanks between `)` and `(`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Lexeme {
    flexion: Polymorpheme,
    content: Option<Polymorpheme>,
}

impl Lexeme {
    pub fn new(flexion: Polymorpheme, content: Option<Polymorpheme>) -> Self {
        Self { flexion, content }
    }

    pub fn parse(input: &str, offset: usize) -> ParseResult<(Lexeme, usize)> {
        let cursor = scan::match_char(input, offset, '(')
            .ok_or_else(|| ParseError::mismatch("lexeme", offset))?;
        let (flexion, cursor) = Polymorpheme::parse_flexion(input, cursor)?;
        let cursor = scan::match_char(input, cursor, ')')
            .ok_or_else(|| ParseError::mismatch("')'", cursor))?;

        let (content, cursor) = match scan::match_char(input, cursor, '(') {
            Some(inner) => {
                let (content, end) = Polymorpheme::parse(input, inner)?;
                let end = scan::match_char(input, end, ')')
                    .ok_or_else(|| ParseError::mismatch("')'", end))?;
                (Some(content), end)
            }
            None => (None, cursor),
        };

        Ok((Self::new(flexion, content), cursor))
    }

    /// Parse a lexeme spanning the whole input.
    pub fn from_usl(input: &str) -> ParseResult<Lexeme> {
        let (lexeme, end) = Self::parse(input, 0)?;
        if end != input.len() {
            return Err(ParseError::TrailingInput { offset: end });
        }
        Ok(lexeme)
    }

    pub fn flexion(&self) -> &Polymorpheme {
        &self.flexion
    }

    pub fn content(&self) -> Option<&Polymorpheme> {
        self.content.as_ref()
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.flexion)?;
        if let Some(content) = &self.content {
            if !content.is_empty() {
                write!(f, "({})", content)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_flexion_and_content() {
        let (lexeme, end) = Lexeme::parse("(E:)(U:)", 0).unwrap();
        assert_eq!(lexeme.flexion().constant().len(), 1);
        assert!(lexeme.content().is_some());
        assert_eq!(end, 8);
    }

    #[test]
    fn test_parse_flexion_only() {
        let (lexeme, end) = Lexeme::parse("(E: m1(U:))", 0).unwrap();
        assert!(lexeme.content().is_none());
        assert_eq!(end, 11);
    }

    #[test]
    fn test_parse_empty_flexion() {
        let (lexeme, _) = Lexeme::parse("()(A:)", 0).unwrap();
        assert!(lexeme.flexion().is_empty());
        assert!(lexeme.content().is_some());
    }

    #[test]
    fn test_empty_content_parens_fail() {
        assert_matches!(Lexeme::parse("(E:)()", 0), Err(ParseError::Mismatch { .. }));
    }

    #[test]
    fn test_content_parens_must_be_contiguous() {
        // with a blank before "(U:)", the lexeme is flexion-only
        let (lexeme, end) = Lexeme::parse("(E:) (U:)", 0).unwrap();
        assert!(lexeme.content().is_none());
        assert_eq!(end, 4);
    }

    #[test]
    fn test_from_usl_rejects_trailing_input() {
        assert_matches!(
            Lexeme::from_usl("(E:)x"),
            Err(ParseError::TrailingInput { offset: 4 })
        );
    }

    #[test]
    fn test_round_trip() {
        let lexeme = Lexeme::from_usl("(E: m2(U: A:))(B:)").unwrap();
        assert_eq!(lexeme.to_string(), "(E: m2(U: A:))(B:)");
    }
}
