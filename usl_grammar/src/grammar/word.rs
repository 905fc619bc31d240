//! Word: a bracketed syntagmatic-function tree with an optional role

use crate::grammar::error::{ParseError, ParseResult};
use crate::grammar::morpheme::Morpheme;
use crate::grammar::syntagma::SyntagmaticFunction;
use crate::logging::codes;
use crate::utils::scan;
use crate::{log_debug, log_error};
use serde::Serialize;
use std::fmt;

const MAX_INPUT_LENGTH: usize = crate::config::compile_time::grammar::MAX_INPUT_LENGTH;

/// A word: `[` function tree `]`, with at most one node addressed as the
/// word role by a `!` marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Word {
    function: SyntagmaticFunction,
    role_path: Option<Vec<Morpheme>>,
}

impl Word {
    pub(crate) fn from_parts(
        function: SyntagmaticFunction,
        role_path: Option<Vec<Morpheme>>,
    ) -> Word {
        Word {
            function,
            role_path,
        }
    }

    pub fn parse(input: &str, offset: usize) -> ParseResult<(Word, usize)> {
        let cursor = scan::match_char(input, offset, '[')
            .ok_or_else(|| ParseError::mismatch("word", offset))?;
        let (function, cursor, role_path) = SyntagmaticFunction::parse(input, cursor)?;
        let cursor = scan::match_char(input, cursor, ']')
            .ok_or_else(|| ParseError::mismatch("']'", cursor))?;

        Ok((Word::from_parts(function, role_path), cursor))
    }

    /// Parse a word spanning the whole input.
    pub fn from_usl(input: &str) -> ParseResult<Word> {
        if input.len() > MAX_INPUT_LENGTH {
            let err = ParseError::LimitExceeded {
                what: "input length",
                limit: MAX_INPUT_LENGTH,
            };
            log_error!(err.error_code(), "Input rejected before parsing",
                "input_len" => input.len()
            );
            return Err(err);
        }

        match Word::parse(input, 0) {
            Ok((word, end)) if end == input.len() => {
                log_debug!("Word parsed",
                    "consumed" => end
                );
                Ok(word)
            }
            Ok((_, end)) => {
                let err = ParseError::TrailingInput { offset: end };
                log_error!(codes::grammar::TRAILING_INPUT, "Word parse left input behind",
                    offset = end
                );
                Err(err)
            }
            Err(err) => {
                if let Some(offset) = err.offset() {
                    log_error!(err.error_code(), "Word parse failed", offset = offset);
                } else {
                    log_error!(err.error_code(), "Word parse failed");
                }
                Err(err)
            }
        }
    }

    pub fn function(&self) -> &SyntagmaticFunction {
        &self.function
    }

    /// The role path captured by the `!` marker, if the word carries one.
    pub fn role_path(&self) -> Option<&[Morpheme]> {
        self.role_path.as_deref()
    }

    /// Whether `path` addresses an existing node of this word's tree.
    pub fn check_style(&self, path: &[Morpheme]) -> bool {
        self.function.check_style(path)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.function.generate(self.role_path.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::error::StyleError;
    use assert_matches::assert_matches;

    fn code(usl: &str) -> Morpheme {
        Morpheme::from_usl(usl).unwrap()
    }

    #[test]
    fn test_parse_marked_process_word() {
        let word = Word::from_usl("[! E:S:. (E:)(U:)]").unwrap();
        let role = word.role_path().unwrap();
        assert_eq!(role.len(), 1);
        assert_eq!(role[0].usl(), "E:S:.");

        assert!(word.check_style(&[code("E:S:.")]));
        assert!(!word.check_style(&[code("E:S:."), code("E:A:.")]));
    }

    #[test]
    fn test_parse_word_without_role() {
        let word = Word::from_usl("[E:U:. (E:)]").unwrap();
        assert!(word.role_path().is_none());
    }

    #[test]
    fn test_two_role_markers_are_a_style_violation() {
        assert_matches!(
            Word::from_usl("[! E:S:. (E:)(U:) > ! E:.n.- (E:)(U:)]"),
            Err(ParseError::Style(StyleError::ConflictingRoleMarkers))
        );
    }

    #[test]
    fn test_missing_brackets_fail() {
        assert_matches!(
            Word::from_usl("E:U:. (E:)"),
            Err(ParseError::Mismatch { offset: 0, .. })
        );
        assert_matches!(
            Word::from_usl("[E:U:. (E:)"),
            Err(ParseError::Mismatch { .. })
        );
    }

    #[test]
    fn test_trailing_input_fails() {
        assert_matches!(
            Word::from_usl("[E:U:. (E:)] "),
            Err(ParseError::TrailingInput { offset: 12 })
        );
    }

    #[test]
    fn test_display_round_trip_is_identity_on_canonical_form() {
        let inputs = [
            "[! E:S:. (E:)(U:)]",
            "[E:S:. (E:) > ! E:.n.- (A:) > E:.n.- E:A:. (U:)]",
            "[E:A:. (E:) > E:A:. E:A:. (U:) > E:A:. E:U:. (B:)]",
            "[E:U:. (E: m2(U: A:))(B:)]",
        ];
        for input in inputs {
            let word = Word::from_usl(input).unwrap();
            assert_eq!(word.to_string(), input);
            assert_eq!(Word::from_usl(&word.to_string()).unwrap(), word);
        }
    }

    #[test]
    fn test_role_survives_regeneration() {
        let word = Word::from_usl("[E:T:. (E:) > E:.d.- (A:) > ! E:.d.- E:U:. (U:)]").unwrap();
        let role = word.role_path().unwrap();
        assert_eq!(role.len(), 2);
        let regenerated = Word::from_usl(&word.to_string()).unwrap();
        assert_eq!(regenerated.role_path(), word.role_path());
    }

    #[test]
    fn test_display_normalizes_whitespace_and_slot_order() {
        let word = Word::from_usl("[E:S:.   (E:)  >  E:.k.- (B:) >\tE:.n.- (A:)]").unwrap();
        assert_eq!(word.to_string(), "[E:S:. (E:) > E:.n.- (A:) > E:.k.- (B:)]");
    }

    #[test]
    fn test_nesting_beyond_depth_limit_fails() {
        let limit = crate::config::compile_time::grammar::MAX_PARSE_DEPTH;
        let mut input = String::from("[");
        let mut path = String::new();
        for level in 0..=limit {
            if level > 0 {
                input.push_str(" > ");
                path.push(' ');
            }
            path.push_str("E:A:.");
            input.push_str(&path);
            input.push_str(" (E:)");
        }
        input.push(']');

        assert_matches!(
            Word::from_usl(&input),
            Err(ParseError::DepthExceeded { .. })
        );
    }

    #[test]
    fn test_oversized_input_is_rejected() {
        let limit = crate::config::compile_time::grammar::MAX_INPUT_LENGTH;
        let input = "E".repeat(limit + 1);
        assert_matches!(
            Word::from_usl(&input),
            Err(ParseError::LimitExceeded {
                what: "input length",
                ..
            })
        );
    }

    #[test]
    fn test_role_on_slot_checks_style() {
        let word = Word::from_usl("[E:S:. (E:) > E:.n.- (A:) > E:.n.- E:U:. (U:)]").unwrap();
        assert!(word.check_style(&[code("E:.n.-")]));
        assert!(word.check_style(&[code("E:.n.-"), code("E:U:.")]));
        assert!(!word.check_style(&[code("E:.n.-"), code("E:A:.")]));
        assert!(!word.check_style(&[code("E:.d.-")]));
    }
}
