//! Morpheme: the atomic USL unit and its seven-layer tokenizer
//!
//! Layers are numbered 0 (innermost) to 6 (outermost); each owns one
//! terminator character. A morpheme at layer 0 is a single reserved base
//! letter; at layer 1 it is either a reserved literal or a compound of
//! layer-0 morphemes; at higher layers it is a compound of one to three
//! morphemes of the layer below. Every layer closes with its terminator and
//! may repeat through `+`-infixed alternation, which marks the morpheme as
//! paradigmatic.

use crate::grammar::error::{ParseError, ParseResult};
use crate::utils::scan;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Terminator character for each layer 0..=6.
pub const LAYER_MARKS: [char; 7] = [':', '.', '-', '\'', ',', '_', ';'];

/// Reserved singular layer-0 base letters, in canonical rank order.
const SINGULAR_BASES: &str = "EUASBT";

/// Reserved paradigmatic layer-0 base letters.
const PARADIGM_BASES: &str = "MOFI";

/// Infix alternation marker.
const ALTERNATION_MARK: char = '+';

/// Cap on `+`-alternation repetitions within one morpheme.
const MAX_ALTERNATION_BRANCHES: usize =
    crate::config::compile_time::grammar::MAX_ALTERNATION_BRANCHES;

/// Layer-1 literals with their three-part canonical codes.
///
/// The set is prefix-free, so first-match scanning is unambiguous; the
/// two-letter literals are listed first anyway.
const LAYER_1_LITERALS: [(&str, &str); 25] = [
    ("wo", "U:U:"),
    ("wa", "U:A:"),
    ("wu", "A:U:"),
    ("we", "A:A:"),
    ("y", "U:S:"),
    ("o", "U:B:"),
    ("e", "U:T:"),
    ("u", "A:S:"),
    ("a", "A:B:"),
    ("i", "A:T:"),
    ("j", "S:U:"),
    ("g", "S:A:"),
    ("s", "S:S:"),
    ("b", "S:B:"),
    ("t", "S:T:"),
    ("h", "B:U:"),
    ("c", "B:A:"),
    ("k", "B:S:"),
    ("m", "B:B:"),
    ("n", "B:T:"),
    ("p", "T:U:"),
    ("x", "T:A:"),
    ("d", "T:S:"),
    ("f", "T:B:"),
    ("l", "T:T:"),
];

/// An atomic USL unit, identified by its canonical textual form.
///
/// Immutable once constructed; equality and hashing are by content only.
#[derive(Debug, Clone, Serialize)]
pub struct Morpheme {
    content: String,
    layer: u8,
    paradigm: bool,
}

impl Morpheme {
    /// Parse one morpheme starting at `offset`, returning it with the
    /// offset just past the consumed text.
    ///
    /// Layers are tried from 6 down to 0; the first success wins. Total
    /// failure reports the deepest offset reached across all layers.
    pub fn parse(input: &str, offset: usize) -> ParseResult<(Morpheme, usize)> {
        let mut deepest = ParseError::mismatch("morpheme", offset);

        for layer in (0..=6u8).rev() {
            match parse_at_layer(input, offset, layer) {
                Ok((end, paradigm)) => {
                    let morpheme = Morpheme {
                        content: input[offset..end].to_string(),
                        layer,
                        paradigm,
                    };
                    return Ok((morpheme, end));
                }
                Err(err) if err.is_recoverable() => deepest = deepest.prefer_deeper(err),
                Err(err) => return Err(err),
            }
        }

        Err(deepest)
    }

    /// Parse a complete input as a single morpheme, rejecting trailing text.
    pub fn from_usl(usl: &str) -> ParseResult<Morpheme> {
        let (morpheme, end) = Morpheme::parse(usl, 0)?;
        if end != usl.len() {
            return Err(ParseError::TrailingInput { offset: end });
        }
        Ok(morpheme)
    }

    /// Canonical textual form; exactly the substring consumed at parse time.
    pub fn usl(&self) -> &str {
        &self.content
    }

    /// Layer 0..=6, recovered from the trailing terminator.
    pub fn layer(&self) -> u8 {
        self.layer
    }

    /// True iff the morpheme carries an infix alternation list.
    pub fn is_paradigm(&self) -> bool {
        self.paradigm
    }
}

impl fmt::Display for Morpheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

impl PartialEq for Morpheme {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
    }
}

impl Eq for Morpheme {}

impl Hash for Morpheme {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.content.hash(state);
    }
}

impl PartialOrd for Morpheme {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dictionary order on morphemes: layer first, then the canonical key, with
/// raw content breaking canonical-key ties so the order stays total.
impl Ord for Morpheme {
    fn cmp(&self, other: &Self) -> Ordering {
        canonical_key(self)
            .cmp(&canonical_key(other))
            .then_with(|| self.content.cmp(&other.content))
    }
}

// Rank floor placing the six singular bases above every plain character.
const BASE_RANK_FLOOR: u32 = 0x20_0000;

// Rank closing an exhausted key: a strict prefix sorts after its extension.
const END_RANK: u32 = u32::MAX;

/// Sortable canonical key for a morpheme.
///
/// Primary component: the layer. Secondary: the content with every layer-1
/// literal substituted by its canonical code, each character mapped to its
/// rank (singular bases rank by their `EUASBT` position above all other
/// characters, which rank by raw code), closed by an end sentinel so that a
/// shorter key sorts after one it prefixes.
pub fn canonical_key(morpheme: &Morpheme) -> (u8, Vec<u32>) {
    let mut key = Vec::with_capacity(morpheme.content.len() + 1);
    let mut rest = morpheme.content.as_str();

    while !rest.is_empty() {
        if let Some((literal, code)) = LAYER_1_LITERALS
            .iter()
            .find(|(literal, _)| rest.starts_with(*literal))
        {
            key.extend(code.chars().map(char_rank));
            rest = &rest[literal.len()..];
        } else if let Some(ch) = rest.chars().next() {
            key.push(char_rank(ch));
            rest = &rest[ch.len_utf8()..];
        }
    }

    key.push(END_RANK);
    (morpheme.layer, key)
}

fn char_rank(ch: char) -> u32 {
    match SINGULAR_BASES.find(ch) {
        Some(index) => BASE_RANK_FLOOR + index as u32,
        None => ch as u32,
    }
}

/// Parse one morpheme constrained to `layer`, returning the end offset and
/// the paradigm flag.
fn parse_at_layer(input: &str, offset: usize, layer: u8) -> ParseResult<(usize, bool)> {
    let mark = LAYER_MARKS[layer as usize];
    let mut paradigm = false;
    let mut end = offset;
    let mut matched_base = false;

    if layer == 0 {
        match scan::char_at(input, offset) {
            Some(ch) if SINGULAR_BASES.contains(ch) || PARADIGM_BASES.contains(ch) => {
                end = offset + ch.len_utf8();
                matched_base = true;
            }
            _ => return Err(ParseError::mismatch("morpheme", offset)),
        }
    } else if layer == 1 {
        for (literal, _) in LAYER_1_LITERALS {
            if let Some(next) = scan::match_literal(input, offset, literal) {
                end = next;
                matched_base = true;
                break;
            }
        }
    }

    if !matched_base {
        // Compound: one mandatory sub-morpheme of the layer below, then up
        // to two more, greedy, keeping what matched so far on failure.
        let (sub_end, sub_paradigm) = parse_at_layer(input, end, layer - 1)?;
        end = sub_end;
        paradigm |= sub_paradigm;

        for _ in 0..2 {
            match parse_at_layer(input, end, layer - 1) {
                Ok((sub_end, sub_paradigm)) => {
                    end = sub_end;
                    paradigm |= sub_paradigm;
                }
                Err(err) if err.is_recoverable() => break,
                Err(err) => return Err(err),
            }
        }
    }

    end = scan::match_char(input, end, mark).ok_or(ParseError::Mismatch {
        production: "morpheme",
        offset: end,
    })?;

    // Infix alternation list: each repetition must parse at this same layer,
    // and a malformed branch fails the whole morpheme at this layer.
    let mut branches = 0usize;
    while let Some(after_mark) = scan::match_char(input, end, ALTERNATION_MARK) {
        branches += 1;
        if branches > MAX_ALTERNATION_BRANCHES {
            return Err(ParseError::LimitExceeded {
                what: "alternation branches",
                limit: MAX_ALTERNATION_BRANCHES,
            });
        }
        let (sub_end, _) = parse_at_layer(input, after_mark, layer)?;
        end = sub_end;
        paradigm = true;
    }

    Ok((end, paradigm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn morpheme(usl: &str) -> Morpheme {
        Morpheme::from_usl(usl).unwrap()
    }

    #[test]
    fn test_layer_0_singular() {
        let (m, end) = Morpheme::parse("E:", 0).unwrap();
        assert_eq!(m.usl(), "E:");
        assert_eq!(m.layer(), 0);
        assert!(!m.is_paradigm());
        assert_eq!(end, 2);
    }

    #[test]
    fn test_layer_0_paradigmatic_base_is_not_a_paradigm() {
        let m = morpheme("M:");
        assert_eq!(m.layer(), 0);
        assert!(!m.is_paradigm());
    }

    #[test]
    fn test_layer_0_requires_terminator() {
        assert_matches!(
            Morpheme::parse("E", 0),
            Err(ParseError::Mismatch { .. })
        );
        assert_matches!(
            Morpheme::parse("E.", 0),
            Err(ParseError::Mismatch { .. })
        );
    }

    #[test]
    fn test_layer_1_literal() {
        let (m, end) = Morpheme::parse("wa.", 0).unwrap();
        assert_eq!(m.usl(), "wa.");
        assert_eq!(m.layer(), 1);
        assert_eq!(end, 3);
    }

    #[test]
    fn test_layer_1_compound_of_bases() {
        let m = morpheme("E:S:.");
        assert_eq!(m.layer(), 1);
        assert_eq!(m.usl(), "E:S:.");
    }

    #[test]
    fn test_layer_2_slot_code() {
        let (m, end) = Morpheme::parse("E:.n.-", 0).unwrap();
        assert_eq!(m.layer(), 2);
        assert_eq!(m.usl(), "E:.n.-");
        assert_eq!(end, 6);
    }

    #[test]
    fn test_parse_stops_at_unconsumed_tail() {
        let (m, end) = Morpheme::parse("E:S:. (", 0).unwrap();
        assert_eq!(m.usl(), "E:S:.");
        assert_eq!(end, 5);
    }

    #[test]
    fn test_alternation_sets_paradigm() {
        let (m, end) = Morpheme::parse("E:+U:", 0).unwrap();
        assert_eq!(m.usl(), "E:+U:");
        assert_eq!(m.layer(), 0);
        assert!(m.is_paradigm());
        assert_eq!(end, 5);
    }

    #[test]
    fn test_nested_alternation_propagates_paradigm() {
        // the alternation sits on the inner layer-0 morphemes
        let m = morpheme("E:+U:S:.");
        assert_eq!(m.layer(), 1);
        assert!(m.is_paradigm());
    }

    #[test]
    fn test_malformed_alternation_branch_fails() {
        assert_matches!(Morpheme::from_usl("E:+"), Err(ParseError::Mismatch { .. }));
    }

    #[test]
    fn test_from_usl_rejects_trailing_input() {
        assert_matches!(
            Morpheme::from_usl("E: "),
            Err(ParseError::TrailingInput { offset: 2 })
        );
    }

    #[test]
    fn test_total_failure_reports_deepest_offset() {
        let err = Morpheme::parse("zzz", 0).unwrap_err();
        assert_matches!(err, ParseError::Mismatch { .. });
    }

    #[test]
    fn test_equality_by_content_only() {
        assert_eq!(morpheme("E:"), morpheme("E:"));
        assert_ne!(morpheme("E:"), morpheme("U:"));
    }

    #[test]
    fn test_canonical_order_prefers_base_rank() {
        // wo -> U:U: and wa -> U:A:; U ranks above A, so wo sorts after wa?
        // No: ranks follow EUASBT, U=1 < A=2, so wo sorts before wa.
        assert!(morpheme("wo.") < morpheme("wa."));
        // m -> B:B: and n -> B:T:; B=4 < T=5
        assert!(morpheme("m.") < morpheme("n."));
    }

    #[test]
    fn test_canonical_order_is_layer_first() {
        assert!(morpheme("T:") < morpheme("wo."));
        assert!(morpheme("wo.") < morpheme("E:.n.-"));
    }

    #[test]
    fn test_canonical_tie_breaks_on_content() {
        // "s." substitutes to the same key as "S:S:."; ordering must still
        // be strict and its two directions opposite
        let a = morpheme("s.");
        let b = morpheme("S:S:.");
        assert_ne!(a, b);
        assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
    }

    #[test]
    fn test_canonical_order_is_deterministic() {
        let mut first = vec![morpheme("n."), morpheme("wo."), morpheme("E:"), morpheme("m.")];
        let mut second = first.clone();
        second.reverse();
        first.sort();
        second.sort();
        assert_eq!(first, second);
        assert_eq!(first[0], morpheme("E:"));
    }
}
