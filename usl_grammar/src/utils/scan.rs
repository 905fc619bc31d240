//! Character-level input helpers shared by every grammar production
//!
//! All productions walk a `&str` with a byte offset and report how far they
//! got. The helpers here never panic on out-of-range offsets; an offset past
//! the end simply fails to match. Offsets returned by these functions always
//! land on character boundaries.

/// Advance past a run of whitespace, returning the new offset.
pub fn consume_blanks(input: &str, offset: usize) -> usize {
    let mut offset = offset;
    while let Some(ch) = char_at(input, offset) {
        if !ch.is_whitespace() {
            break;
        }
        offset += ch.len_utf8();
    }
    offset
}

/// The character starting at `offset`, if any.
pub fn char_at(input: &str, offset: usize) -> Option<char> {
    input.get(offset..).and_then(|rest| rest.chars().next())
}

/// Match a single expected character, returning the offset just past it.
pub fn match_char(input: &str, offset: usize, expected: char) -> Option<usize> {
    match char_at(input, offset) {
        Some(ch) if ch == expected => Some(offset + ch.len_utf8()),
        _ => None,
    }
}

/// Match an exact literal, returning the offset just past it.
pub fn match_literal(input: &str, offset: usize, literal: &str) -> Option<usize> {
    if input.get(offset..)?.starts_with(literal) {
        Some(offset + literal.len())
    } else {
        None
    }
}

/// Parse a non-empty run of ASCII digits as a u64.
///
/// Returns the value and the offset just past the run; fails on an empty run
/// or on overflow.
pub fn take_digits(input: &str, offset: usize) -> Option<(u64, usize)> {
    let mut value: u64 = 0;
    let mut end = offset;

    while let Some(ch) = char_at(input, end) {
        let Some(digit) = ch.to_digit(10) else { break };
        value = value.checked_mul(10)?.checked_add(u64::from(digit))?;
        end += ch.len_utf8();
    }

    if end == offset {
        None
    } else {
        Some((value, end))
    }
}
