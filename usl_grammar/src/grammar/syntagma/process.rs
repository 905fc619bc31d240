//! Process node: the verbal root of a function tree

use crate::grammar::error::{ParseError, ParseResult, StyleError};
use crate::grammar::lexeme::Lexeme;
use crate::grammar::morpheme::Morpheme;
use crate::grammar::syntagma::{
    check_depth, merge_role, parse_marker, parse_path, path_extension, Actant, Quality,
    BRANCH_SEPARATOR,
};
use crate::utils::scan;
use serde::Serialize;
use std::collections::BTreeMap;

/// Type codes of a process root, indexed by valence minus one.
pub const VALENCE_CODES: [&str; 3] = ["E:S:.", "E:T:.", "E:B:."];

// ============================================================================
// FunctionSlot
// ============================================================================

/// The eight participant slots a process may attach, in their fixed
/// serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionSlot {
    Initiator,
    Interactant,
    Recipient,
    Time,
    Location,
    Intention,
    Manner,
    Cause,
}

impl FunctionSlot {
    pub const ALL: [FunctionSlot; 8] = [
        FunctionSlot::Initiator,
        FunctionSlot::Interactant,
        FunctionSlot::Recipient,
        FunctionSlot::Time,
        FunctionSlot::Location,
        FunctionSlot::Intention,
        FunctionSlot::Manner,
        FunctionSlot::Cause,
    ];

    /// The grammatical code addressing this slot.
    pub fn code(self) -> &'static str {
        match self {
            FunctionSlot::Initiator => "E:.n.-",
            FunctionSlot::Interactant => "E:.d.-",
            FunctionSlot::Recipient => "E:.k.-",
            FunctionSlot::Time => "E:.t.-",
            FunctionSlot::Location => "E:.l.-",
            FunctionSlot::Intention => "E:.m.-",
            FunctionSlot::Manner => "E:.f.-",
            FunctionSlot::Cause => "E:.s.-",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FunctionSlot::Initiator => "initiator",
            FunctionSlot::Interactant => "interactant",
            FunctionSlot::Recipient => "recipient",
            FunctionSlot::Time => "time",
            FunctionSlot::Location => "location",
            FunctionSlot::Intention => "intention",
            FunctionSlot::Manner => "manner",
            FunctionSlot::Cause => "cause",
        }
    }

    pub fn from_code(code: &str) -> Option<FunctionSlot> {
        Self::ALL.into_iter().find(|slot| slot.code() == code)
    }

    pub fn from_name(name: &str) -> Option<FunctionSlot> {
        Self::ALL.into_iter().find(|slot| slot.name() == name)
    }
}

// ============================================================================
// Process
// ============================================================================

/// The root node of a verbal word: a valence, an actor lexeme and up to
/// eight participant slots, each filled by an actant subtree addressed by
/// the slot code instead of the generic actant code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Process {
    valence: u8,
    actor: Lexeme,
    slots: BTreeMap<FunctionSlot, Actant>,
}

impl Process {
    /// Parse a process rooted at `offset`. The root path is a single
    /// valence code.
    pub(crate) fn parse(
        input: &str,
        offset: usize,
        depth: usize,
    ) -> ParseResult<(Process, usize, Option<Vec<Morpheme>>)> {
        check_depth(depth)?;

        let (marked, cursor) = parse_marker(input, offset);
        let cursor = scan::consume_blanks(input, cursor);
        let (path, cursor) = parse_path(input, cursor)?;
        let cursor = scan::consume_blanks(input, cursor);

        let head = path_extension(&path, &[])
            .ok_or_else(|| ParseError::mismatch("process type code", offset))?;
        let valence_index = VALENCE_CODES
            .iter()
            .position(|code| *code == head.usl())
            .ok_or_else(|| ParseError::mismatch("process type code", offset))?;

        let mut role = if marked { Some(path.clone()) } else { None };

        let (actor, mut cursor) = Lexeme::parse(input, cursor)?;

        let mut slots: BTreeMap<FunctionSlot, Actant> = BTreeMap::new();
        loop {
            match Self::parse_slot(input, cursor, depth) {
                Ok((slot, actant, slot_role, end)) => {
                    if slots.contains_key(&slot) {
                        return Err(StyleError::DuplicateFunctionSlot { slot: slot.name() }.into());
                    }
                    slots.insert(slot, actant);
                    role = merge_role(role, slot_role)?;
                    cursor = end;
                }
                Err(err) if err.is_recoverable() => break,
                Err(err) => return Err(err),
            }
        }

        let process = Process {
            valence: (valence_index + 1) as u8,
            actor,
            slots,
        };
        Ok((process, cursor, role))
    }

    /// Parse one `> <slot-code> <actor> ...` branch with its dependant and
    /// independant children.
    fn parse_slot(
        input: &str,
        offset: usize,
        depth: usize,
    ) -> ParseResult<(FunctionSlot, Actant, Option<Vec<Morpheme>>, usize)> {
        let cursor = scan::consume_blanks(input, offset);
        let cursor = scan::match_char(input, cursor, BRANCH_SEPARATOR)
            .ok_or_else(|| ParseError::mismatch("branch separator", cursor))?;
        let cursor = scan::consume_blanks(input, cursor);

        let (marked, cursor) = parse_marker(input, cursor);
        let cursor = scan::consume_blanks(input, cursor);

        let path_start = cursor;
        let (path, cursor) = parse_path(input, cursor)?;
        let cursor = scan::consume_blanks(input, cursor);

        let head = path_extension(&path, &[])
            .ok_or_else(|| ParseError::mismatch("function slot code", path_start))?;
        let slot = FunctionSlot::from_code(head.usl())
            .ok_or_else(|| ParseError::mismatch("function slot code", path_start))?;

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

        let actant = Actant::new(actor, dependant, independant);
        Ok((slot, actant, role, cursor))
    }

    /// Valence of the process, between 1 and 3.
    pub fn valence(&self) -> u8 {
        self.valence
    }

    /// The type code corresponding to this process's valence.
    pub fn valence_code(&self) -> &'static str {
        VALENCE_CODES[usize::from(self.valence) - 1]
    }

    pub fn actor(&self) -> &Lexeme {
        &self.actor
    }

    pub fn slot(&self, slot: FunctionSlot) -> Option<&Actant> {
        self.slots.get(&slot)
    }

    pub fn slots(&self) -> impl Iterator<Item = (FunctionSlot, &Actant)> {
        self.slots.iter().map(|(slot, actant)| (*slot, actant))
    }

    pub(crate) fn from_parts(
        valence: u8,
        actor: Lexeme,
        slots: BTreeMap<FunctionSlot, Actant>,
    ) -> Process {
        Process {
            valence,
            actor,
            slots,
        }
    }

    /// Whether `path` addresses the root or a node under one of the slots.
    pub fn check_style(&self, path: &[Morpheme]) -> bool {
        let Some(head) = path.first() else {
            return false;
        };
        if head.usl() == self.valence_code() {
            return path.len() == 1;
        }
        let Some(slot) = FunctionSlot::from_code(head.usl()) else {
            return false;
        };
        match self.slots.get(&slot) {
            Some(actant) => path.len() == 1 || actant.check_children(&path[1..]),
            None => false,
        }
    }

    pub(crate) fn generate(&self, role: Option<&[Morpheme]>) -> String {
        let mut usl = String::new();
        if let Some(path) = role {
            if path.len() == 1 && path[0].usl() == self.valence_code() {
                usl.push_str("! ");
            }
        }
        usl.push_str(self.valence_code());
        usl.push(' ');
        usl.push_str(&self.actor.to_string());

        for (slot, actant) in self.slots.iter() {
            usl.push_str(" > ");

            let mut next_role = None;
            if let Some(path) = role {
                if path[0].usl() == slot.code() {
                    if path.len() == 1 {
                        usl.push_str("! ");
                    } else {
                        next_role = Some(&path[1..]);
                    }
                }
            }

            usl.push_str(slot.code());
            usl.push(' ');
            usl.push_str(&actant.actor().to_string());

            if let Some(dependant) = actant.dependant() {
                usl.push_str(" > ");
                usl.push_str(&dependant.generate(next_role, slot.code()));
            }
            if let Some(independant) = actant.independant() {
                usl.push_str(" > ");
                usl.push_str(&independant.generate(next_role, slot.code()));
            }
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
    fn test_slot_codes_are_distinct_and_ordered() {
        for window in FunctionSlot::ALL.windows(2) {
            assert!(window[0] < window[1]);
        }
        for slot in FunctionSlot::ALL {
            assert_eq!(FunctionSlot::from_code(slot.code()), Some(slot));
            assert_eq!(FunctionSlot::from_name(slot.name()), Some(slot));
        }
    }

    #[test]
    fn test_parse_minimal_process() {
        let (process, end, role) = Process::parse("E:S:. (E:)(U:)", 0, 0).unwrap();
        assert_eq!(process.valence(), 1);
        assert_eq!(process.valence_code(), "E:S:.");
        assert_eq!(end, 14);
        assert!(role.is_none());
        assert_eq!(process.slots().count(), 0);
    }

    #[test]
    fn test_parse_marked_process_captures_role() {
        let (_, _, role) = Process::parse("! E:S:. (E:)", 0, 0).unwrap();
        let role = role.unwrap();
        assert_eq!(role.len(), 1);
        assert_eq!(role[0].usl(), "E:S:.");
    }

    #[test]
    fn test_parse_process_with_slots() {
        let input = "E:T:. (E:) > E:.n.- (A:) > E:.k.- (B:)";
        let (process, end, _) = Process::parse(input, 0, 0).unwrap();
        assert_eq!(process.valence(), 2);
        assert_eq!(end, input.len());
        assert!(process.slot(FunctionSlot::Initiator).is_some());
        assert!(process.slot(FunctionSlot::Recipient).is_some());
        assert!(process.slot(FunctionSlot::Time).is_none());
    }

    #[test]
    fn test_slot_children_extend_the_slot_path() {
        let input = "E:S:. (E:) > E:.n.- (A:) > E:.n.- E:A:. (U:) > E:.n.- E:U:. (T:)";
        let (process, end, _) = Process::parse(input, 0, 0).unwrap();
        assert_eq!(end, input.len());
        let slot = process.slot(FunctionSlot::Initiator).unwrap();
        assert!(slot.dependant().is_some());
        assert!(slot.independant().is_some());
    }

    #[test]
    fn test_duplicate_slot_is_a_style_violation() {
        let input = "E:S:. (E:) > E:.n.- (A:) > E:.n.- (B:)";
        assert_matches!(
            Process::parse(input, 0, 0),
            Err(ParseError::Style(StyleError::DuplicateFunctionSlot {
                slot: "initiator"
            }))
        );
    }

    #[test]
    fn test_non_valence_root_is_recoverable() {
        let err = Process::parse("E:A:. (E:)", 0, 0).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_check_style_accepts_root_and_occupied_slots() {
        let input = "E:S:. (E:) > E:.n.- (A:)";
        let (process, _, _) = Process::parse(input, 0, 0).unwrap();
        assert!(process.check_style(&[code("E:S:.")]));
        assert!(process.check_style(&[code("E:.n.-")]));
        assert!(!process.check_style(&[code("E:.k.-")]));
        assert!(!process.check_style(&[code("E:S:."), code("E:A:.")]));
        assert!(!process.check_style(&[code("E:T:.")]));
    }

    #[test]
    fn test_generate_orders_slots_canonically() {
        let input = "E:S:. (E:) > E:.k.- (B:) > E:.n.- (A:)";
        let (process, _, _) = Process::parse(input, 0, 0).unwrap();
        assert_eq!(
            process.generate(None),
            "E:S:. (E:) > E:.n.- (A:) > E:.k.- (B:)"
        );
    }
}
