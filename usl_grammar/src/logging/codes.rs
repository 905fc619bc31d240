//! Consolidated error codes and classification system
//!
//! Single source of truth for all error and success codes, their metadata,
//! and classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Grammar mismatch codes (recoverable, drive alternation)
pub mod grammar {
    use super::Code;

    pub const PRODUCTION_MISMATCH: Code = Code::new("E040");
    pub const TRAILING_INPUT: Code = Code::new("E041");
    pub const INPUT_TOO_LARGE: Code = Code::new("E042");
    pub const MAX_RECURSION_DEPTH: Code = Code::new("E043");
}

/// Style violation codes (non-recoverable)
pub mod style {
    use super::Code;

    pub const CONFLICTING_ROLE_MARKERS: Code = Code::new("E060");
    pub const INVALID_ROLE_PATH: Code = Code::new("E061");
    pub const DUPLICATE_DEPENDANT: Code = Code::new("E062");
    pub const DUPLICATE_INDEPENDANT: Code = Code::new("E063");
    pub const DUPLICATE_FUNCTION_SLOT: Code = Code::new("E064");
}

/// Reconstruction incompatibility codes (recompose boundary)
pub mod rebuild {
    use super::Code;

    pub const MISSING_FIELD: Code = Code::new("E070");
    pub const FIELD_TYPE_MISMATCH: Code = Code::new("E071");
    pub const UNIT_TAG_MISMATCH: Code = Code::new("E072");
    pub const INCONSISTENT_FIELD: Code = Code::new("E073");
    pub const UNKNOWN_SLOT_NAME: Code = Code::new("E074");
    pub const REPARSE_FAILURE: Code = Code::new("E075");
}

/// Translation store codes
pub mod translation {
    use super::Code;

    pub const MISSING_TRANSLATION: Code = Code::new("E080");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const PARSE_COMPLETE: Code = Code::new("I002");
    pub const SERIALIZATION_COMPLETE: Code = Code::new("I003");
    pub const REBUILD_COMPLETE: Code = Code::new("I004");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

static METADATA_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn metadata_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    METADATA_REGISTRY.get_or_init(|| {
        let entries = [
            ErrorMetadata {
                code: "ERR001",
                category: "System",
                severity: Severity::Critical,
                recoverable: false,
                requires_halt: true,
                description: "Internal invariant violated",
                recommended_action: "Report this as a bug with the offending input",
            },
            ErrorMetadata {
                code: "ERR002",
                category: "System",
                severity: Severity::Critical,
                recoverable: false,
                requires_halt: true,
                description: "Logging or configuration initialization failed",
                recommended_action: "Check the runtime logging preferences",
            },
            ErrorMetadata {
                code: "E040",
                category: "Grammar",
                severity: Severity::Medium,
                recoverable: true,
                requires_halt: false,
                description: "A grammar production did not match at the reported offset",
                recommended_action: "Inspect the input near the deepest reported offset",
            },
            ErrorMetadata {
                code: "E041",
                category: "Grammar",
                severity: Severity::Medium,
                recoverable: false,
                requires_halt: false,
                description: "Input continues past the end of a complete expression",
                recommended_action: "Remove the trailing text or split the input",
            },
            ErrorMetadata {
                code: "E042",
                category: "Grammar",
                severity: Severity::High,
                recoverable: false,
                requires_halt: false,
                description: "Input exceeds the maximum accepted length",
                recommended_action: "Split the input into smaller expressions",
            },
            ErrorMetadata {
                code: "E043",
                category: "Grammar",
                severity: Severity::High,
                recoverable: false,
                requires_halt: false,
                description: "Nesting exceeds the maximum parse depth",
                recommended_action: "Flatten the expression nesting",
            },
            ErrorMetadata {
                code: "E060",
                category: "Style",
                severity: Severity::High,
                recoverable: false,
                requires_halt: false,
                description: "More than one role marker in a single word",
                recommended_action: "Keep at most one '!' marker per word",
            },
            ErrorMetadata {
                code: "E061",
                category: "Style",
                severity: Severity::High,
                recoverable: false,
                requires_halt: false,
                description: "Role path does not address an existing tree node",
                recommended_action: "Point the role path at an attached node",
            },
            ErrorMetadata {
                code: "E062",
                category: "Style",
                severity: Severity::High,
                recoverable: false,
                requires_halt: false,
                description: "Second dependant branch attached to one actant",
                recommended_action: "Attach at most one dependant per actant",
            },
            ErrorMetadata {
                code: "E063",
                category: "Style",
                severity: Severity::High,
                recoverable: false,
                requires_halt: false,
                description: "Second independant branch attached to one actant",
                recommended_action: "Attach at most one independant per actant",
            },
            ErrorMetadata {
                code: "E064",
                category: "Style",
                severity: Severity::High,
                recoverable: false,
                requires_halt: false,
                description: "Process function slot occupied twice",
                recommended_action: "Use each function slot at most once",
            },
            ErrorMetadata {
                code: "E070",
                category: "Rebuild",
                severity: Severity::High,
                recoverable: false,
                requires_halt: false,
                description: "A required field is absent from the field map",
                recommended_action: "Supply the missing field",
            },
            ErrorMetadata {
                code: "E071",
                category: "Rebuild",
                severity: Severity::High,
                recoverable: false,
                requires_halt: false,
                description: "A field value has the wrong shape for its slot",
                recommended_action: "Check the field layout of the target unit",
            },
            ErrorMetadata {
                code: "E072",
                category: "Rebuild",
                severity: Severity::High,
                recoverable: false,
                requires_halt: false,
                description: "Stored unit tag does not name the expected type",
                recommended_action: "Check the 'type' field of the unit",
            },
            ErrorMetadata {
                code: "E073",
                category: "Rebuild",
                severity: Severity::High,
                recoverable: false,
                requires_halt: false,
                description: "A stored field contradicts the re-parsed content",
                recommended_action: "Regenerate the field map from a valid unit",
            },
            ErrorMetadata {
                code: "E074",
                category: "Rebuild",
                severity: Severity::High,
                recoverable: false,
                requires_halt: false,
                description: "Unknown syntagmatic function slot name",
                recommended_action: "Use one of the eight fixed slot names",
            },
            ErrorMetadata {
                code: "E075",
                category: "Rebuild",
                severity: Severity::High,
                recoverable: false,
                requires_halt: false,
                description: "Stored canonical text no longer parses",
                recommended_action: "Regenerate the field map from a valid unit",
            },
            ErrorMetadata {
                code: "E080",
                category: "Translation",
                severity: Severity::Low,
                recoverable: true,
                requires_halt: false,
                description: "No translation recorded for the unit and language",
                recommended_action: "Fall back to a deeper mixed translation",
            },
        ];

        entries.into_iter().map(|m| (m.code, m)).collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    metadata_registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_metadata(code).map_or(Severity::Medium, |m| m.severity)
}

pub fn get_category(code: &str) -> &'static str {
    get_metadata(code).map_or("Unknown", |m| m.category)
}

pub fn is_recoverable(code: &str) -> bool {
    get_metadata(code).is_some_and(|m| m.recoverable)
}

pub fn requires_halt(code: &str) -> bool {
    get_metadata(code).is_some_and(|m| m.requires_halt)
}

pub fn get_description(code: &str) -> &'static str {
    get_metadata(code).map_or("Unknown error", |m| m.description)
}

pub fn get_action(code: &str) -> &'static str {
    get_metadata(code).map_or("No specific action available", |m| m.recommended_action)
}
