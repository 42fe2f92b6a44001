//! Validation Engine
//!
//! Pure, synchronous checks over story fields. No I/O and no state between
//! calls.

pub mod charset;
pub mod engine;
pub mod field;

pub use engine::{
    validate_content, ContentStatistics, Diagnostic, DiagnosticKind, ParagraphStats, Severity,
};
pub use field::{validate_content_field, validate_identifier, ValidationOutcome, Violation};
