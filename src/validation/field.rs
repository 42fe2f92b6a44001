//! Field-level validation
//!
//! One outcome per field. Checks run in a fixed order and the first failing
//! check decides the reason.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::{ValidationRuleSet, ViolationKind};
use crate::validation::charset::is_identifier_char;

static EDGE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-_]|[-_]$").unwrap());

static CONSECUTIVE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"_{2,}|-{2,}").unwrap());

static REPEATED_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_]{5,}").unwrap());

/// A failed rule with its rendered message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
}

/// Result of validating a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(Violation),
}

impl ValidationOutcome {
    fn invalid(rules: &ValidationRuleSet, kind: ViolationKind, offending: Option<char>) -> Self {
        ValidationOutcome::Invalid(Violation {
            kind,
            message: rules.render(kind, offending),
        })
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    /// User-facing reason, if invalid
    pub fn reason(&self) -> Option<&str> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(violation) => Some(&violation.message),
        }
    }

    pub fn kind(&self) -> Option<ViolationKind> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(violation) => Some(violation.kind),
        }
    }
}

/// Validate a story identifier.
///
/// Order: required, length, leading/trailing separator, doubled separator,
/// long separator run, then the first character outside the allowed set.
pub fn validate_identifier(value: &str, rules: &ValidationRuleSet) -> ValidationOutcome {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return ValidationOutcome::invalid(rules, ViolationKind::Required, None);
    }

    let length = trimmed.chars().count();
    if length > rules.max_length {
        return ValidationOutcome::invalid(rules, ViolationKind::Length, None);
    }
    if length < rules.min_length {
        return ValidationOutcome::invalid(rules, ViolationKind::TooShort, None);
    }

    if EDGE_SEPARATOR.is_match(trimmed) {
        return ValidationOutcome::invalid(rules, ViolationKind::StartEnd, None);
    }
    if CONSECUTIVE_SEPARATOR.is_match(trimmed) {
        return ValidationOutcome::invalid(rules, ViolationKind::Consecutive, None);
    }
    if REPEATED_SEPARATORS.is_match(trimmed) {
        return ValidationOutcome::invalid(rules, ViolationKind::RepeatedSeparators, None);
    }

    if let Some(c) = trimmed.chars().find(|&c| !is_identifier_char(c)) {
        return ValidationOutcome::invalid(rules, ViolationKind::InvalidCharacter, Some(c));
    }

    ValidationOutcome::Valid
}

/// Structural checks on the whole content field.
///
/// These are independent of the per-paragraph diagnostics produced by
/// [`crate::validation::validate_content`].
pub fn validate_content_field(value: &str, rules: &ValidationRuleSet) -> ValidationOutcome {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return ValidationOutcome::invalid(rules, ViolationKind::Required, None);
    }

    let length = trimmed.chars().count();
    if length < rules.min_length {
        return ValidationOutcome::invalid(rules, ViolationKind::TooShort, None);
    }
    if length > rules.max_length {
        return ValidationOutcome::invalid(rules, ViolationKind::TooLong, None);
    }

    if trimmed.contains(['<', '>']) {
        return ValidationOutcome::invalid(rules, ViolationKind::ForbiddenCharacters, None);
    }
    if REPEATED_SEPARATORS.is_match(trimmed) {
        return ValidationOutcome::invalid(rules, ViolationKind::RepeatedSeparators, None);
    }

    ValidationOutcome::Valid
}
