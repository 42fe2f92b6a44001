//! Kahani Language Server
//!
//! Validation engine and editor support for Hindi (Devanagari) story
//! submissions.
//!
//! This library provides:
//! - Story ID and story content validation with per-paragraph statistics
//! - Rule profiles loaded from TOML
//! - The submission gate and payload
//! - A debounced LSP front end

pub mod config;
pub mod debounce;
pub mod gate;
pub mod lsp;
pub mod parser;
pub mod roles;
pub mod rules;
pub mod submission;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use gate::{GateReport, SubmissionGate};
pub use rules::{RuleBook, RuleRegistry, ValidationRuleSet};
pub use submission::{StorySubmission, SubmissionError};
pub use validation::{
    validate_content, validate_content_field, validate_identifier, ContentStatistics,
    ValidationOutcome,
};
