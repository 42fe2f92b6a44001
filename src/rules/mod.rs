//! Validation Rule Profiles
//!
//! Rule sets for the story identifier and story content, loaded from TOML.

pub mod registry;
pub mod schema;

pub use registry::{parse_rules_file, RuleRegistry, DEFAULT_PROFILE};
pub use schema::{RuleBook, RulesFile, ValidationRuleSet, ViolationKind};
