//! Submission Gate
//!
//! Decides whether a story may be sent. Every check is re-derived from the
//! current field values; nothing cached by the caller is trusted.

use thiserror::Error;

use crate::rules::RuleBook;
use crate::submission::StorySubmission;
use crate::validation::{
    validate_content, validate_content_field, validate_identifier, ContentStatistics,
    ValidationOutcome,
};

/// Why the gate stayed closed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateRejection {
    #[error("story id: {0}")]
    Identifier(String),
    #[error("story content: {0}")]
    Content(String),
    #[error("story content has {count} issue(s): {first}")]
    Diagnostics { count: usize, first: String },
}

/// All three checks for one submission attempt
#[derive(Debug, Clone, PartialEq)]
pub struct GateReport {
    pub story_id: String,
    pub story_content: String,
    pub identifier: ValidationOutcome,
    pub content: ValidationOutcome,
    pub statistics: ContentStatistics,
}

impl GateReport {
    pub fn is_open(&self) -> bool {
        self.identifier.is_valid() && self.content.is_valid() && self.statistics.is_valid
    }

    /// First reason the gate is closed, checked in field order
    pub fn rejection(&self) -> Option<GateRejection> {
        if let Some(reason) = self.identifier.reason() {
            return Some(GateRejection::Identifier(reason.to_string()));
        }
        if let Some(reason) = self.content.reason() {
            return Some(GateRejection::Content(reason.to_string()));
        }
        if !self.statistics.is_valid {
            let first = self
                .statistics
                .messages()
                .first()
                .map(|m| m.to_string())
                .unwrap_or_default();
            return Some(GateRejection::Diagnostics {
                count: self.statistics.diagnostics.len(),
                first,
            });
        }
        None
    }

    /// Sanitized payload, only when every check passed
    pub fn into_submission(self) -> Result<StorySubmission, GateRejection> {
        match self.rejection() {
            Some(rejection) => Err(rejection),
            None => Ok(StorySubmission::new(&self.story_id, &self.story_content)),
        }
    }
}

/// Submission gate bound to one rule profile
#[derive(Debug, Clone, Copy)]
pub struct SubmissionGate<'a> {
    rules: &'a RuleBook,
}

impl<'a> SubmissionGate<'a> {
    pub fn new(rules: &'a RuleBook) -> Self {
        Self { rules }
    }

    pub fn evaluate(&self, story_id: &str, story_content: &str) -> GateReport {
        GateReport {
            story_id: story_id.to_string(),
            story_content: story_content.to_string(),
            identifier: validate_identifier(story_id, &self.rules.identifier),
            content: validate_content_field(story_content, &self.rules.content),
            statistics: validate_content(story_content, self.rules),
        }
    }

    pub fn can_submit(&self, story_id: &str, story_content: &str) -> bool {
        self.evaluate(story_id, story_content).is_open()
    }
}
