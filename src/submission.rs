//! Story Submission
//!
//! Payload sent to the story endpoint and the mapping of transport failures to
//! user-facing errors. The HTTP call itself belongs to the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request body for the story endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorySubmission {
    pub story_id: String,
    pub story_content: String,
}

impl StorySubmission {
    /// Build a payload from raw field values, trimming and sanitizing both
    pub fn new(story_id: &str, story_content: &str) -> Self {
        Self {
            story_id: sanitize_markup(story_id),
            story_content: sanitize_markup(story_content),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Failure reported by the transport layer after a submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The endpoint answered 409
    #[error("Story ID already exists")]
    Conflict,
    /// No response was received
    #[error("Network error")]
    Network,
    #[error("Failed to create story")]
    Failed,
}

impl SubmissionError {
    /// Map a non-success HTTP status
    pub fn from_status(status: u16) -> Self {
        match status {
            409 => SubmissionError::Conflict,
            _ => SubmissionError::Failed,
        }
    }

    /// The request never produced a response
    pub fn from_transport_failure() -> Self {
        SubmissionError::Network
    }
}

/// Strip markup from a plain-text field.
///
/// Removes complete `<...>` spans and any stray angle bracket, then trims.
pub fn sanitize_markup(value: &str) -> String {
    let mut clean = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(open) = rest.find('<') {
        clean.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        rest = match after.find('>') {
            Some(close) => &after[close + 1..],
            None => after,
        };
    }
    clean.push_str(rest);

    clean.retain(|c| c != '>');
    clean.trim().to_string()
}
