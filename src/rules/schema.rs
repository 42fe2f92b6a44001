//! Rule Profile Schema
//!
//! TOML file types and the immutable runtime rule sets built from them.

use anyhow::{bail, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Words allowed in a single paragraph unless a profile says otherwise
pub const PARAGRAPH_WORD_LIMIT: usize = 70;

/// Kind of rule violation a message template is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    Required,
    Length,
    TooShort,
    TooLong,
    StartEnd,
    Consecutive,
    RepeatedSeparators,
    InvalidCharacter,
    ForbiddenCharacters,
}

impl ViolationKind {
    /// Message used when a profile does not define one for this kind
    pub fn default_template(self) -> &'static str {
        match self {
            ViolationKind::Required => "This field is required",
            ViolationKind::Length => "Must be less than {max} characters",
            ViolationKind::TooShort => "Must be greater than {min} characters",
            ViolationKind::TooLong => "Must be less than {max} characters",
            ViolationKind::StartEnd => "Cannot start or end with - or _",
            ViolationKind::Consecutive => "Cannot have consecutive - or _ characters",
            ViolationKind::RepeatedSeparators => "Too many repeated - or _ characters",
            ViolationKind::InvalidCharacter => "Invalid character \"{char}\"",
            ViolationKind::ForbiddenCharacters => "Cannot contain <, > characters",
        }
    }

    /// Key used for this kind in rule files
    pub fn key(self) -> &'static str {
        match self {
            ViolationKind::Required => "required",
            ViolationKind::Length => "length",
            ViolationKind::TooShort => "too_short",
            ViolationKind::TooLong => "too_long",
            ViolationKind::StartEnd => "start_end",
            ViolationKind::Consecutive => "consecutive",
            ViolationKind::RepeatedSeparators => "repeated_separators",
            ViolationKind::InvalidCharacter => "invalid_character",
            ViolationKind::ForbiddenCharacters => "forbidden_characters",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Root rules file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RulesFile {
    pub profile: ProfileMeta,
    pub identifier: RuleSetDef,
    pub content: RuleSetDef,
}

/// Profile metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProfileMeta {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub max_paragraph_words: Option<usize>,
}

/// Length bounds and messages for one field
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RuleSetDef {
    pub min_length: usize,
    pub max_length: usize,
    #[serde(default)]
    pub messages: MessagesDef,
}

/// Message templates, one optional entry per violation kind
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MessagesDef {
    pub required: Option<String>,
    pub length: Option<String>,
    pub too_short: Option<String>,
    pub too_long: Option<String>,
    pub start_end: Option<String>,
    pub consecutive: Option<String>,
    pub repeated_separators: Option<String>,
    pub invalid_character: Option<String>,
    pub forbidden_characters: Option<String>,
}

impl MessagesDef {
    fn into_map(self) -> HashMap<ViolationKind, String> {
        [
            (ViolationKind::Required, self.required),
            (ViolationKind::Length, self.length),
            (ViolationKind::TooShort, self.too_short),
            (ViolationKind::TooLong, self.too_long),
            (ViolationKind::StartEnd, self.start_end),
            (ViolationKind::Consecutive, self.consecutive),
            (ViolationKind::RepeatedSeparators, self.repeated_separators),
            (ViolationKind::InvalidCharacter, self.invalid_character),
            (ViolationKind::ForbiddenCharacters, self.forbidden_characters),
        ]
        .into_iter()
        .filter_map(|(kind, message)| message.map(|m| (kind, m)))
        .collect()
    }
}

/// Per-field validation configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRuleSet {
    pub min_length: usize,
    pub max_length: usize,
    pub messages: HashMap<ViolationKind, String>,
}

impl ValidationRuleSet {
    pub fn new(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
            messages: HashMap::new(),
        }
    }

    /// Builder-style message override
    pub fn with_message(mut self, kind: ViolationKind, template: impl Into<String>) -> Self {
        self.messages.insert(kind, template.into());
        self
    }

    /// Render the message for `kind`, substituting `{min}`, `{max}` and `{char}`
    pub fn render(&self, kind: ViolationKind, offending: Option<char>) -> String {
        let template = self
            .messages
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_template());

        let mut message = template
            .replace("{min}", &self.min_length.to_string())
            .replace("{max}", &self.max_length.to_string());
        if let Some(c) = offending {
            message = message.replace("{char}", &c.to_string());
        }
        message
    }

    /// Character counter for a raw field value, e.g. `12/5000`
    pub fn counter(&self, value: &str) -> String {
        format!("{}/{}", value.chars().count(), self.max_length)
    }

    pub fn exceeds_max(&self, value: &str) -> bool {
        value.chars().count() > self.max_length
    }

    fn from_def(def: RuleSetDef, field: &str) -> Result<Self> {
        if def.min_length > def.max_length {
            bail!(
                "{} rules: min_length {} exceeds max_length {}",
                field,
                def.min_length,
                def.max_length
            );
        }

        Ok(Self {
            min_length: def.min_length,
            max_length: def.max_length,
            messages: def.messages.into_map(),
        })
    }
}

/// Runtime rule profile: both field rule sets plus the paragraph word limit
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBook {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub identifier: ValidationRuleSet,
    pub content: ValidationRuleSet,
    pub max_paragraph_words: usize,
}

impl TryFrom<RulesFile> for RuleBook {
    type Error = anyhow::Error;

    fn try_from(file: RulesFile) -> Result<Self> {
        let max_paragraph_words = file
            .profile
            .max_paragraph_words
            .unwrap_or(PARAGRAPH_WORD_LIMIT);
        if max_paragraph_words == 0 {
            bail!("profile '{}': max_paragraph_words must be positive", file.profile.name);
        }

        Ok(Self {
            identifier: ValidationRuleSet::from_def(file.identifier, "identifier")?,
            content: ValidationRuleSet::from_def(file.content, "content")?,
            name: file.profile.name,
            version: file.profile.version,
            description: file.profile.description,
            max_paragraph_words,
        })
    }
}

impl RuleBook {
    /// Hard-coded Hindi story profile, used when the embedded file cannot be parsed
    pub fn hindi_story() -> Self {
        let identifier = ValidationRuleSet::new(1, 50)
            .with_message(ViolationKind::Required, "Story ID or Story title is required")
            .with_message(ViolationKind::InvalidCharacter, "Invalid character \"{char}\" in Story ID");
        let content = ValidationRuleSet::new(10, 5000)
            .with_message(ViolationKind::Required, "Story content is required");

        Self {
            name: "hindi-story".to_string(),
            version: Some("minimal-fallback".to_string()),
            description: Some("Minimal fallback Hindi story profile".to_string()),
            identifier,
            content,
            max_paragraph_words: PARAGRAPH_WORD_LIMIT,
        }
    }
}
