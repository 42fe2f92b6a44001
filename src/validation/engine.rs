//! Content Statistics Engine
//!
//! Per-paragraph checks over story content, separated from the single
//! field-level outcome in [`crate::validation::field`].

use crate::parser::{count_words, segment_paragraphs};
use crate::rules::RuleBook;
use crate::validation::charset::is_content_char;

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// What a content diagnostic is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    InvalidCharacters,
    ParagraphTooLong,
    NoParagraphs,
}

/// A diagnostic message for one validation issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 0-based source line
    pub line: usize,
    /// 1-based paragraph number, if the issue belongs to one paragraph
    pub paragraph: Option<usize>,
    pub kind: DiagnosticKind,
    pub message: String,
    pub severity: Severity,
}

/// Statistics for one non-empty paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphStats {
    pub number: usize,
    pub line: usize,
    pub word_count: usize,
}

/// Everything derived from one content string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentStatistics {
    pub paragraphs: Vec<ParagraphStats>,
    pub total_word_count: usize,
    pub is_valid: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl ContentStatistics {
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Word counts in paragraph order
    pub fn per_paragraph_word_counts(&self) -> Vec<usize> {
        self.paragraphs.iter().map(|p| p.word_count).collect()
    }

    /// Diagnostic messages in order
    pub fn messages(&self) -> Vec<&str> {
        self.diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    /// Paragraph covering the given 0-based source line
    pub fn paragraph_at_line(&self, line: usize) -> Option<&ParagraphStats> {
        self.paragraphs.iter().find(|p| p.line == line)
    }

    /// Report shown after a successful upload
    pub fn summary(&self, story_id: &str) -> String {
        let mut report = format!(
            "The story \"{}\" has {} paragraphs. Total words: {}.",
            story_id.trim(),
            self.paragraph_count(),
            self.total_word_count
        );
        for paragraph in &self.paragraphs {
            report.push_str(&format!(
                "\nParagraph {}: {} words",
                paragraph.number, paragraph.word_count
            ));
        }
        report
    }

    fn add_error(
        &mut self,
        line: usize,
        paragraph: Option<usize>,
        kind: DiagnosticKind,
        message: String,
    ) {
        self.is_valid = false;
        self.diagnostics.push(Diagnostic {
            line,
            paragraph,
            kind,
            message,
            severity: Severity::Error,
        });
    }
}

/// Validate story content paragraph by paragraph.
///
/// Never fails: every input, including the empty string, yields statistics.
/// Word counts are recorded for every non-empty paragraph, including ones
/// that carry diagnostics.
pub fn validate_content(text: &str, rules: &RuleBook) -> ContentStatistics {
    let mut stats = ContentStatistics {
        paragraphs: Vec::new(),
        total_word_count: 0,
        is_valid: true,
        diagnostics: Vec::new(),
    };

    for paragraph in segment_paragraphs(text) {
        let invalid = invalid_characters(paragraph.text);
        if !invalid.is_empty() {
            let listed: Vec<String> = invalid.iter().map(char::to_string).collect();
            stats.add_error(
                paragraph.line,
                Some(paragraph.number),
                DiagnosticKind::InvalidCharacters,
                format!(
                    "Paragraph {} has invalid characters: {}",
                    paragraph.number,
                    listed.join(", ")
                ),
            );
        }

        let word_count = count_words(paragraph.text);
        if word_count > rules.max_paragraph_words {
            stats.add_error(
                paragraph.line,
                Some(paragraph.number),
                DiagnosticKind::ParagraphTooLong,
                format!(
                    "Paragraph {} exceeds {} words ({})",
                    paragraph.number, rules.max_paragraph_words, word_count
                ),
            );
        }

        stats.paragraphs.push(ParagraphStats {
            number: paragraph.number,
            line: paragraph.line,
            word_count,
        });
        stats.total_word_count += word_count;
    }

    if stats.paragraphs.is_empty() {
        stats.add_error(
            0,
            None,
            DiagnosticKind::NoParagraphs,
            "No valid paragraph found".to_string(),
        );
    }

    stats
}

/// Characters outside the content set, de-duplicated in first-seen order
fn invalid_characters(text: &str) -> Vec<char> {
    let mut found = Vec::new();
    for c in text.chars() {
        if !is_content_char(c) && !found.contains(&c) {
            found.push(c);
        }
    }
    found
}
