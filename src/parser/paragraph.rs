//! Paragraph Segmentation
//!
//! A paragraph is a maximal non-blank run of text between newline characters.

/// A non-empty paragraph of story text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paragraph<'a> {
    /// 1-based position among non-empty paragraphs
    pub number: usize,
    /// 0-based source line
    pub line: usize,
    /// Trimmed paragraph text
    pub text: &'a str,
}

/// Split `text` into non-empty, trimmed paragraphs.
///
/// Blank lines (including whitespace-only lines) separate paragraphs and are
/// never counted. `\r\n` line endings are accepted.
pub fn segment_paragraphs(text: &str) -> Vec<Paragraph<'_>> {
    text.split('\n')
        .enumerate()
        .map(|(line, raw)| (line, raw.trim()))
        .filter(|(_, trimmed)| !trimmed.is_empty())
        .enumerate()
        .map(|(idx, (line, text))| Paragraph {
            number: idx + 1,
            line,
            text,
        })
        .collect()
}
