//! Word Lexer
//!
//! Splits a paragraph into words. Words are separated by runs of whitespace
//! or hyphens, so `दूसरा-भाग` counts as two words.

/// A word with its byte offset inside the paragraph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Word<'a> {
    pub text: &'a str,
    pub start: usize,
}

impl Word<'_> {
    /// Byte offset one past the end of the word
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

pub fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || c == '-'
}

/// Tokenize a paragraph into words
pub fn tokenize_words(text: &str) -> Vec<Word<'_>> {
    let mut words = Vec::new();
    let mut word_start = None;

    for (idx, ch) in text.char_indices() {
        if is_word_separator(ch) {
            if let Some(start) = word_start.take() {
                words.push(Word {
                    text: &text[start..idx],
                    start,
                });
            }
        } else if word_start.is_none() {
            word_start = Some(idx);
        }
    }

    if let Some(start) = word_start {
        words.push(Word {
            text: &text[start..],
            start,
        });
    }

    words
}

/// Count words without allocating
pub fn count_words(text: &str) -> usize {
    text.split(is_word_separator)
        .filter(|token| !token.is_empty())
        .count()
}
