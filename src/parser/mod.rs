//! Story Text Parser
//!
//! Paragraph segmentation and word tokenization for story content.
//! No validation logic here, only structure.

pub mod lexer;
pub mod paragraph;

pub use lexer::{count_words, is_word_separator, tokenize_words, Word};
pub use paragraph::{segment_paragraphs, Paragraph};
