//! Allowed character sets
//!
//! Both fields are restricted to the Devanagari block plus a small set of
//! punctuation. Input is checked per Unicode scalar value.

/// Devanagari block, U+0900..=U+097F (includes danda `।` and double danda `॥`)
pub fn is_devanagari(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c)
}

/// Characters accepted in a story identifier
pub fn is_identifier_char(c: char) -> bool {
    c == ' ' || is_devanagari(c) || matches!(c, '-' | '_' | '\'' | '"' | ':' | '!' | '?')
}

/// Characters accepted inside a content paragraph
pub fn is_content_char(c: char) -> bool {
    c.is_whitespace()
        || is_devanagari(c)
        || matches!(
            c,
            '\'' | '"'
                | '\u{2018}'
                | '\u{2019}'
                | '\u{201C}'
                | '\u{201D}'
                | ','
                | '!'
                | '?'
                | '('
                | ')'
                | '-'
                | ':'
                | '\u{2026}'
        )
}
