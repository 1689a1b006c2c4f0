//! Line tokenizer: invisible-character cleanup and ordinal extraction

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Leading ordinal marker: digits, optional `.`, `)` or `-`, optional spaces
static ORDINAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)[.)\-]?\s*(.*)$").expect("valid ordinal regex"));

/// Characters pasted in from chat apps and spreadsheets that render as nothing
const INVISIBLE_CHARS: &[char] = &[
    '\u{200B}', // zero-width space
    '\u{200C}', // zero-width non-joiner
    '\u{200D}', // zero-width joiner
    '\u{2060}', // word joiner
    '\u{FEFF}', // byte-order mark
];

/// One input line split into its optional ordinal and remaining text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub explicit_order: Option<i64>,
    pub content: String,
}

/// Remove invisible characters anywhere in the text and compose it to NFC
pub fn strip_invisible(raw: &str) -> String {
    raw.chars()
        .filter(|c| !INVISIBLE_CHARS.contains(c))
        .nfc()
        .collect()
}

/// Tokenize one raw line
///
/// A digit run too long for `i64` is treated as ordinary text.
pub fn tokenize(raw: &str) -> Token {
    let cleaned = strip_invisible(raw);
    let trimmed = cleaned.trim();

    if let Some(caps) = ORDINAL.captures(trimmed) {
        if let Ok(order) = caps[1].parse::<i64>() {
            return Token {
                explicit_order: Some(order),
                content: caps[2].trim().to_string(),
            };
        }
    }

    Token {
        explicit_order: None,
        content: trimmed.to_string(),
    }
}
