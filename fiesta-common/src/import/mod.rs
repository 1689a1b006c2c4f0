//! Bulk-import text parser
//!
//! Turns a pasted multi-line block into roster entries in two steps that
//! never touch the store:
//!
//! 1. each non-blank line goes through [`tokenize`] → [`extract`] →
//!    [`split_name`]; lines any step rejects are skipped;
//! 2. [`BatchParse::duplicate_orders`] checks explicit order numbers across
//!    every surviving line.
//!
//! Committing the result is the roster writer's job
//! (see [`crate::roster::RosterService::bulk_import`]).

mod extract;
mod names;
mod tokenizer;
mod validate;

pub use extract::{canonical_size, clean_separators, extract, Extraction, ExtractionRule, RULES};
pub use names::{split_name, PersonName, SURNAME_PLACEHOLDER};
pub use tokenizer::{strip_invisible, tokenize, Token};
pub use validate::duplicate_orders;

/// One line that parsed into a roster entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    /// 1-based position of the line in the submitted text
    pub line_number: usize,
    pub explicit_order: Option<i64>,
    pub name: PersonName,
    pub size_label: String,
    /// Extraction rule that matched
    pub rule: &'static str,
}

/// Result of parsing a whole batch
#[derive(Debug, Clone, Default)]
pub struct BatchParse {
    /// Parsed entries in original line order
    pub entries: Vec<ParsedEntry>,
    /// Line numbers (1-based) of non-blank lines that were dropped
    pub skipped_lines: Vec<usize>,
}

impl BatchParse {
    /// Explicit order numbers used by more than one entry, ascending
    pub fn duplicate_orders(&self) -> Vec<i64> {
        duplicate_orders(self.entries.iter().map(|e| e.explicit_order))
    }
}

/// Parse one raw line; `None` means the line is skipped
pub fn parse_line(raw: &str, line_number: usize) -> Option<ParsedEntry> {
    let token = tokenize(raw);
    let extraction = extract(&token.content)?;
    let name = split_name(&extraction.name_part)?;
    Some(ParsedEntry {
        line_number,
        explicit_order: token.explicit_order,
        name,
        size_label: extraction.size_label,
        rule: extraction.rule,
    })
}

/// Parse a multi-line text block
pub fn parse_batch(text: &str) -> BatchParse {
    let mut batch = BatchParse::default();
    for (index, raw) in text.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;
        match parse_line(raw, line_number) {
            Some(entry) => batch.entries.push(entry),
            None => batch.skipped_lines.push(line_number),
        }
    }
    batch
}
