//! Size/name extraction from the text after the ordinal
//!
//! The rules are tried in the order of [`RULES`]; the first one that matches
//! decides how the line is split.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Arrow-like separators: a run of hyphens/en-dashes/em-dashes ending in `>`
static ARROWS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-–—]+>").expect("valid arrow regex"));

static DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-–—]").expect("valid dash regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid space regex"));

/// `... Talla <digits>[ años]`
static EXPLICIT_SIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(.*?)\s*\btalla\s+(\d+(?:\s*a(?:n|ñ)os)?)$").expect("valid talla regex")
});

/// `... <digits> años`
static AGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.*?)\s*(\d+\s*a(?:n|ñ)os)$").expect("valid age regex"));

/// A named extraction rule: text → `(name_part, raw_size_token)`
pub struct ExtractionRule {
    pub name: &'static str,
    pub apply: fn(&str) -> Option<(String, String)>,
}

/// Extraction rules in precedence order
pub const RULES: &[ExtractionRule] = &[
    ExtractionRule {
        name: "explicit-size",
        apply: explicit_size_rule,
    },
    ExtractionRule {
        name: "age",
        apply: age_rule,
    },
    ExtractionRule {
        name: "fallback",
        apply: fallback_rule,
    },
];

/// Result of a successful extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Name of the rule that matched
    pub rule: &'static str,
    pub name_part: String,
    pub size_label: String,
}

/// Collapse arrows and dashes to spaces and squeeze whitespace
///
/// The text is NFC-composed first so a decomposed `ñ` (`n` + U+0303) reads
/// the same as the precomposed one.
pub fn clean_separators(content: &str) -> String {
    let composed: String = content.nfc().collect();
    let without_arrows = ARROWS.replace_all(&composed, " ");
    let without_dashes = DASHES.replace_all(&without_arrows, " ");
    WHITESPACE
        .replace_all(&without_dashes, " ")
        .trim()
        .to_string()
}

/// Split content into name part and canonical size label
///
/// Returns `None` when no rule matches (a single word with no space), which
/// means the line is skipped.
pub fn extract(content: &str) -> Option<Extraction> {
    let cleaned = clean_separators(content);
    RULES.iter().find_map(|rule| {
        (rule.apply)(&cleaned).map(|(name_part, raw_size)| Extraction {
            rule: rule.name,
            name_part,
            size_label: canonical_size(&raw_size),
        })
    })
}

/// Normalize a raw size/age token to its canonical label
///
/// # Examples
///
/// ```
/// use fiesta_common::import::canonical_size;
///
/// assert_eq!(canonical_size("xxl"), "2XL");
/// assert_eq!(canonical_size("xxxl"), "3XL");
/// assert_eq!(canonical_size("3 anos"), "3 AÑOS");
/// assert_eq!(canonical_size("8"), "8");
/// ```
pub fn canonical_size(raw: &str) -> String {
    let composed: String = raw.trim().nfc().collect();
    let upper = composed.to_uppercase().replace("ANOS", "AÑOS");
    match upper.as_str() {
        "XXL" => "2XL".to_string(),
        "XXXL" => "3XL".to_string(),
        _ => upper,
    }
}

fn explicit_size_rule(text: &str) -> Option<(String, String)> {
    let caps = EXPLICIT_SIZE.captures(text)?;
    Some((caps[1].trim().to_string(), caps[2].to_string()))
}

fn age_rule(text: &str) -> Option<(String, String)> {
    let caps = AGE.captures(text)?;
    Some((caps[1].trim().to_string(), caps[2].to_string()))
}

fn fallback_rule(text: &str) -> Option<(String, String)> {
    let (name, size) = text.rsplit_once(' ')?;
    if size.is_empty() {
        return None;
    }
    Some((name.trim().to_string(), size.to_string()))
}
