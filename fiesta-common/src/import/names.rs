//! Splits a name portion into given name and surnames

/// Stored as `surname1` when an imported line carries only one name token
pub const SURNAME_PLACEHOLDER: &str = "--";

/// Given name and surnames of one attendee
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    pub given_name: String,
    pub surname1: String,
    /// Empty when absent
    pub surname2: String,
}

/// Split on whitespace: the last two tokens are the surnames and everything
/// before them is the (possibly compound) given name
///
/// Returns `None` for an empty name part.
pub fn split_name(name_part: &str) -> Option<PersonName> {
    let tokens: Vec<&str> = name_part.split_whitespace().collect();
    match tokens.as_slice() {
        [] => None,
        [given] => Some(PersonName {
            given_name: given.to_string(),
            surname1: SURNAME_PLACEHOLDER.to_string(),
            surname2: String::new(),
        }),
        [given, surname1] => Some(PersonName {
            given_name: given.to_string(),
            surname1: surname1.to_string(),
            surname2: String::new(),
        }),
        [given @ .., surname1, surname2] => Some(PersonName {
            given_name: given.join(" "),
            surname1: surname1.to_string(),
            surname2: surname2.to_string(),
        }),
    }
}
