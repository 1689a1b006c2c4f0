//! Roster search and quick filters

use super::model::RosterEntry;
use deunicode::deunicode;
use serde::Deserialize;

/// Quick filter applied after the text search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuickFilter {
    #[default]
    All,
    /// Not yet paid
    PendingPayment,
    /// Not yet picked up
    PendingPickup,
}

impl QuickFilter {
    fn accepts(&self, entry: &RosterEntry) -> bool {
        match self {
            QuickFilter::All => true,
            QuickFilter::PendingPayment => !entry.paid,
            QuickFilter::PendingPickup => !entry.picked_up,
        }
    }
}

/// Fold to lowercase ASCII so "García" matches "garcia"
pub fn fold(text: &str) -> String {
    deunicode(text).to_lowercase()
}

/// Does the entry match a text query?
///
/// Matches a substring of the given name, either surname, or the full
/// "given surname1 surname2" string, ignoring case and accents. An empty
/// query matches everything.
pub fn matches_query(entry: &RosterEntry, query: &str) -> bool {
    let q = fold(query.trim());
    if q.is_empty() {
        return true;
    }
    let given = fold(&entry.given_name);
    let s1 = fold(&entry.surname1);
    let s2 = fold(&entry.surname2);
    given.contains(&q)
        || s1.contains(&q)
        || (!s2.is_empty() && s2.contains(&q))
        || format!("{} {} {}", given, s1, s2).contains(&q)
}

/// Apply text search and quick filter, preserving roster order
pub fn filter_entries(entries: Vec<RosterEntry>, query: &str, filter: QuickFilter) -> Vec<RosterEntry> {
    entries
        .into_iter()
        .filter(|e| matches_query(e, query) && filter.accepts(e))
        .collect()
}
