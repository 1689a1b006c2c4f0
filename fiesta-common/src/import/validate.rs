//! Duplicate explicit-order detection over a whole batch

use std::collections::{BTreeSet, HashSet};

/// Distinct explicit order numbers that occur more than once, ascending
///
/// `None` entries (lines without an ordinal) never participate. An empty
/// result means the batch may be committed.
pub fn duplicate_orders<I>(orders: I) -> Vec<i64>
where
    I: IntoIterator<Item = Option<i64>>,
{
    let mut seen = HashSet::new();
    let mut duplicates = BTreeSet::new();
    for order in orders.into_iter().flatten() {
        if !seen.insert(order) {
            duplicates.insert(order);
        }
    }
    duplicates.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_duplicates() {
        assert!(duplicate_orders([Some(1), Some(2), Some(3)]).is_empty());
        assert!(duplicate_orders(Vec::new()).is_empty());
    }

    #[test]
    fn test_single_duplicate() {
        assert_eq!(duplicate_orders([Some(1), Some(2), Some(2), Some(3)]), vec![2]);
    }

    #[test]
    fn test_duplicates_reported_once_and_sorted() {
        let dups = duplicate_orders([Some(9), Some(4), Some(9), Some(4), Some(9)]);
        assert_eq!(dups, vec![4, 9]);
    }

    #[test]
    fn test_missing_orders_never_conflict() {
        assert!(duplicate_orders([None, None, Some(1), None]).is_empty());
    }
}
