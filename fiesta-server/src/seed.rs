//! Sample roster for local development and demos

use fiesta_common::import::canonical_size;
use fiesta_common::{time, uuid_utils, RosterEntry, RosterService};
use tracing::info;

/// (given name, surname 1, surname 2, size, paid, picked up)
const SAMPLE_MEMBERS: &[(&str, &str, &str, &str, bool, bool)] = &[
    ("Carlos", "García", "Pérez", "L", true, false),
    ("Ana", "Martínez", "López", "M", true, true),
    ("Luis", "Rodríguez", "", "XL", false, false),
    ("María", "López", "Díaz", "S", false, false),
    ("Javier", "Sánchez", "Ruiz", "XXL", true, false),
    ("Elena", "Fernández", "Gómez", "M", true, true),
    ("Pedro", "Gómez", "Martín", "L", false, false),
    ("Lucía", "Díaz", "Moreno", "S", true, false),
    ("Miguel", "Torres", "Jiménez", "3XL", false, false),
    ("Sofía", "Ruiz", "Navarro", "M", true, true),
];

/// Replace the roster with the sample members, ordered 1..n
///
/// Returns the number of entries written.
pub async fn seed_roster(roster: &RosterService) -> fiesta_common::Result<usize> {
    let removed = roster.clear().await?;
    if removed > 0 {
        info!(removed, "Cleared existing roster before seeding");
    }

    let stamp = time::now_rfc3339();
    for (index, &(given, surname1, surname2, size, paid, picked_up)) in
        SAMPLE_MEMBERS.iter().enumerate()
    {
        let mut entry = RosterEntry::new(
            uuid_utils::new_entry_id(),
            given.to_string(),
            surname1.to_string(),
            surname2.to_string(),
            canonical_size(size),
            index as i64 + 1,
        );
        if paid {
            entry.paid = true;
            entry.paid_at = stamp.clone();
        }
        if picked_up {
            entry.picked_up = true;
            entry.picked_up_at = stamp.clone();
        }
        roster.insert(&entry).await?;
    }

    info!(count = SAMPLE_MEMBERS.len(), "Roster seeded");
    Ok(SAMPLE_MEMBERS.len())
}
