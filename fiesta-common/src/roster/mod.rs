//! Ordered roster: writer, reader and status updates
//!
//! Each entry lives in its own field map (`<ns>:miembro:<id>`) and its id is
//! scored by display order in one sorted set (`<ns>:miembros_orden`). Every
//! write stores `order` in the field map as well; entries written before the
//! order field existed get a positional order at read time, which is never
//! written back.
//!
//! Data from the older layout indexes ids in a plain set
//! (`<ns>:miembros_ids`) instead. Those entries are still listed, toggled
//! and cleared, but the set is never written to.

mod filter;
mod model;

pub use filter::{filter_entries, fold, matches_query, QuickFilter};
pub use model::{NewMember, RosterEntry, StatusField, ValidMember, MIN_NAME_LEN};

use crate::events::{EventBus, FiestaEvent};
use crate::import::{parse_batch, ParsedEntry};
use crate::store::{Keys, SharedStore};
use crate::{time, uuid_utils, Error, Result};
use model::{F_GIVEN_NAME, F_ORDER};
use std::collections::{BTreeSet, HashMap, HashSet};
use thiserror::Error as ThisError;
use tracing::{debug, error, info, warn};

/// Why a bulk import committed nothing (or only part of the batch)
#[derive(Debug, ThisError)]
pub enum ImportError {
    /// Two or more lines share an explicit order number; nothing was written
    #[error("Números de orden duplicados: {}", join_orders(.0))]
    DuplicateOrders(Vec<i64>),

    /// The store failed during commit; earlier writes of the batch remain
    #[error("Error en carga masiva: {0}")]
    Store(#[from] Error),
}

fn join_orders(orders: &[i64]) -> String {
    orders
        .iter()
        .map(|o| o.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Order keys for a validated batch, in line order
///
/// Explicit orders are used verbatim. Entries without one get
/// `base + n`, where `n` counts only the entries lacking an explicit order,
/// starting at 0.
pub fn assign_orders(entries: &[ParsedEntry], base: i64) -> Vec<i64> {
    let mut counter = 0;
    entries
        .iter()
        .map(|entry| match entry.explicit_order {
            Some(order) => order,
            None => {
                let order = base + counter;
                counter += 1;
                order
            }
        })
        .collect()
}

/// Roster operations over the shared store
#[derive(Clone)]
pub struct RosterService {
    store: SharedStore,
    keys: Keys,
    events: EventBus,
}

impl RosterService {
    pub fn new(store: SharedStore, keys: Keys, events: EventBus) -> Self {
        Self { store, keys, events }
    }

    /// All entries ascending by order
    ///
    /// Ids indexed only in the older unordered set follow the ordered ones,
    /// by stored order when they have one and otherwise by given name. Ids whose field map has disappeared are skipped.
    /// Nothing is written back.
    pub async fn list(&self) -> Result<Vec<RosterEntry>> {
        let mut ids = self.store.zrange_all(&self.keys.member_order()).await?;
        let indexed: HashSet<String> = ids.iter().cloned().collect();
        let legacy_ids: Vec<String> = self
            .store
            .smembers(&self.keys.legacy_members())
            .await?
            .into_iter()
            .filter(|id| !indexed.contains(id))
            .collect();
        let ordered_count = ids.len();
        ids.extend(legacy_ids);

        let member_keys: Vec<String> = ids.iter().map(|id| self.keys.member(id)).collect();
        let mut maps = self.store.hgetall_many(&member_keys).await?;

        let mut legacy: Vec<(&String, HashMap<String, String>)> = ids[ordered_count..]
            .iter()
            .zip(maps.drain(ordered_count..))
            .filter(|(_, fields)| !fields.is_empty())
            .collect();
        // Stored orders first, the rest by given name
        legacy.sort_by_cached_key(|(id, fields)| {
            let stored = fields.get(F_ORDER).and_then(|o| o.trim().parse::<i64>().ok());
            (
                stored.is_none(),
                stored.unwrap_or_default(),
                fold(fields.get(F_GIVEN_NAME).map_or("", String::as_str)),
                (*id).clone(),
            )
        });

        let ordered = ids[..ordered_count].iter().zip(maps.iter());
        let legacy = legacy.iter().map(|(id, fields)| (*id, fields));
        Ok(ordered
            .chain(legacy)
            .enumerate()
            .filter_map(|(index, (id, fields))| RosterEntry::from_fields(id, fields, index + 1))
            .collect())
    }

    /// Entries matching a text query and quick filter, in roster order
    pub async fn search(&self, query: &str, filter: QuickFilter) -> Result<Vec<RosterEntry>> {
        Ok(filter_entries(self.list().await?, query, filter))
    }

    /// Write one complete entry: field map first, then its order index
    pub async fn insert(&self, entry: &RosterEntry) -> Result<()> {
        self.store
            .hset_all(&self.keys.member(&entry.id), &entry.to_fields())
            .await?;
        self.store
            .zadd(&self.keys.member_order(), entry.order, &entry.id)
            .await
    }

    /// Add a single attendee from the admin form
    pub async fn add(&self, input: &NewMember) -> Result<RosterEntry> {
        let valid = input.validate()?;
        let entry = RosterEntry::new(
            uuid_utils::new_entry_id(),
            valid.given_name,
            valid.surname1,
            valid.surname2,
            valid.size_label,
            time::now_millis(),
        );

        self.insert(&entry).await?;
        info!(id = %entry.id, name = %entry.full_name(), "Roster entry added");
        self.events.emit_lossy(FiestaEvent::RosterChanged);
        Ok(entry)
    }

    /// Parse a pasted block and commit it
    ///
    /// Nothing is written when explicit order numbers collide. Unparseable
    /// lines are dropped and not counted. Returns the committed count.
    pub async fn bulk_import(&self, text: &str) -> std::result::Result<usize, ImportError> {
        let batch = parse_batch(text);
        for line in &batch.skipped_lines {
            debug!(line = *line, "Bulk import: line skipped, could not parse");
        }

        let duplicates = batch.duplicate_orders();
        if !duplicates.is_empty() {
            warn!(duplicates = ?duplicates, "Bulk import rejected: duplicate order numbers");
            return Err(ImportError::DuplicateOrders(duplicates));
        }

        let base = time::now_millis();
        let orders = assign_orders(&batch.entries, base);
        let mut count = 0;

        for (parsed, order) in batch.entries.into_iter().zip(orders) {
            let entry = RosterEntry::new(
                uuid_utils::new_entry_id(),
                parsed.name.given_name,
                parsed.name.surname1,
                parsed.name.surname2,
                parsed.size_label,
                order,
            );
            if let Err(e) = self.insert(&entry).await {
                error!(committed = count, error = %e, "Bulk import failed part-way");
                return Err(ImportError::Store(e));
            }
            count += 1;
        }

        info!(
            count,
            skipped = batch.skipped_lines.len(),
            "Bulk import committed"
        );
        if count > 0 {
            self.events.emit_lossy(FiestaEvent::RosterChanged);
        }
        Ok(count)
    }

    /// Flip a status flag from `current` and set or clear its date
    ///
    /// Returns the new flag value.
    pub async fn toggle(&self, id: &str, field: StatusField, current: bool) -> Result<bool> {
        let key = self.keys.member(id);
        if self.store.hgetall(&key).await?.is_empty() {
            return Err(Error::NotFound(format!("Roster entry {}", id)));
        }

        let value = !current;
        let date = if value { time::now_rfc3339() } else { String::new() };
        self.store
            .hset_all(
                &key,
                &[
                    (field.flag_field().to_string(), value.to_string()),
                    (field.date_field().to_string(), date),
                ],
            )
            .await?;

        info!(id, field = ?field, value, "Roster status toggled");
        self.events.emit_lossy(FiestaEvent::RosterChanged);
        Ok(value)
    }

    /// Delete every entry and both id indexes; returns how many entries
    /// were removed
    pub async fn clear(&self) -> Result<usize> {
        let order_key = self.keys.member_order();
        let legacy_key = self.keys.legacy_members();
        let mut ids: BTreeSet<String> =
            self.store.zrange_all(&order_key).await?.into_iter().collect();
        ids.extend(self.store.smembers(&legacy_key).await?);

        let mut keys: Vec<String> = ids.iter().map(|id| self.keys.member(id)).collect();
        keys.push(order_key);
        keys.push(legacy_key);
        self.store.del(&keys).await?;

        info!(removed = ids.len(), "Roster cleared");
        self.events.emit_lossy(FiestaEvent::RosterChanged);
        Ok(ids.len())
    }
}
