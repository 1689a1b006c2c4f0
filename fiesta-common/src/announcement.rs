//! Banner announcement shown above the roster

use crate::events::{EventBus, FiestaEvent};
use crate::store::{Keys, SharedStore};
use crate::Result;
use tracing::info;

#[derive(Clone)]
pub struct AnnouncementStore {
    store: SharedStore,
    keys: Keys,
    events: EventBus,
}

impl AnnouncementStore {
    pub fn new(store: SharedStore, keys: Keys, events: EventBus) -> Self {
        Self { store, keys, events }
    }

    /// Current announcement, empty when none is set
    pub async fn get(&self) -> Result<String> {
        Ok(self
            .store
            .get(&self.keys.announcement())
            .await?
            .unwrap_or_default())
    }

    /// Replace the announcement; blank text removes it
    pub async fn update(&self, text: &str) -> Result<()> {
        let key = self.keys.announcement();
        if text.trim().is_empty() {
            self.store.del(&[key]).await?;
            info!("Announcement removed");
        } else {
            self.store.set(&key, text).await?;
            info!(len = text.len(), "Announcement updated");
        }
        self.events.emit_lossy(FiestaEvent::AnnouncementChanged);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn setup() -> (AnnouncementStore, Arc<MemoryStore>) {
        let memory = Arc::new(MemoryStore::new());
        let store = AnnouncementStore::new(memory.clone(), Keys::default(), EventBus::default());
        (store, memory)
    }

    #[tokio::test]
    async fn test_missing_announcement_is_empty() {
        let (store, _) = setup();
        assert_eq!(store.get().await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_update_and_clear() {
        let (store, memory) = setup();

        store.update("¡Recogida de camisetas a las 18:00!").await.unwrap();
        assert_eq!(store.get().await.unwrap(), "¡Recogida de camisetas a las 18:00!");

        store.update("   ").await.unwrap();
        assert_eq!(store.get().await.unwrap(), "");
        assert_eq!(memory.key_count().await, 0);
    }
}
