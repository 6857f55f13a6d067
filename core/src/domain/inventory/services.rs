use tracing::warn;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    inventory::{
        entities::{FoodItem, FoodItemDraft},
        ports::LocalStore,
        value_objects::{SNAPSHOT_LIMIT, SnapshotEntry},
    },
};

/// Storage key for the serialized inventory collection.
pub const INVENTORY_STORE_KEY: &str = "fresh-track-inventory";

/// Authoritative collection of committed items: in-memory working set plus
/// write-through persistence.
pub struct InventoryService<S: LocalStore> {
    store: S,
    items: Vec<FoodItem>,
}

impl<S: LocalStore> InventoryService<S> {
    /// Reads the persisted collection once. Corrupt or unreadable state
    /// degrades to an empty inventory, never a startup failure.
    pub fn bootstrap(store: S) -> Self {
        let items = match store.get(INVENTORY_STORE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<FoodItem>>(&raw) {
                Ok(items) => items,
                Err(err) => {
                    warn!("persisted inventory is corrupt, starting empty: {}", err);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("inventory store unreadable, starting empty: {}", err);
                Vec::new()
            }
        };

        Self { store, items }
    }

    /// Commits a candidate: assigns a fresh identifier and timestamp, prepends
    /// it, and flushes before returning. Never deduplicates; two scans of the
    /// same product yield two entries.
    pub fn add(&mut self, draft: FoodItemDraft) -> Result<FoodItem, CoreError> {
        let item = FoodItem::new(draft);
        self.items.insert(0, item.clone());

        if let Err(err) = self.save() {
            self.items.remove(0);
            return Err(err);
        }

        Ok(item)
    }

    /// Removes the entry with matching identifier. Returns false (and skips
    /// the flush) when no such entry exists.
    pub fn remove(&mut self, id: Uuid) -> Result<bool, CoreError> {
        let pos = match self.items.iter().position(|item| item.id == id) {
            Some(pos) => pos,
            None => return Ok(false),
        };

        let removed = self.items.remove(pos);
        if let Err(err) = self.save() {
            self.items.insert(pos, removed);
            return Err(err);
        }

        Ok(true)
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    /// Size-capped, reduced projection for model context.
    pub fn snapshot(&self) -> Vec<SnapshotEntry> {
        self.items
            .iter()
            .take(SNAPSHOT_LIMIT)
            .map(SnapshotEntry::from)
            .collect()
    }

    fn save(&self) -> Result<(), CoreError> {
        let raw = serde_json::to_string(&self.items)
            .map_err(|err| CoreError::StoreUnavailable(format!("serialize inventory: {}", err)))?;
        self.store.set(INVENTORY_STORE_KEY, &raw)
    }
}
