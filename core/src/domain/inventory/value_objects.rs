use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::inventory::entities::{FoodItem, FreshnessLevel};

/// Maximum number of entries included in a model context snapshot.
pub const SNAPSHOT_LIMIT: usize = 20;

/// Reduced projection of one item for model context; full records never leave
/// the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freshness: Option<FreshnessLevel>,
}

impl From<&FoodItem> for SnapshotEntry {
    fn from(item: &FoodItem) -> Self {
        Self {
            name: item.name.clone(),
            expiry: item.expiry_date,
            freshness: item.freshness,
        }
    }
}
