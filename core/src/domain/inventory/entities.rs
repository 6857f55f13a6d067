use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: Uuid,
    pub name: String,
    pub category: ItemCategory,
    pub brand: Option<String>,
    pub manufacturing_date: Option<NaiveDate>,
    /// Absent means "not found in the scans", never a guess.
    pub expiry_date: Option<NaiveDate>,
    pub added_at: DateTime<Utc>,
    pub freshness: Option<FreshnessLevel>,
    /// Estimated shelf life, used for alerts only when no expiry date exists.
    pub shelf_life_days: Option<u32>,
    pub storage_advice: Option<String>,
    pub nutrition: Option<NutritionInfo>,
    pub notes: Option<String>,
    pub image_ref: Option<String>,
}

/// Candidate shape produced by analysis: everything but identity, which is
/// assigned exactly once at commit time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodItemDraft {
    pub name: String,
    pub category: ItemCategory,
    pub brand: Option<String>,
    pub manufacturing_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub freshness: Option<FreshnessLevel>,
    pub shelf_life_days: Option<u32>,
    pub storage_advice: Option<String>,
    pub nutrition: Option<NutritionInfo>,
    pub notes: Option<String>,
    pub image_ref: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Packaged,
    #[default]
    Fresh,
}

impl ItemCategory {
    pub fn as_str(&self) -> &str {
        match self {
            ItemCategory::Packaged => "packaged",
            ItemCategory::Fresh => "fresh",
        }
    }
}

impl From<&str> for ItemCategory {
    fn from(s: &str) -> Self {
        match s {
            "packaged" => ItemCategory::Packaged,
            _ => ItemCategory::Fresh,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FreshnessLevel {
    Fresh,
    Medium,
    #[serde(rename = "Near-Spoil")]
    NearSpoil,
}

impl FreshnessLevel {
    pub fn as_str(&self) -> &str {
        match self {
            FreshnessLevel::Fresh => "Fresh",
            FreshnessLevel::Medium => "Medium",
            FreshnessLevel::NearSpoil => "Near-Spoil",
        }
    }

    /// Model output is untrusted; anything outside the known levels is dropped.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "Fresh" => Some(FreshnessLevel::Fresh),
            "Medium" => Some(FreshnessLevel::Medium),
            "Near-Spoil" => Some(FreshnessLevel::NearSpoil),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionInfo {
    pub calories: f64,
    pub protein: f64,
    pub fats: f64,
    pub carbs: f64,
}

impl NutritionInfo {
    /// All-zero macros are the "label not found" sentinel, not a measurement.
    pub fn label_missing(&self) -> bool {
        self.calories == 0.0 && self.protein == 0.0 && self.fats == 0.0 && self.carbs == 0.0
    }
}

impl FoodItem {
    pub fn new(draft: FoodItemDraft) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            name: draft.name,
            category: draft.category,
            brand: draft.brand,
            manufacturing_date: draft.manufacturing_date,
            expiry_date: draft.expiry_date,
            added_at: now,
            freshness: draft.freshness,
            shelf_life_days: draft.shelf_life_days,
            storage_advice: draft.storage_advice,
            nutrition: draft.nutrition,
            notes: draft.notes,
            image_ref: draft.image_ref,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freshness_wire_names() {
        assert_eq!(FreshnessLevel::NearSpoil.as_str(), "Near-Spoil");
        assert_eq!(
            FreshnessLevel::from_wire("Near-Spoil"),
            Some(FreshnessLevel::NearSpoil)
        );
        assert_eq!(FreshnessLevel::from_wire("Spoiled"), None);

        let encoded = serde_json::to_string(&FreshnessLevel::NearSpoil).unwrap();
        assert_eq!(encoded, "\"Near-Spoil\"");
    }

    #[test]
    fn test_nutrition_sentinel() {
        let missing = NutritionInfo::default();
        assert!(missing.label_missing());

        let measured = NutritionInfo {
            calories: 52.0,
            protein: 0.3,
            fats: 0.2,
            carbs: 14.0,
        };
        assert!(!measured.label_missing());
    }

    #[test]
    fn test_new_assigns_identity() {
        let draft = FoodItemDraft {
            name: "Oat Milk".to_string(),
            category: ItemCategory::Packaged,
            ..Default::default()
        };

        let a = FoodItem::new(draft.clone());
        let b = FoodItem::new(draft);
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, "Oat Milk");
    }
}
