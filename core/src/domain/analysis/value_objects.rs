use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{
    analysis::entities::Command, capture::entities::EncodedFrame,
    inventory::value_objects::SnapshotEntry,
};

/// Everything one analysis call needs.
#[derive(Debug, Clone)]
pub struct AnalyzeInput {
    pub command: Command,
    /// Zero to three encoded stills of the same physical item.
    pub frames: Vec<EncodedFrame>,
    /// Reduced inventory context, already capped by the caller.
    pub snapshot: Vec<SnapshotEntry>,
    pub free_text: Option<String>,
    pub profile: Option<UserProfile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
}

/// Model output exactly as the wire carries it. The declared response schema
/// is advisory; every field is optional here and validation decides what
/// survives.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAnalysisResponse {
    pub item: Option<RawFoodItem>,
    pub recipes: Option<Vec<RawRecipe>>,
    pub reminders: Option<Vec<String>>,
    pub nutrition_summary: Option<String>,
    pub chef_reaction: Option<String>,
    pub is_valid: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFoodItem {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub brand: Option<String>,
    pub manufacturing_date: Option<String>,
    pub expiry_date: Option<String>,
    pub freshness: Option<String>,
    pub shelf_life_days: Option<f64>,
    pub storage_advice: Option<String>,
    pub nutrition: Option<RawNutrition>,
    pub notes: Option<String>,
}

/// Macros arrive as numbers, but models sometimes quote them. Anything
/// unreadable collapses to zero, which is already the "label not found"
/// sentinel.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct RawNutrition {
    #[serde(deserialize_with = "lenient_f64")]
    pub calories: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub protein: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub fats: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub carbs: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRecipe {
    pub title: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
    pub prep_time: Option<String>,
    pub difficulty: Option<String>,
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize_to_none() {
        let parsed: RawAnalysisResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.item.is_none());
        assert!(parsed.recipes.is_none());
        assert!(parsed.is_valid.is_none());
    }

    #[test]
    fn test_quoted_nutrition_numbers_are_coerced() {
        let raw = r#"{"calories": "250", "protein": 12.5, "fats": null, "carbs": true}"#;
        let parsed: RawNutrition = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.calories, 250.0);
        assert_eq!(parsed.protein, 12.5);
        assert_eq!(parsed.fats, 0.0);
        assert_eq!(parsed.carbs, 0.0);
    }

    #[test]
    fn test_item_type_maps_from_wire_name() {
        let raw = r#"{"item": {"name": "Milk", "type": "packaged", "shelfLifeDays": 7}}"#;
        let parsed: RawAnalysisResponse = serde_json::from_str(raw).unwrap();
        let item = parsed.item.unwrap();
        assert_eq!(item.item_type.as_deref(), Some("packaged"));
        assert_eq!(item.shelf_life_days, Some(7.0));
    }
}
