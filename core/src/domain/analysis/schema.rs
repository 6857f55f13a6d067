use serde_json::json;

/// Returns the response schema requested from the model. Declared shape only;
/// validation still treats every field as optional on receipt.
pub fn get_analysis_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "item": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "type": { "type": "string" },
                    "brand": { "type": "string" },
                    "expiryDate": {
                        "type": "string",
                        "description": "Format: YYYY-MM-DD. Leave empty string if not clearly found."
                    },
                    "freshness": { "type": "string" },
                    "shelfLifeDays": { "type": "number" },
                    "storageAdvice": { "type": "string" },
                    "nutrition": {
                        "type": "object",
                        "properties": {
                            "calories": { "type": "number" },
                            "protein": { "type": "number" },
                            "fats": { "type": "number" },
                            "carbs": { "type": "number" }
                        }
                    },
                    "notes": { "type": "string" }
                }
            },
            "recipes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "ingredients": {
                            "type": "array",
                            "items": { "type": "string" }
                        },
                        "instructions": {
                            "type": "array",
                            "items": { "type": "string" }
                        },
                        "prepTime": { "type": "string" },
                        "difficulty": { "type": "string" }
                    }
                }
            },
            "reminders": {
                "type": "array",
                "items": { "type": "string" }
            },
            "nutritionSummary": { "type": "string" },
            "chefReaction": { "type": "string" },
            "isValid": { "type": "boolean" }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_all_response_fields() {
        let schema = get_analysis_schema();
        let properties = schema.get("properties").unwrap();

        for field in [
            "item",
            "recipes",
            "reminders",
            "nutritionSummary",
            "chefReaction",
            "isValid",
        ] {
            assert!(properties.get(field).is_some(), "missing field {}", field);
        }
    }

    #[test]
    fn test_expiry_date_keeps_empty_string_contract() {
        let schema = get_analysis_schema();
        let description = schema["properties"]["item"]["properties"]["expiryDate"]["description"]
            .as_str()
            .unwrap();
        assert!(description.contains("empty string"));
    }
}
