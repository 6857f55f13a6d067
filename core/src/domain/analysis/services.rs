use chrono::{NaiveDate, Utc};

use crate::domain::{
    analysis::{
        entities::{AnalysisReport, Difficulty, Recipe},
        ports::ModelClient,
        prompt::{SYSTEM_INSTRUCTION, build_prompt},
        schema::get_analysis_schema,
        value_objects::{AnalyzeInput, RawAnalysisResponse, RawFoodItem, RawRecipe},
    },
    common::entities::app_errors::CoreError,
    inventory::entities::{FoodItemDraft, FreshnessLevel, ItemCategory, NutritionInfo},
};

// Anything past a century is model noise, not a shelf life.
const MAX_SHELF_LIFE_DAYS: f64 = 36500.0;

/// Translates one workflow command into one model call and turns the
/// untrusted response into a validated report.
pub struct AnalysisService<M: ModelClient> {
    model: M,
}

impl<M: ModelClient> AnalysisService<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub async fn analyze(&self, input: AnalyzeInput) -> Result<AnalysisReport, CoreError> {
        // 1. Build the per-call prompt
        let prompt = build_prompt(&input, Utc::now());

        // 2. Declared response schema
        let response_schema = get_analysis_schema();

        // 3. Call the model, image parts first when frames are present
        let raw_response = if input.frames.is_empty() {
            self.model
                .generate_with_text(SYSTEM_INSTRUCTION.to_string(), prompt, response_schema)
                .await?
        } else {
            self.model
                .generate_with_images(
                    SYSTEM_INSTRUCTION.to_string(),
                    prompt,
                    input.frames,
                    response_schema,
                )
                .await?
        };

        // 4. Parse the body
        let raw: RawAnalysisResponse =
            serde_json::from_str(raw_response.trim()).map_err(|e| {
                tracing::error!("Failed to parse model response: {}", e);
                CoreError::AnalysisFailed(format!("Failed to parse model response: {}", e))
            })?;

        // 5. Validate field by field
        Ok(validate_report(raw))
    }
}

/// Field-by-field validation of the raw response. Anything malformed is
/// dropped rather than guessed at; a candidate without a usable name is no
/// candidate at all.
pub fn validate_report(raw: RawAnalysisResponse) -> AnalysisReport {
    AnalysisReport {
        candidate: raw.item.and_then(validate_candidate),
        reminders: raw
            .reminders
            .map(|lines| {
                lines
                    .into_iter()
                    .map(|line| line.trim().to_string())
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|lines| !lines.is_empty()),
        nutrition_summary: non_blank(raw.nutrition_summary),
        recipes: raw
            .recipes
            .map(|recipes| {
                recipes
                    .into_iter()
                    .filter_map(validate_recipe)
                    .collect::<Vec<_>>()
            })
            .filter(|recipes| !recipes.is_empty()),
        chef_reaction: non_blank(raw.chef_reaction),
        input_valid: raw.is_valid,
    }
}

fn validate_candidate(item: RawFoodItem) -> Option<FoodItemDraft> {
    let name = non_blank(item.name)?;

    Some(FoodItemDraft {
        name,
        category: item
            .item_type
            .as_deref()
            .map(ItemCategory::from)
            .unwrap_or_default(),
        brand: non_blank(item.brand),
        manufacturing_date: item.manufacturing_date.as_deref().and_then(parse_wire_date),
        expiry_date: item.expiry_date.as_deref().and_then(parse_wire_date),
        freshness: item.freshness.as_deref().and_then(FreshnessLevel::from_wire),
        shelf_life_days: item
            .shelf_life_days
            .filter(|days| days.is_finite() && *days > 0.0 && *days <= MAX_SHELF_LIFE_DAYS)
            .map(|days| days.round() as u32),
        storage_advice: non_blank(item.storage_advice),
        nutrition: item.nutrition.map(|n| NutritionInfo {
            calories: n.calories,
            protein: n.protein,
            fats: n.fats,
            carbs: n.carbs,
        }),
        notes: non_blank(item.notes),
        image_ref: None,
    })
}

fn validate_recipe(recipe: RawRecipe) -> Option<Recipe> {
    let title = non_blank(recipe.title)?;

    Some(Recipe {
        title,
        ingredients: recipe.ingredients.unwrap_or_default(),
        instructions: recipe.instructions.unwrap_or_default(),
        prep_time: non_blank(recipe.prep_time),
        difficulty: recipe
            .difficulty
            .as_deref()
            .map(Difficulty::from)
            .unwrap_or_default(),
    })
}

/// Dates arrive as YYYY-MM-DD or as an empty string meaning "not found".
/// Anything else is treated as not found too, never reinterpreted.
fn parse_wire_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
