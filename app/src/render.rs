use chrono::{DateTime, Duration, Utc};

use freshtrack_core::domain::analysis::{AnalysisReport, Recipe};
use freshtrack_core::domain::inventory::policies::{EXPIRY_ALERT_WINDOW_DAYS, expires_within};
use freshtrack_core::domain::inventory::{FoodItem, FreshnessLevel, ItemCategory, NutritionInfo};
use freshtrack_core::domain::workflow::ReportKind;

/// Review card for an identified item. Missing expiry and missing nutrition
/// labels are called out loudly; both mean "check the packaging yourself".
pub fn candidate_card(report: &AnalysisReport) -> String {
    let Some(item) = report.candidate.as_ref() else {
        return "No candidate to review.".to_string();
    };

    let mut lines: Vec<String> = Vec::new();

    if item.expiry_date.is_none() {
        lines.push("! Expiry Date Not Found".to_string());
        lines.push(
            "  Gemini could not locate a clear date in the scans. Please check manually."
                .to_string(),
        );
        lines.push(String::new());
    }

    let label_missing = item.nutrition.map_or(true, |n| n.label_missing());
    if item.category == ItemCategory::Packaged && label_missing {
        lines.push("! Nutrition Facts Unavailable".to_string());
        lines.push("  Nutrition label was not visible. No facts were assumed.".to_string());
        lines.push(String::new());
    }

    lines.push(item.name.clone());
    lines.push(format!(
        "Brand: {}",
        item.brand.as_deref().unwrap_or("Identified Item")
    ));
    lines.push(format!(
        "Freshness: {}",
        item.freshness
            .as_ref()
            .map(FreshnessLevel::as_str)
            .unwrap_or("Verified")
    ));
    lines.push(String::new());

    let nutrition = item.nutrition.unwrap_or_default();
    lines.push(format!(
        "{}  {}  {}  {}",
        macro_cell("Calories", nutrition.calories, ""),
        macro_cell("Protein", nutrition.protein, "g"),
        macro_cell("Carbs", nutrition.carbs, "g"),
        macro_cell("Fats", nutrition.fats, "g"),
    ));
    lines.push(String::new());

    lines.push(format!(
        "Expiry Date: {}",
        item.expiry_date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "NOT DETECTED".to_string()),
    ));
    if let Some(notes) = item.notes.as_deref() {
        lines.push(format!("AI Analyst Notes: {}", notes));
    }
    lines.push(format!(
        "Storage Advice: {}",
        item.storage_advice
            .as_deref()
            .unwrap_or("Keep in a cool dry place")
    ));

    if let Some(reaction) = report.chef_reaction.as_deref() {
        lines.push(String::new());
        lines.push(format!("Chef Gusto: {}", reaction));
    }

    lines.join("\n")
}

/// Inventory listing, most recent first, with an urgency flag on anything
/// inside the expiry alert window.
pub fn inventory_table(items: &[FoodItem], now: DateTime<Utc>) -> String {
    if items.is_empty() {
        return "Your inventory is empty. Scan some items to get started!".to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("Your Kitchen ({} Items)", items.len()));

    let window = Duration::days(EXPIRY_ALERT_WINDOW_DAYS);
    for item in items {
        lines.push(String::new());

        let mut headline = item.name.clone();
        if let Some(freshness) = item.freshness.as_ref() {
            headline.push_str(&format!(" [{}]", freshness.as_str()));
        }
        if expires_within(item, now, window) {
            headline.push_str("  EXPIRING SOON");
        }
        lines.push(headline);

        lines.push(format!(
            "  {}  ({})",
            item.brand.as_deref().unwrap_or("Fresh Produce"),
            item.id
        ));
        lines.push(format!(
            "  {}",
            item.expiry_date
                .map(|date| format!("Expires: {}", date.format("%Y-%m-%d")))
                .unwrap_or_else(|| "No Expiry Date".to_string()),
        ));

        match item.nutrition {
            Some(nutrition) if !nutrition.label_missing() => {
                lines.push(format!(
                    "  Cals {}  Prot {}g",
                    fmt_number(nutrition.calories),
                    fmt_number(nutrition.protein)
                ));
            }
            _ => lines.push("  Nutrition label not found".to_string()),
        }

        if let Some(advice) = item.storage_advice.as_deref() {
            lines.push(format!("  {}", advice));
        }
    }

    lines.join("\n")
}

/// Report view for one of the inventory-wide commands. Nutrition totals come
/// from the local inventory; only the summary sentence is model output.
pub fn report(kind: ReportKind, report: &AnalysisReport, items: &[FoodItem]) -> String {
    let mut lines: Vec<String> = Vec::new();

    match kind {
        ReportKind::Reminders => {
            lines.push("Smart Reminders".to_string());
            match report.reminders.as_deref() {
                Some(reminders) if !reminders.is_empty() => {
                    for reminder in reminders {
                        lines.push(format!("  - {}", reminder));
                    }
                }
                _ => lines.push("  No urgent reminders. Your inventory looks good!".to_string()),
            }
        }
        ReportKind::Nutrition => {
            lines.push("Inventory Nutrition Analysis".to_string());
            let protein: f64 = macro_total(items, |n| n.protein);
            let carbs: f64 = macro_total(items, |n| n.carbs);
            let fats: f64 = macro_total(items, |n| n.fats);
            lines.push(format!("  Prot (g): {}", fmt_number(protein)));
            lines.push(format!("  Carb (g): {}", fmt_number(carbs)));
            lines.push(format!("  Fat (g): {}", fmt_number(fats)));
            if let Some(summary) = report.nutrition_summary.as_deref() {
                lines.push(String::new());
                lines.push(format!("  {}", summary));
            }
        }
        ReportKind::Recipes => {
            lines.push("Recipes".to_string());
            match report.recipes.as_deref() {
                Some(recipes) if !recipes.is_empty() => {
                    for recipe in recipes {
                        lines.push(String::new());
                        lines.extend(recipe_lines(recipe));
                    }
                }
                _ => lines.push("  No recipe ideas this time.".to_string()),
            }
        }
    }

    if let Some(reaction) = report.chef_reaction.as_deref() {
        lines.push(String::new());
        lines.push(format!("Chef Gusto: {}", reaction));
    }

    lines.join("\n")
}

fn recipe_lines(recipe: &Recipe) -> Vec<String> {
    let mut lines = Vec::new();

    let mut headline = format!("{} [{}]", recipe.title, recipe.difficulty.as_str());
    if let Some(prep) = recipe.prep_time.as_deref() {
        headline.push_str(&format!(" ({})", prep));
    }
    lines.push(headline);

    lines.push("  Ingredients:".to_string());
    for ingredient in &recipe.ingredients {
        lines.push(format!("    - {}", ingredient));
    }

    if !recipe.instructions.is_empty() {
        lines.push("  Instructions:".to_string());
        for (step, instruction) in recipe.instructions.iter().enumerate() {
            lines.push(format!("    {}. {}", step + 1, instruction));
        }
    }

    lines
}

fn macro_total<F>(items: &[FoodItem], field: F) -> f64
where
    F: Fn(&NutritionInfo) -> f64,
{
    items
        .iter()
        .filter_map(|item| item.nutrition.as_ref())
        .map(field)
        .sum()
}

/// Zero is the "not on the label" sentinel and renders as a dash.
fn macro_cell(label: &str, value: f64, unit: &str) -> String {
    if value == 0.0 {
        format!("{}: --", label)
    } else {
        format!("{}: {}{}", label, fmt_number(value), unit)
    }
}

fn fmt_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}
