use serde::{Deserialize, Serialize};

use crate::domain::inventory::entities::FoodItemDraft;

/// Commands the model understands. Each maps to a wire tag in the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ScanItem,
    ShowReminders,
    ShowNutrition,
    SuggestRecipes,
    ValidateInput,
}

impl Command {
    pub fn as_str(&self) -> &str {
        match self {
            Command::ScanItem => "SCAN_ITEM",
            Command::ShowReminders => "SHOW_REMINDERS",
            Command::ShowNutrition => "SHOW_NUTRITION",
            Command::SuggestRecipes => "SUGGEST_RECIPES",
            Command::ValidateInput => "VALIDATE_INPUT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl From<&str> for Difficulty {
    fn from(value: &str) -> Self {
        match value {
            "Easy" => Difficulty::Easy,
            "Hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: Option<String>,
    pub difficulty: Difficulty,
}

/// Validated model output. Which fields are populated depends on the command,
/// and even then nothing is guaranteed; callers treat every field as optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisReport {
    /// Identified item ready for review. None means the model saw nothing
    /// usable, which is a normal outcome, not a failure.
    pub candidate: Option<FoodItemDraft>,
    pub reminders: Option<Vec<String>>,
    pub nutrition_summary: Option<String>,
    pub recipes: Option<Vec<Recipe>>,
    pub chef_reaction: Option<String>,
    pub input_valid: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_wire_tags() {
        assert_eq!(Command::ScanItem.as_str(), "SCAN_ITEM");
        assert_eq!(Command::SuggestRecipes.as_str(), "SUGGEST_RECIPES");
    }

    #[test]
    fn test_unknown_difficulty_falls_back_to_medium() {
        assert_eq!(Difficulty::from("Easy"), Difficulty::Easy);
        assert_eq!(Difficulty::from("impossible"), Difficulty::Medium);
    }
}
