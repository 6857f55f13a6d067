use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::analysis::value_objects::AnalyzeInput;

/// Standing instructions sent with every call. The hard rules exist because
/// the model will happily invent expiry dates and nutrition tables unless
/// told, in capitals, not to.
pub const SYSTEM_INSTRUCTION: &str = r#"
You are 'FreshTrack AI', a high-precision smart food inventory assistant.
Your primary mission is accurate identification and extraction of data from food images.

STRICT EXPIRY DATE RULES:
1. DO NOT GUESS OR INVENT AN EXPIRY DATE. If you cannot see a date clearly in the provided images, you MUST return an empty string "" for the 'expiryDate' field.
2. TEMPORAL CONTEXT: The current date is given as CURRENT_DATE_CONTEXT in the request. Expiry dates are typically in the FUTURE.
3. If you see a date like '26', it almost certainly refers to 2026.
4. If 'expiryDate' is empty, you MUST provide a helpful explanation in the 'notes' field.

STRICT NUTRITION RULES:
1. FOR PACKAGED PRODUCTS: Do NOT guess or assume nutrition facts if the nutrition label/table is NOT visible in the images. If the label is missing, set all nutrition values (calories, protein, fats, carbs) to 0.
2. FOR FRESH PRODUCE (e.g., a single apple, a banana): You MAY provide standard nutritional estimates based on the identified item.
3. If you set nutrition values to 0 because the label was missing, mention this in the 'notes' field (e.g., "Nutrition label not found in scans; values set to zero.").
4. Format detected dates as YYYY-MM-DD.

COMMANDS:
- SCAN_ITEM: Analyze up to 3 images of the SAME item. Synthesize info.
- SHOW_REMINDERS: Summarize items that need urgent attention based on inventory.
- SHOW_NUTRITION: Provide a health-focused summary of the current inventory.
- SUGGEST_RECIPES: Creative recipes using the current inventory.
- VALIDATE_INPUT: Judge whether the USER_INPUT text is a plausible answer for kitchen onboarding. Set 'isValid' and respond in 'chefReaction'.

PERSONA:
- When a USER_PROFILE is provided, respond in 'chefReaction' as 'Chef Gusto', a warm and enthusiastic cook, addressing the user by name.

Rules:
1. ALWAYS respond with valid JSON matching the requested schema.
2. For fresh produce, estimate 'shelfLifeDays' based on visual state.
3. DO NOT include conversational filler.
"#;

/// Substituted when a conversational validation call fails outright. Marks
/// the input as accepted so a flaky network never blocks onboarding.
pub const VALIDATION_FALLBACK_REACTION: &str =
    "Ah, the kitchen got a little noisy just now! I did not catch every word, but it sounds wonderful to me. Let's keep going!";

/// Assembles the per-call prompt: command tag, temporal context, then the
/// optional sections in a fixed order.
pub fn build_prompt(input: &AnalyzeInput, now: DateTime<Utc>) -> String {
    let mut prompt = format!("COMMAND: {}\n", input.command.as_str());
    prompt.push_str(&format!(
        "CURRENT_DATE_CONTEXT: {}\n",
        now.to_rfc3339_opts(SecondsFormat::Millis, true)
    ));

    if !input.snapshot.is_empty() {
        let preview = serde_json::to_string(&input.snapshot).unwrap_or_default();
        prompt.push_str(&format!("CURRENT_INVENTORY_PREVIEW: {}\n", preview));
    }

    if let Some(profile) = &input.profile {
        let profile = serde_json::to_string(profile).unwrap_or_default();
        prompt.push_str(&format!("USER_PROFILE: {}\n", profile));
    }

    if let Some(text) = &input.free_text {
        prompt.push_str(&format!("USER_INPUT: {}\n", text));
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::entities::Command;
    use crate::domain::analysis::value_objects::UserProfile;
    use crate::domain::inventory::value_objects::SnapshotEntry;
    use chrono::TimeZone;

    fn input(command: Command) -> AnalyzeInput {
        AnalyzeInput {
            command,
            frames: Vec::new(),
            snapshot: Vec::new(),
            free_text: None,
            profile: None,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_prompt_starts_with_command_tag() {
        let prompt = build_prompt(&input(Command::ScanItem), fixed_now());
        assert!(prompt.starts_with("COMMAND: SCAN_ITEM\n"));
        assert!(prompt.contains("CURRENT_DATE_CONTEXT: 2026-03-14T09:30:00.000Z"));
    }

    #[test]
    fn test_empty_snapshot_omits_preview_section() {
        let prompt = build_prompt(&input(Command::ShowReminders), fixed_now());
        assert!(!prompt.contains("CURRENT_INVENTORY_PREVIEW"));
    }

    #[test]
    fn test_snapshot_is_serialized_into_preview() {
        let mut input = input(Command::ShowReminders);
        input.snapshot.push(SnapshotEntry {
            name: "Milk".to_string(),
            expiry: None,
            freshness: None,
        });

        let prompt = build_prompt(&input, fixed_now());
        assert!(prompt.contains(r#"CURRENT_INVENTORY_PREVIEW: [{"name":"Milk"}]"#));
    }

    #[test]
    fn test_free_text_and_profile_sections() {
        let mut input = input(Command::ValidateInput);
        input.free_text = Some("I love spicy food".to_string());
        input.profile = Some(UserProfile {
            name: "Sam".to_string(),
        });

        let prompt = build_prompt(&input, fixed_now());
        assert!(prompt.contains(r#"USER_PROFILE: {"name":"Sam"}"#));
        assert!(prompt.contains("USER_INPUT: I love spicy food\n"));
    }
}
