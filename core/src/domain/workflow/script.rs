use bytes::Bytes;
use chrono::{Duration, Utc};
use serde_json::json;

use crate::domain::{
    analysis::ports::ModelClient,
    capture::{entities::EncodedFrame, ports::CameraDevice},
    common::entities::app_errors::CoreError,
    inventory::{
        entities::{FoodItem, FoodItemDraft, FreshnessLevel, ItemCategory, NutritionInfo},
        ports::LocalStore,
    },
    workflow::{
        entities::{ReportKind, ReportOutcome, SubmitOutcome},
        services::Workflow,
    },
};

/// A replayable sequence of workflow operations. The demo drives the same
/// state machine as a live session; only the camera and model are canned.
pub struct DemoScript {
    pub steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone)]
pub enum ScriptStep {
    Narrate(String),
    SelectScan,
    StartCamera,
    Capture,
    Submit,
    Commit,
    ShowInventory,
    RunReport(ReportKind),
    Pause(u64),
}

/// Emitted to the caller as the script advances, one event per effective
/// step.
#[derive(Debug, Clone)]
pub enum ScriptEvent {
    Narration(String),
    CameraStarted,
    FrameCaptured {
        frames_buffered: usize,
        auto_stopped: bool,
    },
    ScanSubmitted(SubmitOutcome),
    CandidateCommitted(FoodItem),
    InventoryShown(Vec<FoodItem>),
    ReportFinished(ReportKind, ReportOutcome),
}

/// Replays a script against a workflow, reporting each step's result through
/// the callback.
pub async fn play<C, M, S, F>(
    workflow: &Workflow<C, M, S>,
    script: DemoScript,
    mut on_event: F,
) -> Result<(), CoreError>
where
    C: CameraDevice,
    M: ModelClient,
    S: LocalStore,
    F: FnMut(ScriptEvent),
{
    for step in script.steps {
        match step {
            ScriptStep::Narrate(text) => on_event(ScriptEvent::Narration(text)),
            ScriptStep::SelectScan => workflow.select_scan().await,
            ScriptStep::StartCamera => {
                workflow.start_camera().await?;
                on_event(ScriptEvent::CameraStarted);
            }
            ScriptStep::Capture => {
                let outcome = workflow.capture_frame().await?;
                on_event(ScriptEvent::FrameCaptured {
                    frames_buffered: outcome.frames_buffered,
                    auto_stopped: outcome.auto_stopped,
                });
            }
            ScriptStep::Submit => {
                let outcome = workflow.submit_scan().await?;
                on_event(ScriptEvent::ScanSubmitted(outcome));
            }
            ScriptStep::Commit => {
                let item = workflow.commit_candidate().await?;
                on_event(ScriptEvent::CandidateCommitted(item));
            }
            ScriptStep::ShowInventory => {
                let items = workflow.show_inventory().await;
                on_event(ScriptEvent::InventoryShown(items));
            }
            ScriptStep::RunReport(kind) => {
                let outcome = workflow.run_report(kind).await;
                on_event(ScriptEvent::ReportFinished(kind, outcome));
            }
            ScriptStep::Pause(millis) => {
                tokio::time::sleep(std::time::Duration::from_millis(millis)).await;
            }
        }
    }

    Ok(())
}

impl DemoScript {
    /// Scan a milk carton, commit it, then ask for reminders. Pauses keep
    /// the narration readable at the terminal.
    pub fn guided_tour() -> Self {
        Self {
            steps: vec![
                ScriptStep::Narrate(
                    "Scanning a milk carton: two shots, front and expiry stamp.".to_string(),
                ),
                ScriptStep::SelectScan,
                ScriptStep::StartCamera,
                ScriptStep::Capture,
                ScriptStep::Capture,
                ScriptStep::Pause(400),
                ScriptStep::Narrate("Sending both frames for identification.".to_string()),
                ScriptStep::Submit,
                ScriptStep::Commit,
                ScriptStep::Pause(400),
                ScriptStep::Narrate("The carton is in the inventory now.".to_string()),
                ScriptStep::ShowInventory,
                ScriptStep::Pause(400),
                ScriptStep::Narrate("Asking which items need attention.".to_string()),
                ScriptStep::RunReport(ReportKind::Reminders),
            ],
        }
    }
}

/// Items pre-seeded into the demo store before the tour starts.
pub fn demo_seed_items() -> Vec<FoodItemDraft> {
    vec![
        FoodItemDraft {
            name: "Red Apples".to_string(),
            category: ItemCategory::Fresh,
            freshness: Some(FreshnessLevel::Fresh),
            shelf_life_days: Some(7),
            storage_advice: Some("Refrigerate in the crisper drawer".to_string()),
            nutrition: Some(NutritionInfo {
                calories: 52.0,
                protein: 0.3,
                fats: 0.2,
                carbs: 14.0,
            }),
            ..Default::default()
        },
        FoodItemDraft {
            name: "Rolled Oats".to_string(),
            category: ItemCategory::Packaged,
            brand: Some("Morning Mill".to_string()),
            expiry_date: Some((Utc::now() + Duration::days(200)).date_naive()),
            storage_advice: Some("Keep sealed in a dry cupboard".to_string()),
            ..Default::default()
        },
    ]
}

/// Stand-in camera frames for the tour. The bytes are placeholders; nothing
/// in the demo decodes them.
pub fn demo_frames() -> Vec<EncodedFrame> {
    vec![
        EncodedFrame {
            mime_type: "image/jpeg".to_string(),
            data: Bytes::from_static(b"demo-frame-milk-front"),
            source: Some("milk_carton_front.jpg".to_string()),
        },
        EncodedFrame {
            mime_type: "image/jpeg".to_string(),
            data: Bytes::from_static(b"demo-frame-milk-expiry"),
            source: Some("milk_carton_expiry.jpg".to_string()),
        },
    ]
}

/// Canned model responses consumed in script order: first the scan, then the
/// reminders report. Dates are relative so the milk always lands inside the
/// expiry alert window.
pub fn demo_responses() -> Vec<String> {
    let expiry = (Utc::now() + Duration::days(2)).date_naive();

    let scan = json!({
        "item": {
            "name": "Whole Milk",
            "type": "packaged",
            "brand": "Green Pastures",
            "expiryDate": expiry.format("%Y-%m-%d").to_string(),
            "freshness": "Fresh",
            "storageAdvice": "Keep refrigerated below 4C",
            "nutrition": {
                "calories": 64.0,
                "protein": 3.3,
                "fats": 3.6,
                "carbs": 4.8
            },
            "notes": "Expiry stamp read from the second frame."
        }
    });

    let reminders = json!({
        "reminders": [
            format!("Whole Milk expires on {}, use it within two days.", expiry.format("%Y-%m-%d")),
            "Red Apples are fresh for about a week, plan a snack or a pie.",
        ]
    });

    vec![scan.to_string(), reminders.to_string()]
}
