use std::path::PathBuf;

use crate::domain::{
    common::{CaptureConfig, FreshTrackConfig},
    inventory::{entities::FoodItem, services::INVENTORY_STORE_KEY},
    workflow::{script, services::Workflow},
};
use crate::infrastructure::{
    camera::{directory::DirectoryCamera, scripted::ScriptedCamera},
    llm::{gemini_client::GeminiModelClient, scripted::ScriptedModelClient},
    persistence::{json_file::JsonFileStore, memory::InMemoryStore},
};

/// Workflow wired for real use: file-fed camera, Gemini, JSON file store.
pub type FreshTrackWorkflow = Workflow<DirectoryCamera, GeminiModelClient, JsonFileStore>;

/// Workflow wired for the offline tour: canned camera, canned model
/// responses, in-memory store. Same state machine as the real one.
pub type DemoWorkflow = Workflow<ScriptedCamera, ScriptedModelClient, InMemoryStore>;

pub fn create_workflow(
    config: FreshTrackConfig,
    images: Vec<PathBuf>,
) -> anyhow::Result<FreshTrackWorkflow> {
    let model = GeminiModelClient::new(config.llm)?;
    let camera = DirectoryCamera::new(images);
    let store = JsonFileStore::new(config.store.path);
    Ok(Workflow::new(camera, model, store, config.capture))
}

pub fn create_demo_workflow() -> DemoWorkflow {
    let seed: Vec<FoodItem> = script::demo_seed_items()
        .into_iter()
        .map(FoodItem::new)
        .collect();
    let raw = serde_json::to_string(&seed).unwrap_or_default();

    let camera = ScriptedCamera::new(script::demo_frames());
    let model = ScriptedModelClient::new(script::demo_responses());
    let store = InMemoryStore::seeded([(INVENTORY_STORE_KEY.to_string(), raw)]);

    Workflow::new(camera, model, store, CaptureConfig::default())
}
