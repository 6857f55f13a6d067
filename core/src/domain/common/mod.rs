use std::path::PathBuf;

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;

#[derive(Clone, Debug)]
pub struct FreshTrackConfig {
    pub llm: LlmConfig,
    pub store: StoreConfig,
    pub capture: CaptureConfig,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub gemini_api_key: String,
    /// Model used for image scans, where small distorted label text must be read.
    pub scan_model: String,
    /// Cheaper model used for text-only inventory reports.
    pub report_model: String,
    pub request_timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub path: PathBuf,
}

#[derive(Clone, Copy, Debug)]
pub struct CaptureConfig {
    pub max_frames: usize,
    pub max_dimension: u32,
    pub jpeg_quality: f32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            max_frames: 3,
            max_dimension: 1024,
            jpeg_quality: 0.85,
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
