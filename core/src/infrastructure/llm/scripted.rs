use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::domain::{
    analysis::ports::ModelClient, capture::entities::EncodedFrame,
    common::entities::app_errors::CoreError,
};

/// Plays back canned response bodies in order. Backs the demo and the
/// integration tests; never touches the network.
pub struct ScriptedModelClient {
    responses: Mutex<VecDeque<String>>,
}

impl ScriptedModelClient {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }

    /// A client whose every call fails, for exercising failure paths.
    pub fn failing() -> Self {
        Self::new(Vec::new())
    }

    fn next_response(&self) -> Result<String, CoreError> {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or_else(|| CoreError::AnalysisFailed("response script exhausted".to_string()))
    }
}

impl ModelClient for ScriptedModelClient {
    async fn generate_with_images(
        &self,
        _system_instruction: String,
        _prompt: String,
        _frames: Vec<EncodedFrame>,
        _response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        self.next_response()
    }

    async fn generate_with_text(
        &self,
        _system_instruction: String,
        _prompt: String,
        _response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        self.next_response()
    }
}
