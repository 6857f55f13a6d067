use std::time::Duration;

use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::{
    analysis::ports::ModelClient,
    capture::entities::EncodedFrame,
    common::{LlmConfig, entities::app_errors::CoreError},
};

// Scan calls read small, often distorted label text and get the larger
// budget; text-only report calls run on the cheaper model.
const SCAN_THINKING_BUDGET: u32 = 16000;
const REPORT_THINKING_BUDGET: u32 = 4000;

#[derive(Debug, Clone)]
pub struct GeminiModelClient {
    api_key: String,
    scan_model: String,
    report_model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: String,
}

impl GeminiModelClient {
    pub fn new(config: LlmConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            api_key: config.gemini_api_key,
            scan_model: config.scan_model,
            report_model: config.report_model,
            client,
        })
    }

    fn generation_config(
        response_schema: serde_json::Value,
        thinking_budget: u32,
    ) -> GenerationConfig {
        GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema,
            thinking_config: ThinkingConfig { thinking_budget },
        }
    }

    async fn call_gemini_api(
        &self,
        model: &str,
        request: GeminiRequest,
    ) -> Result<String, CoreError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::error!(model = %model, "Gemini API request timed out");
                    CoreError::AnalysisFailed(format!("model request timed out: {}", e))
                } else {
                    tracing::error!(model = %model, error = %e, "Gemini API request failed");
                    CoreError::AnalysisFailed(format!("model API error: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(model = %model, status = %status, "Gemini API error: {}", error_text);
            return Err(CoreError::AnalysisFailed(format!(
                "model API returned error: {} - {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response envelope: {}", e);
            CoreError::AnalysisFailed(format!("failed to parse model response: {}", e))
        })?;

        gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| CoreError::AnalysisFailed("empty response from model".to_string()))
    }
}

impl ModelClient for GeminiModelClient {
    #[instrument(skip_all, fields(model = %self.scan_model, frame_count = frames.len()))]
    async fn generate_with_images(
        &self,
        system_instruction: String,
        prompt: String,
        frames: Vec<EncodedFrame>,
        response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        // Image parts go ahead of the text prompt
        let mut parts: Vec<Part> = frames
            .iter()
            .map(|frame| Part::InlineData {
                inline_data: InlineData {
                    mime_type: frame.mime_type.clone(),
                    data: general_purpose::STANDARD.encode(&frame.data),
                },
            })
            .collect();
        parts.push(Part::Text { text: prompt });

        let request = GeminiRequest {
            contents: vec![Content { parts }],
            system_instruction: Some(Content {
                parts: vec![Part::Text {
                    text: system_instruction,
                }],
            }),
            generation_config: Some(Self::generation_config(
                response_schema,
                SCAN_THINKING_BUDGET,
            )),
        };

        self.call_gemini_api(&self.scan_model, request).await
    }

    #[instrument(skip_all, fields(model = %self.report_model))]
    async fn generate_with_text(
        &self,
        system_instruction: String,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part::Text { text: prompt }],
            }],
            system_instruction: Some(Content {
                parts: vec![Part::Text {
                    text: system_instruction,
                }],
            }),
            generation_config: Some(Self::generation_config(
                response_schema,
                REPORT_THINKING_BUDGET,
            )),
        };

        self.call_gemini_api(&self.report_model, request).await
    }
}
