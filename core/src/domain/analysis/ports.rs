use std::future::Future;

use crate::domain::{capture::entities::EncodedFrame, common::entities::app_errors::CoreError};

#[cfg_attr(test, mockall::automock)]
pub trait ModelClient: Send + Sync {
    /// One structured-output call with image parts ahead of the text prompt.
    /// Returns the raw response body text; the caller parses and validates.
    fn generate_with_images(
        &self,
        system_instruction: String,
        prompt: String,
        frames: Vec<EncodedFrame>,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    /// Text-only variant for report commands that carry no images.
    fn generate_with_text(
        &self,
        system_instruction: String,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}
