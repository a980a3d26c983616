//! End-to-end generation: validate, read the asset, prompt the model, extract
//! the reply.
//!
//! Each run is independent. The only await that leaves the process is the
//! model call, and nothing shared is held across it.

use std::sync::Arc;

use emoji_llm::{ContentBlock, MessagesProvider, MessagesRequest, MessagesResponse};
use serde_json::Value;

use crate::assets::AssetStore;
use crate::error::{PipelineError, UpstreamShapeError};
use crate::prompt::{build_prompt, preview};
use crate::types::{EmojiRequest, GeneratedMarkup};
use crate::validation::validate_request;

pub const MODEL_ID: &str = "claude-3-7-sonnet-20250219";
pub const MAX_OUTPUT_TOKENS: u32 = 4000;

const LOG_PREVIEW_CHARS: usize = 100;

#[derive(Clone)]
pub struct GenerationPipeline {
    assets: AssetStore,
    provider: Arc<dyn MessagesProvider>,
}

impl GenerationPipeline {
    pub fn new(assets: AssetStore, provider: Arc<dyn MessagesProvider>) -> Self {
        Self { assets, provider }
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// Validate an untyped body and run the generation on it.
    ///
    /// Validation failures return before any file or network access.
    pub async fn run(&self, body: &Value) -> Result<GeneratedMarkup, PipelineError> {
        log::debug!(
            "Request body: {}",
            preview(&body.to_string(), LOG_PREVIEW_CHARS)
        );

        let request = validate_request(body).map_err(|errors| {
            log::error!("Invalid request body: {}", errors);
            errors
        })?;

        log::info!(
            "Validated request data: svgKey={} description={:?}",
            request.svg_key,
            request.description.as_str()
        );

        self.generate(&request).await
    }

    pub async fn generate(&self, request: &EmojiRequest) -> Result<GeneratedMarkup, PipelineError> {
        let source = self.assets.read(&request.svg_key).await?;

        let prompt = build_prompt(&source, &request.description);
        log::debug!(
            "Calling Claude API with prompt: {}",
            preview(&prompt, LOG_PREVIEW_CHARS)
        );

        let message_request = MessagesRequest::single_user(MODEL_ID, MAX_OUTPUT_TOKENS, prompt);
        let response = self
            .provider
            .create_message(&message_request)
            .await
            .map_err(|e| {
                log::error!("Error generating emoji: {}", e);
                PipelineError::UpstreamCall(e)
            })?;

        let markup = extract_markup(response)?;
        log::debug!(
            "Claude API response: {}",
            preview(markup.as_str(), LOG_PREVIEW_CHARS)
        );

        Ok(markup)
    }
}

/// Take the first content block's text exactly as returned.
pub fn extract_markup(response: MessagesResponse) -> Result<GeneratedMarkup, UpstreamShapeError> {
    let Some(first) = response.content.into_iter().next() else {
        log::error!("No content in Claude API response");
        return Err(UpstreamShapeError::EmptyContent);
    };

    match first {
        ContentBlock::Text { text } => Ok(GeneratedMarkup::new(text)),
        other => {
            log::error!("Unexpected content block type: {}", other.kind());
            Err(UpstreamShapeError::UnexpectedBlock { kind: other.kind() })
        }
    }
}
