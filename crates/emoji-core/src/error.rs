use emoji_llm::LLMError;
use thiserror::Error;

use crate::types::AssetKey;
use crate::validation::ValidationErrors;

/// Every way one pipeline run can fail. No variant is retried.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("SVG asset not found for key '{svg_key}'")]
    AssetNotFound { svg_key: AssetKey },

    #[error(transparent)]
    UpstreamShape(#[from] UpstreamShapeError),

    #[error("generative service call failed: {0}")]
    UpstreamCall(#[from] LLMError),
}

/// The service answered, but not with a leading text block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamShapeError {
    #[error("No content in Claude API response")]
    EmptyContent,

    #[error("Unexpected response format from Claude API")]
    UnexpectedBlock { kind: &'static str },
}
