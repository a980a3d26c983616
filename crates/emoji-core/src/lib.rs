pub mod assets;
pub mod error;
pub mod pipeline;
pub mod prompt;
pub mod types;
pub mod validation;

pub use assets::AssetStore;
pub use error::{PipelineError, UpstreamShapeError};
pub use pipeline::{GenerationPipeline, MAX_OUTPUT_TOKENS, MODEL_ID};
pub use types::{AssetKey, Description, EmojiRequest, GeneratedMarkup, SourceMarkup};
pub use validation::{validate_request, ValidationErrors, MAX_DESCRIPTION_LENGTH};
