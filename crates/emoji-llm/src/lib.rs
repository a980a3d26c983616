pub mod error;
pub mod provider;
pub mod providers;
pub mod types;

pub use error::LLMError;
pub use provider::{MessagesProvider, Result};
pub use providers::AnthropicProvider;
pub use types::{ContentBlock, Message, MessagesRequest, MessagesResponse, Role, Usage};
