use async_trait::async_trait;

use crate::error::LLMError;
use crate::types::{MessagesRequest, MessagesResponse};

pub type Result<T> = std::result::Result<T, LLMError>;

/// A generative-text service exposing the "create message" operation.
///
/// Implementations own transport concerns (authentication, pooling, timeouts).
/// Callers hold them behind `Arc<dyn MessagesProvider>` so a test double can be
/// swapped in without any process-wide state.
#[async_trait]
pub trait MessagesProvider: Send + Sync {
    /// Send one non-streaming request and return the decoded reply.
    async fn create_message(&self, request: &MessagesRequest) -> Result<MessagesResponse>;
}
