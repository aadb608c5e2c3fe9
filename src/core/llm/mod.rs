//! Response generation through a chat-completion model.

mod azure_openai;

pub use azure_openai::AzureOpenAIChat;

use async_trait::async_trait;

use crate::core::error::ServiceResult;

/// Produces a reply to a prompt under a fixed system instruction.
///
/// Every call is independent; no conversation history is kept.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    /// Returns the model's reply with surrounding whitespace removed.
    async fn generate(&self, system_instruction: &str, prompt: &str) -> ServiceResult<String>;
}
