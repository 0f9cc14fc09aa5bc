//! Stand-in adapter used when no AI provider is configured.

use async_trait::async_trait;

use crate::domain::ports::{AiAugmentation, AiAugmentationError, AiPrompt};

/// Reply stored on new questions while AI drafting is switched off.
pub const NOT_CONFIGURED_REPLY: &str =
    "AI service not configured. Add an API key to enable AI answers.";

/// Answers every prompt with [`NOT_CONFIGURED_REPLY`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAiAugmentation;

#[async_trait]
impl AiAugmentation for DisabledAiAugmentation {
    async fn generate(&self, _prompt: &AiPrompt) -> Result<String, AiAugmentationError> {
        Ok(NOT_CONFIGURED_REPLY.to_owned())
    }
}
