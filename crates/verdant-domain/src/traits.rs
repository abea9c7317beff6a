//! Trait definitions for external interactions
//!
//! The text-generation service is the only external collaborator. Its
//! implementations live in `verdant-llm`.

use async_trait::async_trait;

/// A text-generation service: prompt in, free-text completion out
///
/// Implemented by the infrastructure layer (verdant-llm)
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Error type for generation failures
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generate a completion for the prompt
    async fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Name of the underlying model, for logs and health output
    fn model_name(&self) -> &str;
}
