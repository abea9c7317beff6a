//! Core Assistant implementation

use crate::config::AssistantConfig;
use crate::error::AssistantError;
use crate::parser::RecommendationParser;
use crate::prompt::PromptBuilder;
use tokio::time::timeout;
use tracing::{debug, info};
use verdant_domain::{RecommendationList, TextGenerator, UserPreferences};

/// Reply sent to the shopper when the chat call fails
pub const CHAT_FALLBACK_MESSAGE: &str =
    "I'm having trouble processing your message. Could you please try again?";

/// The shopping assistant: one text generator plus its configuration
///
/// Built once at startup and shared by reference between requests. Holds no
/// per-request state.
pub struct Assistant<G>
where
    G: TextGenerator,
{
    generator: G,
    config: AssistantConfig,
    parser: RecommendationParser,
}

impl<G> Assistant<G>
where
    G: TextGenerator,
{
    /// Create a new Assistant, validating the configuration
    pub fn new(generator: G, config: AssistantConfig) -> Result<Self, AssistantError> {
        config.validate().map_err(AssistantError::Config)?;
        let parser = RecommendationParser::new(config.marker_matching);

        Ok(Self {
            generator,
            config,
            parser,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Name of the model behind the generator
    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }

    /// Answer a chat message with the model's completion, verbatim
    pub async fn chat(&self, message: &str) -> Result<String, AssistantError> {
        let length = message.chars().count();
        if length > self.config.max_message_length {
            return Err(AssistantError::InvalidRequest(format!(
                "Message too long: {} chars (max: {})",
                length, self.config.max_message_length
            )));
        }

        let prompt = PromptBuilder::chat(&self.config.system_context, message);
        let reply = self.generate(&prompt).await?;

        info!("Chat reply generated ({} chars)", reply.len());
        Ok(reply)
    }

    /// Recommend products for the given preferences
    ///
    /// A completion that contains no recognizable product is not an error;
    /// it yields an empty list.
    pub async fn recommend(
        &self,
        preferences: &UserPreferences,
    ) -> Result<RecommendationList, AssistantError> {
        let prompt = PromptBuilder::recommendation(
            preferences,
            self.config.min_products,
            self.config.max_products,
        );
        let completion = self.generate(&prompt).await?;
        let products = self.parser.parse(&completion);

        info!(
            "Recommended {} products for {} preferences",
            products.len(),
            preferences.len()
        );
        Ok(products)
    }

    /// Call the generator with the configured timeout
    async fn generate(&self, prompt: &str) -> Result<String, AssistantError> {
        debug!("Prompt length: {} chars", prompt.len());

        let completion = timeout(self.config.generation_timeout(), self.generator.generate(prompt))
            .await
            .map_err(|_| AssistantError::Timeout(self.config.generation_timeout_secs))?
            .map_err(|e| AssistantError::Service(e.to_string()))?;

        debug!("Completion length: {} chars", completion.len());
        Ok(completion)
    }
}
