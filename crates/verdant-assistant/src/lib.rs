//! Verdant Assistant
//!
//! The shopping assistant behind the HTTP endpoints: builds prompts, calls the
//! text generator, and turns free-text recommendations into product records.
//!
//! # Architecture
//!
//! ```text
//! preferences → PromptBuilder → TextGenerator → RecommendationParser → Vec<ProductRecord>
//! message     → PromptBuilder → TextGenerator → reply (verbatim)
//! ```
//!
//! # Example Usage
//!
//! ```
//! use verdant_assistant::{Assistant, AssistantConfig};
//! use verdant_domain::UserPreferences;
//! use verdant_llm::MockProvider;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new("- Product name: Bamboo Toothbrush\n- Price range: $4-$6");
//! let assistant = Assistant::new(llm, AssistantConfig::default())?;
//!
//! let products = assistant.recommend(&UserPreferences::default()).await?;
//! assert_eq!(products[0].name.as_deref(), Some("Bamboo Toothbrush"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod assistant;
mod config;
mod error;
pub mod parser;
mod prompt;


pub use assistant::{Assistant, CHAT_FALLBACK_MESSAGE};
pub use config::{AssistantConfig, DEFAULT_SYSTEM_CONTEXT};
pub use error::AssistantError;
pub use parser::{parse_recommendations, MarkerMatching, RecommendationParser};
pub use prompt::PromptBuilder;
