//! Configuration for the Assistant

use crate::parser::MarkerMatching;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Context prepended to every chat message
pub const DEFAULT_SYSTEM_CONTEXT: &str = "You are an AI assistant for an eco-friendly e-commerce platform \
focused on recycling and sustainable products.
Your goals are to:
1. Help users find sustainable products
2. Provide recycling advice
3. Explain environmental impact of purchases
4. Suggest eco-friendly alternatives";

/// Configuration for the Assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Context prepended to chat messages
    pub system_context: String,

    /// Fewest products to ask the model for
    pub min_products: usize,

    /// Most products to ask the model for
    pub max_products: usize,

    /// Longest accepted chat message (characters)
    pub max_message_length: usize,

    /// Maximum time for a single generation call (seconds)
    pub generation_timeout_secs: u64,

    /// How strictly recommendation markers are matched
    pub marker_matching: MarkerMatching,
}

impl AssistantConfig {
    /// Get the generation timeout as a Duration
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_products == 0 {
            return Err("min_products must be greater than 0".to_string());
        }
        if self.min_products > self.max_products {
            return Err("min_products cannot exceed max_products".to_string());
        }
        if self.max_message_length == 0 {
            return Err("max_message_length must be greater than 0".to_string());
        }
        if self.generation_timeout_secs == 0 {
            return Err("generation_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            system_context: DEFAULT_SYSTEM_CONTEXT.to_string(),
            min_products: 3,
            max_products: 5,
            max_message_length: 4_000,
            generation_timeout_secs: 60,
            marker_matching: MarkerMatching::Exact,
        }
    }
}
