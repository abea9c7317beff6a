//! Verdant LLM Provider Layer
//!
//! Implementations of the `TextGenerator` trait from `verdant-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Gemini `generateContent` API
//!
//! # Examples
//!
//! ```
//! use verdant_llm::MockProvider;
//! use verdant_domain::TextGenerator;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod gemini;

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use verdant_domain::TextGenerator;

pub use gemini::GeminiProvider;

/// Errors that can occur during text generation
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// API key rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid or empty response from the model
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit or quota exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Provider could not be constructed
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl LlmError {
    /// Whether a later attempt might succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, LlmError::Communication(_) | LlmError::RateLimitExceeded)
    }
}

/// Mock text generator for deterministic testing
///
/// Returns pre-configured responses without any network calls. Clones share
/// their call count and recorded prompts.
///
/// # Examples
///
/// ```
/// use verdant_llm::MockProvider;
///
/// let provider = MockProvider::default()
///     .with_response("prompt1", "response1")
///     .with_error("prompt2");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: HashMap<String, String>,
    errors: HashSet<String>,
    fail_all: bool,
    call_count: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: HashMap::new(),
            errors: HashSet::new(),
            fail_all: false,
            call_count: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a provider whose every call fails with a communication error
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Return a specific response for a given prompt
    pub fn with_response(mut self, prompt: impl Into<String>, response: impl Into<String>) -> Self {
        self.responses.insert(prompt.into(), response.into());
        self
    }

    /// Fail with a communication error for a specific prompt
    pub fn with_error(mut self, prompt: impl Into<String>) -> Self {
        self.errors.insert(prompt.into());
        self
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl TextGenerator for MockProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());

        if self.fail_all || self.errors.contains(prompt) {
            return Err(LlmError::Communication("Mock error".to_string()));
        }

        Ok(self
            .responses
            .get(prompt)
            .unwrap_or(&self.default_response)
            .clone())
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
