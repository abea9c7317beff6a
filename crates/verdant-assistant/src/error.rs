//! Error types for the Assistant

use thiserror::Error;

/// Errors that can occur while serving a chat or recommendation request
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Text-generation service failed (network, auth, quota)
    #[error("Text generation failed: {0}")]
    Service(String),

    /// Text-generation service did not answer in time
    #[error("Text generation timed out after {0}s")]
    Timeout(u64),

    /// The request itself is unacceptable
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AssistantError {
    /// True when the text-generation service is at fault rather than the caller
    pub fn is_service_failure(&self) -> bool {
        matches!(self, AssistantError::Service(_) | AssistantError::Timeout(_))
    }
}
