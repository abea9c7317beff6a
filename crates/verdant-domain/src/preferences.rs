//! Preferences module - free-form shopper preferences

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arbitrary key/value preferences sent with a recommendation request
///
/// The only structural requirement is that the payload is a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserPreferences(Map<String, Value>);

impl UserPreferences {
    /// Wrap an existing JSON map
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Accept a JSON value, rejecting anything that is not an object
    pub fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Err("Preferences must be a JSON object, got null".to_string()),
            Value::Array(_) => Err("Preferences must be a JSON object, got an array".to_string()),
            other => Err(format!("Preferences must be a JSON object, got {}", other)),
        }
    }

    /// Number of preference entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no preferences were given
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Compact JSON rendering used inside prompts
    pub fn to_prompt_string(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}
