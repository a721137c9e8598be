// Shutdown-style options
//
// Opaque JSON object forwarded as the body of boot/logout/reboot/shutdown.
// Nothing in this crate interprets the keys; the server owns their meaning.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShutdownOptions(Map<String, Value>);

impl ShutdownOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a single option
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Parse options from a JSON object literal, e.g. `{"delay": 30}`
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Request body form of the options
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_object() {
        let options = ShutdownOptions::from_json(r#"{"delay": 30, "force": true}"#).unwrap();
        assert_eq!(options.get("delay"), Some(&json!(30)));
        assert_eq!(options.to_value(), json!({"delay": 30, "force": true}));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(ShutdownOptions::from_json("[1, 2]").is_err());
        assert!(ShutdownOptions::from_json("30").is_err());
    }

    #[test]
    fn test_builder() {
        let options = ShutdownOptions::new().with("delay", 10).with("message", "bye");
        assert!(!options.is_empty());
        assert_eq!(options.to_value(), json!({"delay": 10, "message": "bye"}));
    }
}
