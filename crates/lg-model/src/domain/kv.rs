use serde::{Deserialize, Serialize};

/// Named string variable, shaped like an ECS container environment entry.
///
/// Serializes as `{"name": "...", "value": "..."}`. No validation is applied to either side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    /// Variable name.
    name: String,
    /// Variable value.
    value: String,
}

impl KeyValue {
    /// Create a new name–value pair.
    pub fn new<K, V>(name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Get the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl From<(String, String)> for KeyValue {
    fn from((name, value): (String, String)) -> Self {
        Self { name, value }
    }
}

impl From<(&str, &str)> for KeyValue {
    fn from((name, value): (&str, &str)) -> Self {
        Self::new(name, value)
    }
}
