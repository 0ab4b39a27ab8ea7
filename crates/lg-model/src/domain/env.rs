use serde::{Deserialize, Serialize};

use crate::KeyValue;

/// Ordered list of environment variables injected into a launched container.
///
/// Serialized as a plain JSON array of [`KeyValue`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Env(pub Vec<KeyValue>);

impl Env {
    /// Create an environment holding a single variable.
    pub fn single<K, V>(name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(vec![KeyValue::new(name, value)])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyValue> {
        self.0.iter()
    }

    /// Get the value for a name; the last matching entry wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|kv| kv.name() == name)
            .map(|kv| kv.value())
    }
}

#[cfg(test)]
mod tests {
    use super::Env;
    use crate::KeyValue;

    #[test]
    fn single_holds_one_entry() {
        let env = Env::single("EXAME_JSON", "{}");
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("EXAME_JSON"), Some("{}"));
        assert!(env.get("OTHER").is_none());
    }

    #[test]
    fn last_entry_wins() {
        let env = Env(vec![
            KeyValue::new("A", "one"),
            KeyValue::new("B", "x"),
            KeyValue::new("A", "two"),
        ]);

        assert_eq!(env.get("A"), Some("two"));
        assert_eq!(env.get("B"), Some("x"));
        assert!(!env.is_empty());
    }

    #[test]
    fn serializes_as_array() {
        let env = Env::single("EXAME_JSON", "{}");
        let json = serde_json::to_string(&env).unwrap();
        assert_eq!(json, r#"[{"name":"EXAME_JSON","value":"{}"}]"#);
    }
}
