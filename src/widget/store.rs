use serde_json::Value;
use std::collections::HashMap;

/// Free-form values shared between a widget and the hooks it runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataStore {
    values: HashMap<String, Value>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Copies every entry of `payload` into the store, overwriting existing keys.
    pub fn extend(&mut self, payload: HashMap<String, Value>) {
        self.values.extend(payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_and_get() {
        let mut store = DataStore::new();
        store.set_data("count", 3);
        assert_eq!(store.get_data("count"), Some(&json!(3)));
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = DataStore::new();
        assert!(store.get_data("nope").is_none());
    }

    #[test]
    fn test_set_data_chains_and_overwrites() {
        let mut store = DataStore::new();
        store.set_data("a", "x").set_data("b", true).set_data("a", "y");
        assert_eq!(store.get_data("a"), Some(&json!("y")));
        assert_eq!(store.get_data("b"), Some(&json!(true)));
    }

    #[test]
    fn test_extend_copies_payload() {
        let mut store = DataStore::new();
        store.set_data("keep", 1);
        let mut payload = HashMap::new();
        payload.insert("marked".to_string(), json!(["2024-02-14"]));
        store.extend(payload);
        assert_eq!(store.get_data("keep"), Some(&json!(1)));
        assert_eq!(store.get_data("marked"), Some(&json!(["2024-02-14"])));
    }
}
