use crate::FlowError;
use serde_json::Value;

/// Per-session storage backing a [`crate::ProcessContext`]
///
/// Keys are scoped to a domain chosen by `initialize`; `clear` drops every
/// key of the current domain at once.
pub trait FlowStorage: Send {
    /// Bind the storage to a domain
    fn initialize(&mut self, domain: &str);

    /// Currently bound domain
    fn domain(&self) -> Option<&str>;

    /// Check whether a key exists in the current domain
    fn has(&self, key: &str) -> Result<bool, FlowError>;

    /// Read a copy of a value
    fn get(&self, key: &str) -> Result<Option<Value>, FlowError>;

    /// Write a value
    fn set(&mut self, key: &str, value: Value) -> Result<(), FlowError>;

    /// Remove a key, returning its previous value
    fn remove(&mut self, key: &str) -> Result<Option<Value>, FlowError>;

    /// Remove every key of the current domain
    fn clear(&mut self) -> Result<(), FlowError>;
}

/// In-memory storage implementations
pub mod memory {
    use super::*;
    use std::collections::HashMap;

    /// Storage kept in a plain map, useful for tests and single-user tools
    #[derive(Debug, Default)]
    pub struct MemoryFlowStorage {
        domain: Option<String>,
        domains: HashMap<String, HashMap<String, Value>>,
    }

    impl MemoryFlowStorage {
        /// Create an empty storage
        pub fn new() -> Self {
            Self::default()
        }

        fn bound(&self) -> Result<&str, FlowError> {
            self.domain
                .as_deref()
                .ok_or_else(|| FlowError::Storage("storage is not initialized".to_string()))
        }
    }

    impl FlowStorage for MemoryFlowStorage {
        fn initialize(&mut self, domain: &str) {
            self.domain = Some(domain.to_string());
        }

        fn domain(&self) -> Option<&str> {
            self.domain.as_deref()
        }

        fn has(&self, key: &str) -> Result<bool, FlowError> {
            let domain = self.bound()?;
            Ok(self
                .domains
                .get(domain)
                .map(|values| values.contains_key(key))
                .unwrap_or(false))
        }

        fn get(&self, key: &str) -> Result<Option<Value>, FlowError> {
            let domain = self.bound()?;
            Ok(self
                .domains
                .get(domain)
                .and_then(|values| values.get(key))
                .cloned())
        }

        fn set(&mut self, key: &str, value: Value) -> Result<(), FlowError> {
            let domain = self.bound()?.to_string();
            self.domains
                .entry(domain)
                .or_default()
                .insert(key.to_string(), value);
            Ok(())
        }

        fn remove(&mut self, key: &str) -> Result<Option<Value>, FlowError> {
            let domain = self.bound()?.to_string();
            Ok(self
                .domains
                .get_mut(&domain)
                .and_then(|values| values.remove(key)))
        }

        fn clear(&mut self) -> Result<(), FlowError> {
            let domain = self.bound()?.to_string();
            self.domains.remove(&domain);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryFlowStorage;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_requires_initialize() {
        let storage = MemoryFlowStorage::new();
        assert!(matches!(storage.get("history"), Err(FlowError::Storage(_))));
    }

    #[test]
    fn test_domains_are_isolated() {
        let mut storage = MemoryFlowStorage::new();
        storage.initialize("a");
        storage.set("history", json!(["info"])).unwrap();

        storage.initialize("b");
        assert!(!storage.has("history").unwrap());
        storage.set("history", json!(["other"])).unwrap();
        storage.clear().unwrap();
        assert_eq!(storage.get("history").unwrap(), None);

        storage.initialize("a");
        assert_eq!(storage.get("history").unwrap(), Some(json!(["info"])));
        assert_eq!(storage.remove("history").unwrap(), Some(json!(["info"])));
        assert!(!storage.has("history").unwrap());
    }
}
