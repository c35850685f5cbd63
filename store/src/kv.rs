//! Key-value storage primitives.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::StoreResult;

/// A durable map with get/set primitives, no transactions.
///
/// Values are whole JSON documents; there is no partial or field-level
/// update, so concurrent writers to the same key replace each other's
/// values wholesale. Callers needing read-modify-write atomicity must
/// serialize above this interface.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> StoreResult<()>;

    /// Check whether `key` holds a value.
    async fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key).await?.is_some())
    }
}

/// In-process reference backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: String) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.entries.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_set_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("accounts").await.unwrap(), None);
        assert!(!store.exists("accounts").await.unwrap());

        store.set("accounts", "[]".to_string()).await.unwrap();
        assert_eq!(store.get("accounts").await.unwrap().as_deref(), Some("[]"));
        assert!(store.exists("accounts").await.unwrap());
    }

    #[tokio::test]
    async fn set_replaces_previous_value() {
        let store = MemoryStore::new();
        store.set("rates", "{}".to_string()).await.unwrap();
        store.set("rates", "{\"ARS\":{}}".to_string()).await.unwrap();
        assert_eq!(
            store.get("rates").await.unwrap().as_deref(),
            Some("{\"ARS\":{}}")
        );
    }
}
