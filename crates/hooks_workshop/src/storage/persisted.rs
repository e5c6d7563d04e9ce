//! Persisted values: load with a default, write through on change.

use super::KeyValueStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

/// Loads the value under `key`, falling back to `default()`.
///
/// Missing keys, storage failures and values that fail to parse all yield
/// the default. Malformed data is logged, never surfaced.
#[instrument(skip(store, default))]
pub fn load_or_else<S, T>(store: &S, key: &str, default: impl FnOnce() -> T) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No persisted value, using default");
            return default();
        }
        Err(e) => {
            warn!(error = %e, "Failed to read persisted value, using default");
            return default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => {
            debug!("Restored persisted value");
            value
        }
        Err(e) => {
            warn!(error = %e, "Persisted value is malformed, using default");
            default()
        }
    }
}

/// Serializes `value` and stores it under `key`.
///
/// Fire-and-forget: failures are logged and otherwise ignored.
#[instrument(skip(store, value))]
pub fn write_through<S, T>(store: &mut S, key: &str, value: &T)
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let serialized = match serde_json::to_string(value) {
        Ok(serialized) => serialized,
        Err(e) => {
            warn!(error = %e, "Failed to serialize value, not persisted");
            return;
        }
    };
    if let Err(e) = store.set(key, serialized) {
        warn!(error = %e, "Failed to persist value");
    }
}

/// A value mirrored to a store under a fixed key.
#[derive(Debug, Clone)]
pub struct PersistedValue<T> {
    key: String,
    value: T,
}

impl<T> PersistedValue<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Restores the value under `key`, or builds it from `default`.
    pub fn load_or_else<S>(store: &S, key: impl Into<String>, default: impl FnOnce() -> T) -> Self
    where
        S: KeyValueStore + ?Sized,
    {
        let key = key.into();
        let value = load_or_else(store, &key, default);
        Self { key, value }
    }

    /// The current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// The storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replaces the value, then writes it through.
    pub fn set<S>(&mut self, store: &mut S, value: T)
    where
        S: KeyValueStore + ?Sized,
    {
        self.value = value;
        write_through(store, &self.key, &self.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_missing_key_uses_default() {
        let store = MemoryStore::new();
        let value: Vec<u8> = load_or_else(&store, "absent", || vec![1, 2]);
        assert_eq!(value, vec![1, 2]);
    }

    #[test]
    fn test_malformed_value_uses_default() {
        let mut store = MemoryStore::new();
        store.set("count", "{oops".to_string()).unwrap();
        let value: u32 = load_or_else(&store, "count", || 7);
        assert_eq!(value, 7);
    }

    #[test]
    fn test_set_writes_through() {
        let mut store = MemoryStore::new();
        let mut name = PersistedValue::load_or_else(&store, "name", String::new);
        name.set(&mut store, "Grace".to_string());

        assert_eq!(store.get("name").unwrap().as_deref(), Some("\"Grace\""));
        let reloaded = PersistedValue::load_or_else(&store, "name", String::new);
        assert_eq!(reloaded.get(), "Grace");
    }
}
