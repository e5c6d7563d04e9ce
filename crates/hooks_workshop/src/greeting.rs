//! Greeting form whose name survives restarts.

use crate::storage::{KeyValueStore, PersistedValue};
use tracing::{debug, instrument};

/// Storage key for the greeting name.
pub const NAME_KEY: &str = "name";

/// A one-field form that greets whoever typed their name.
#[derive(Debug)]
pub struct Greeting<S> {
    store: S,
    name: PersistedValue<String>,
}

impl<S: KeyValueStore> Greeting<S> {
    /// Restores the saved name, or starts from `initial_name`.
    #[instrument(skip(store))]
    pub fn open(store: S, initial_name: &str) -> Self {
        let name = PersistedValue::load_or_else(&store, NAME_KEY, || initial_name.to_string());
        Self { store, name }
    }

    /// Replaces the name and writes it through.
    #[instrument(skip(self))]
    pub fn set_name(&mut self, name: &str) {
        debug!("Updating greeting name");
        self.name.set(&mut self.store, name.to_string());
    }

    /// The current name.
    pub fn name(&self) -> &str {
        self.name.get()
    }

    /// Text shown under the form.
    pub fn message(&self) -> String {
        if self.name().is_empty() {
            "Please type your name".to_string()
        } else {
            format!("Hello {}", self.name())
        }
    }

    /// Consumes the form, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }
}
