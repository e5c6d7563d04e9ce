//! Key-value persistence for exercise state.
//!
//! Values are stored as serialized JSON strings under string keys. Writes
//! are fire-and-forget from the caller's point of view: a failed write is
//! logged and the in-memory state stays authoritative.

mod error;
mod file;
mod memory;
mod persisted;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use persisted::{load_or_else, write_through, PersistedValue};

/// A string-keyed store of serialized values.
pub trait KeyValueStore {
    /// Returns the serialized value under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores a serialized value under `key`, replacing any previous one.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}
