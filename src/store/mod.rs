//! Durable Stores
//!
//! Client-side key-value stores that retain checklist state across sessions.
//! A sled database is the primary store; a size-limited cookie jar file is
//! the secondary store read only as a fallback.

pub mod cookie_jar;
pub mod persistence;
pub mod sled_store;

pub use cookie_jar::CookieJarStore;
pub use persistence::PersistenceAdapter;
pub use sled_store::SledStore;

use crate::error::StorageError;
use parking_lot::Mutex;
use std::collections::HashMap;

/// String key-value store interface.
pub trait DurableStore: Send + Sync {
    /// Name used in log messages.
    fn name(&self) -> &'static str;
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Process-local store. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DurableStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stand-in for a store that failed to open. Reads find nothing and writes
/// fail, so the adapter falls back to the other store.
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl DurableStore for UnavailableStore {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable(self.reason.clone()))
    }
}
