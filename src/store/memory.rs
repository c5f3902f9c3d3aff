//! In-memory store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, instrument};

use crate::store::{KvStore, StoreError};

/// Shared in-memory map. Clones see the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Returns true when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::new("Memory store lock poisoned"))
    }
}

impl KvStore for MemoryStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self.lock()?.get(key).cloned();
        debug!(found = value.is_some(), "Memory get");
        Ok(value)
    }

    #[instrument(skip(self, value), fields(len = value.len()))]
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        debug!("Memory set");
        Ok(())
    }

    #[instrument(skip(self))]
    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let removed = self.lock()?.remove(key).is_some();
        debug!(removed, "Memory delete");
        Ok(())
    }
}
