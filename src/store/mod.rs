//! Key-value persistence behind a small trait.
//!
//! Sessions are stored as strings under namespaced keys. The trait keeps
//! the session layer ignorant of where the bytes live: tests and degraded
//! sessions use [`MemoryStore`], normal runs use [`SqliteStore`].

mod error;
mod memory;
mod schema; // Diesel generated schema - internal use only
mod sqlite;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// String-keyed storage.
pub trait KvStore: std::fmt::Debug + Send + Sync {
    /// Reads the value for `key`, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing store cannot be written.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}
