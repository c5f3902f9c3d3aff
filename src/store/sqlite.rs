//! SQLite-backed store.

use chrono::{NaiveDateTime, Utc};
use derive_new::new;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::store::{KvStore, StoreError, schema::kv_entries};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Insertable row; `replace_into` makes it an upsert.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = kv_entries)]
struct EntryRow<'a> {
    key: &'a str,
    value: &'a str,
    updated_at: NaiveDateTime,
}

/// Durable key-value store in a local SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens the database at `db_path`, creating it and applying pending
    /// migrations as needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, StoreError> {
        info!(path = %db_path, "Opening SqliteStore");
        let store = Self { db_path };
        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Migrations failed: {}", e)))?;
        debug!(count = applied.len(), "Migrations applied");
        Ok(store)
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }
}

impl KvStore for SqliteStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection()?;
        let value = kv_entries::table
            .find(key)
            .select(kv_entries::value)
            .first::<String>(&mut conn)
            .optional()?;
        debug!(found = value.is_some(), "Entry lookup");
        Ok(value)
    }

    #[instrument(skip(self, value), fields(len = value.len()))]
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        let row = EntryRow::new(key, value, Utc::now().naive_utc());
        diesel::replace_into(kv_entries::table)
            .values(&row)
            .execute(&mut conn)?;
        debug!("Entry written");
        Ok(())
    }

    #[instrument(skip(self))]
    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        let removed = diesel::delete(kv_entries::table.find(key)).execute(&mut conn)?;
        debug!(removed, "Entry deleted");
        Ok(())
    }
}
