//! Session persistence over a [`KvStore`].

use tracing::{debug, info, instrument, warn};

use crate::config::AppConfig;
use crate::session::{SessionRecord, SessionState, SessionToken};
use crate::store::{KvStore, MemoryStore, SqliteStore, StoreError};

/// How many fresh tokens to try before accepting a collision.
const CREATE_ATTEMPTS: usize = 4;

/// Loads and saves session records.
///
/// If the backing store fails, the session store switches to an in-memory
/// store for the rest of its life and keeps serving requests.
#[derive(Debug)]
pub struct SessionStore {
    backend: Box<dyn KvStore>,
    degraded: bool,
}

impl SessionStore {
    /// Wraps a backing store.
    #[instrument(skip(backend))]
    pub fn new(backend: Box<dyn KvStore>) -> Self {
        Self {
            backend,
            degraded: false,
        }
    }

    /// Opens the store named by `config`.
    ///
    /// `":memory:"` selects a [`MemoryStore`]. If the SQLite file cannot be
    /// opened the session store starts out degraded rather than failing.
    #[instrument(skip(config), fields(db_path = %config.db_path()))]
    pub fn from_config(config: &AppConfig) -> Self {
        if config.uses_memory_store() {
            info!("Using in-memory session store");
            return Self::new(Box::new(MemoryStore::new()));
        }

        match SqliteStore::open(config.db_path().clone()) {
            Ok(store) => Self::new(Box::new(store)),
            Err(e) => {
                let mut store = Self::new(Box::new(MemoryStore::new()));
                store.degrade(&e);
                store
            }
        }
    }

    /// True once a backing-store failure has forced in-memory operation.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Generates a token with no stored record.
    ///
    /// Each candidate is checked against the store before it is returned.
    #[instrument(skip(self))]
    pub fn create_session(&mut self) -> SessionToken {
        let fresh = (0..CREATE_ATTEMPTS)
            .map(|_| SessionToken::generate())
            .find(|token| {
                let taken = self.exists(token);
                if taken {
                    debug!(token = %token, "Token already stored, regenerating");
                }
                !taken
            });

        let token = fresh.unwrap_or_else(|| {
            let token = SessionToken::generate();
            warn!(
                token = %token,
                attempts = CREATE_ATTEMPTS,
                "Every candidate token was taken"
            );
            token
        });
        info!(token = %token, "Created session");
        token
    }

    /// Reads the state stored for `token`.
    ///
    /// Absent, malformed and incompatible records all yield `None`.
    #[instrument(skip(self), fields(token = %token))]
    pub fn load_session(&mut self, token: &SessionToken) -> Option<SessionState> {
        let key = token.storage_key();
        let raw = match self.backend.get(&key) {
            Ok(raw) => raw?,
            Err(e) => {
                self.degrade(&e);
                return None;
            }
        };

        match SessionRecord::from_json(&raw) {
            Ok(record) => {
                debug!("Session loaded");
                Some(record.into())
            }
            Err(e) => {
                warn!(error = %e, "Ignoring malformed session record");
                None
            }
        }
    }

    /// Overwrites the stored state for `token`.
    #[instrument(skip(self, state), fields(token = %token, next = %state.next()))]
    pub fn save_session(&mut self, token: &SessionToken, state: &SessionState) {
        let json = match SessionRecord::from(state).to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to encode session record");
                return;
            }
        };

        let key = token.storage_key();
        if let Err(e) = self.backend.set(&key, &json) {
            self.degrade(&e);
            if let Err(e) = self.backend.set(&key, &json) {
                warn!(error = %e, "In-memory fallback rejected session record");
            }
            return;
        }
        debug!("Session saved");
    }

    /// Removes the stored record for `token`.
    #[instrument(skip(self), fields(token = %token))]
    pub fn delete_session(&mut self, token: &SessionToken) {
        match self.backend.delete(&token.storage_key()) {
            Ok(()) => info!("Session deleted"),
            Err(e) => self.degrade(&e),
        }
    }

    fn exists(&mut self, token: &SessionToken) -> bool {
        match self.backend.get(&token.storage_key()) {
            Ok(raw) => raw.is_some(),
            Err(e) => {
                self.degrade(&e);
                false
            }
        }
    }

    fn degrade(&mut self, error: &StoreError) {
        warn!(error = %error, "Session store failed, continuing in memory only");
        if !self.degraded {
            self.backend = Box::new(MemoryStore::new());
            self.degraded = true;
        }
    }
}
