//! Tests for session persistence.

use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use tictactoe_share::{
    AppConfig, KvStore, Mark, MemoryStore, SessionPhase, SessionState, SessionStore,
    SessionToken, SqliteStore, StoreError,
};

/// Backing store whose every operation fails.
#[derive(Debug)]
struct BrokenStore;

impl KvStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::new("disk on fire"))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::new("disk on fire"))
    }

    fn delete(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::new("disk on fire"))
    }
}

/// Reports the first `taken` keys it is asked about as already stored.
#[derive(Debug)]
struct CrowdedStore {
    taken: usize,
    lookups: Arc<Mutex<Vec<(String, bool)>>>,
}

impl CrowdedStore {
    fn new(taken: usize) -> Self {
        Self {
            taken,
            lookups: Arc::default(),
        }
    }
}

impl KvStore for CrowdedStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut lookups = self.lookups.lock().unwrap();
        let stored = lookups.len() < self.taken;
        lookups.push((key.to_string(), stored));
        Ok(stored.then(|| "{}".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Ok(())
    }

    fn delete(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

fn played(indices: &[usize]) -> SessionState {
    let mut state = SessionState::new();
    for &index in indices {
        assert!(state.play(index));
    }
    state
}

#[test]
fn test_save_then_load_round_trips_board_and_turn() {
    let mut store = SessionStore::new(Box::new(MemoryStore::new()));
    let token = store.create_session();
    let state = played(&[4, 0, 8]);

    store.save_session(&token, &state);
    let loaded = store.load_session(&token).expect("state should be stored");

    assert_eq!(loaded.board(), state.board());
    assert_eq!(loaded.next(), Mark::O);
    assert_eq!(loaded.timestamp(), state.timestamp());
}

#[test]
fn test_unknown_token_loads_nothing_and_opens_blank() {
    let mut store = SessionStore::new(Box::new(MemoryStore::new()));
    let token = SessionToken::parse("neverplayed1").unwrap();
    assert_eq!(store.load_session(&token), None);

    let fresh = SessionState::new();
    assert_eq!(fresh.next(), Mark::X);
    assert_eq!(fresh.phase(), SessionPhase::New);
}

#[test]
fn test_malformed_record_is_treated_as_absent() {
    let backend = MemoryStore::new();
    let token = SessionToken::parse("corrupt1").unwrap();
    backend
        .set(&token.storage_key(), r#"{"board":"oops","isXNext":1}"#)
        .unwrap();

    let mut store = SessionStore::new(Box::new(backend.clone()));
    assert_eq!(store.load_session(&token), None);
    assert!(!store.is_degraded());

    store.save_session(&token, &SessionState::new());
    assert!(store.load_session(&token).is_some());
}

#[test]
fn test_record_uses_namespaced_key() {
    let backend = MemoryStore::new();
    let mut store = SessionStore::new(Box::new(backend.clone()));
    let token = SessionToken::parse("abc123").unwrap();

    store.save_session(&token, &played(&[0]));

    let raw = backend.get("tictactoe_abc123").unwrap().expect("record under key");
    assert!(raw.contains(r#""isXNext":false"#));
}

#[test]
fn test_delete_session() {
    let backend = MemoryStore::new();
    let mut store = SessionStore::new(Box::new(backend.clone()));
    let token = store.create_session();
    store.save_session(&token, &SessionState::new());

    store.delete_session(&token);

    assert_eq!(store.load_session(&token), None);
    assert!(backend.is_empty());
}

#[test]
fn test_created_tokens_are_distinct() {
    let mut store = SessionStore::new(Box::new(MemoryStore::new()));
    let a = store.create_session();
    let b = store.create_session();
    assert_ne!(a, b);
}

#[test]
fn test_failing_backend_degrades_to_memory() {
    let mut store = SessionStore::new(Box::new(BrokenStore));
    let token = SessionToken::parse("offline1").unwrap();
    let state = played(&[2]);

    store.save_session(&token, &state);
    assert!(store.is_degraded());
    assert_eq!(store.load_session(&token), Some(state));
}

#[test]
fn test_sqlite_store_survives_reopen() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("sessions.db").to_string_lossy().to_string();
    let token = SessionToken::parse("durable1").unwrap();
    let state = played(&[0, 4, 8, 2]);

    {
        let mut store = SessionStore::new(Box::new(SqliteStore::open(db_path.clone()).unwrap()));
        store.save_session(&token, &state);
    }

    let mut reopened = SessionStore::new(Box::new(SqliteStore::open(db_path).unwrap()));
    assert_eq!(reopened.load_session(&token), Some(state));
    assert!(!reopened.is_degraded());
}

#[test]
fn test_sqlite_store_overwrites_and_deletes() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("kv.db").to_string_lossy().to_string();
    let store = SqliteStore::open(db_path).unwrap();

    assert_eq!(store.get("k").unwrap(), None);
    store.set("k", "one").unwrap();
    store.set("k", "two").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));

    store.delete("k").unwrap();
    store.delete("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn test_unopenable_database_starts_degraded() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    // SQLite does not create missing parent directories.
    let missing = dir.path().join("no").join("such").join("dir").join("s.db");
    let config = AppConfig::default().with_db_path(missing.to_string_lossy().to_string());

    let mut store = SessionStore::from_config(&config);
    assert!(store.is_degraded());

    let token = store.create_session();
    store.save_session(&token, &SessionState::new());
    assert!(store.load_session(&token).is_some());
}

#[test]
fn test_memory_config_uses_memory_store() {
    let config = AppConfig::default().with_db_path(":memory:".to_string());
    let store = SessionStore::from_config(&config);
    assert!(!store.is_degraded());
}

#[test]
fn test_create_session_checks_the_token_it_returns() {
    let backend = CrowdedStore::new(3);
    let lookups = backend.lookups.clone();
    let mut store = SessionStore::new(Box::new(backend));

    let token = store.create_session();

    let lookups = lookups.lock().unwrap();
    assert_eq!(lookups.len(), 4);
    assert!(lookups[..3].iter().all(|(_, stored)| *stored));
    assert_eq!(lookups[3], (token.storage_key(), false));
    assert!(!store.is_degraded());
}
