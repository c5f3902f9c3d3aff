//! Persisted form of a session.

use serde::{Deserialize, Serialize};
use tictactoe_engine::{Board, Mark};

use crate::session::SessionState;

/// JSON record stored under a session's key:
/// `{"board":[9 × null|"X"|"O"],"isXNext":bool,"timestamp":millis}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    board: Board,
    is_x_next: bool,
    timestamp: i64,
}

impl SessionRecord {
    /// Decodes a stored value.
    ///
    /// # Errors
    ///
    /// Returns the JSON error for malformed or incompatible records.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Encodes for storage.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if encoding fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&SessionState> for SessionRecord {
    fn from(state: &SessionState) -> Self {
        Self {
            board: state.board().clone(),
            is_x_next: state.next() == Mark::X,
            timestamp: state.timestamp(),
        }
    }
}

impl From<SessionRecord> for SessionState {
    fn from(record: SessionRecord) -> Self {
        let next = if record.is_x_next { Mark::X } else { Mark::O };
        SessionState::from_parts(record.board, next, record.timestamp)
    }
}
