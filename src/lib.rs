//! Two-player tic-tac-toe with locally persisted sessions and share links.
//!
//! # Architecture
//!
//! - **Engine** (`tictactoe_engine`): board, moves, win and draw rules
//! - **Store**: string key-value persistence (SQLite file or memory)
//! - **Session**: tokens, persisted records, share links
//! - **Controller**: the live session behind a UI, including the
//!   self-expiring "link copied" confirmation
//! - **TUI**: ratatui front-end driven by the controller
//!
//! # Example
//!
//! ```
//! use tictactoe_share::{MemoryStore, SessionState, SessionStore};
//!
//! let mut store = SessionStore::new(Box::new(MemoryStore::new()));
//! let token = store.create_session();
//!
//! let mut state = SessionState::new();
//! state.play(4);
//! store.save_session(&token, &state);
//!
//! assert_eq!(store.load_session(&token), Some(state));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod clipboard;
mod config;
mod controller;
mod session;
mod store;
mod tui;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, MEMORY_DB};

// Crate-level exports - Clipboard
pub use clipboard::{Clipboard, ClipboardError, Osc52Clipboard};

// Crate-level exports - Controller
pub use controller::{ControllerOptions, GameView, SessionController, UiEvent};

// Crate-level exports - Sessions
pub use session::{
    GAME_PARAM, SessionPhase, SessionRecord, SessionState, SessionStore, SessionToken, TokenError,
    build_share_link, token_from_link,
};

// Crate-level exports - Storage
pub use store::{KvStore, MemoryStore, SqliteStore, StoreError};

// Crate-level exports - Terminal UI
pub use tui::{Action, action_at, action_for_key, draw, move_cursor, run_tui};

// Crate-level exports - Game types
pub use tictactoe_engine::{
    Board, GameStatus, Mark, MoveError, Position, Square, WinResult, apply_move, evaluate,
    is_draw, status, try_place,
};
