//! In-memory session state and its lifecycle.

use chrono::Utc;
use tictactoe_engine::{Board, GameStatus, Mark, WinResult, apply_move, evaluate, is_draw, status};
use tracing::{debug, instrument};

/// Lifecycle phase of a session, derived from its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SessionPhase {
    /// No move has been made.
    New,
    /// At least one move, not decided yet.
    InProgress,
    /// A triple was completed.
    #[display("Won({})", _0)]
    Won(Mark),
    /// Board filled without a winner.
    Drawn,
}

impl SessionPhase {
    /// Won and Drawn accept no further moves until a reset.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Won(_) | SessionPhase::Drawn)
    }
}

/// Board, turn indicator and last-change timestamp of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    board: Board,
    next: Mark,
    timestamp: i64,
}

impl SessionState {
    /// Blank board, X to move.
    pub fn new() -> Self {
        Self::from_parts(Board::new(), Mark::X, now_millis())
    }

    /// Reassembles a state, e.g. from a persisted record.
    pub fn from_parts(board: Board, next: Mark, timestamp: i64) -> Self {
        Self {
            board,
            next,
            timestamp,
        }
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark that moves next.
    pub fn next(&self) -> Mark {
        self.next
    }

    /// Milliseconds since the Unix epoch of the last change.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Winning triple, if any. Recomputed on every call.
    pub fn evaluate(&self) -> Option<WinResult> {
        evaluate(&self.board)
    }

    /// Status line for the current board.
    pub fn status(&self) -> GameStatus {
        status(&self.board, self.next)
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        if let Some(result) = self.evaluate() {
            SessionPhase::Won(result.winner)
        } else if is_draw(&self.board) {
            SessionPhase::Drawn
        } else if self.board.is_blank() {
            SessionPhase::New
        } else {
            SessionPhase::InProgress
        }
    }

    /// Plays the mark to move at `index`. Returns false, leaving the state
    /// untouched, when the engine refuses the move.
    #[instrument(skip(self), fields(next = %self.next))]
    pub fn play(&mut self, index: usize) -> bool {
        let board = apply_move(&self.board, index, self.next);
        if board == self.board {
            debug!("Move refused");
            return false;
        }
        self.board = board;
        self.next = self.next.opponent();
        self.timestamp = now_millis();
        debug!(phase = %self.phase(), "Move applied");
        true
    }

    /// Clears the board and gives X the move.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.next = Mark::X;
        self.timestamp = now_millis();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_lifecycle() {
        let mut state = SessionState::new();
        assert_eq!(state.phase(), SessionPhase::New);

        assert!(state.play(0));
        assert_eq!(state.phase(), SessionPhase::InProgress);
        assert_eq!(state.next(), Mark::O);

        for index in [3, 1, 4, 2] {
            assert!(state.play(index));
        }
        assert_eq!(state.phase(), SessionPhase::Won(Mark::X));
        assert!(state.phase().is_terminal());

        assert!(!state.play(8));
        assert_eq!(state.board().marked_count(), 5);

        state.reset();
        assert_eq!(state.phase(), SessionPhase::New);
        assert_eq!(state.next(), Mark::X);
    }

    #[test]
    fn test_refused_move_keeps_turn() {
        let mut state = SessionState::new();
        assert!(state.play(4));
        assert!(!state.play(4));
        assert_eq!(state.next(), Mark::O);
    }

    #[test]
    fn test_draw_phase() {
        let mut state = SessionState::new();
        // X O X / X O O / O X X
        for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            assert!(state.play(index));
        }
        assert_eq!(state.phase(), SessionPhase::Drawn);
        assert_eq!(state.status().to_string(), "Draw");
    }
}
