//! Status line derivation.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{draw::is_draw, win::evaluate};
use crate::{Board, Mark};

/// What the status line reports for a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum GameStatus {
    /// A triple has been completed.
    #[display("Winner: {}", _0)]
    Winner(Mark),
    /// Board is full without a winner.
    #[display("Draw")]
    Draw,
    /// Game continues with this mark to move.
    #[display("Current player: {}", _0)]
    Turn(Mark),
}

/// Derives the status for a board given the mark to move next.
#[instrument(skip(board))]
pub fn status(board: &Board, next: Mark) -> GameStatus {
    if let Some(result) = evaluate(board) {
        GameStatus::Winner(result.winner)
    } else if is_draw(board) {
        GameStatus::Draw
    } else {
        GameStatus::Turn(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, Square};

    #[test]
    fn test_status_strings() {
        assert_eq!(status(&Board::new(), Mark::X).to_string(), "Current player: X");
        assert_eq!(GameStatus::Winner(Mark::O).to_string(), "Winner: O");
        assert_eq!(GameStatus::Draw.to_string(), "Draw");
    }

    #[test]
    fn test_winner_reported_regardless_of_turn() {
        let mut board = Board::new();
        for pos in [Position::TopLeft, Position::TopCenter, Position::TopRight] {
            board.set(pos, Square::Occupied(Mark::X));
        }
        assert_eq!(status(&board, Mark::O), GameStatus::Winner(Mark::X));
    }
}
