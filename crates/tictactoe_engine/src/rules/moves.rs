//! Move application.

use tracing::{debug, instrument};

use super::win::evaluate;
use crate::{Board, Mark, Position, Square};

/// Reason a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// Index is not on the board.
    #[display("Position {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(#[error(not(source))] usize),
    /// The square at the position is already occupied.
    #[display("{} is already occupied", _0)]
    SquareOccupied(#[error(not(source))] Position),
    /// A triple has already been completed.
    #[display("Game is already decided")]
    GameDecided,
}

/// Places `mark` at `index`, reporting why the move is refused.
///
/// # Errors
///
/// Returns [`MoveError`] when the game already has a winner, the index is
/// off the board, or the square is taken.
#[instrument(skip(board))]
pub fn try_place(board: &Board, index: usize, mark: Mark) -> Result<Board, MoveError> {
    if evaluate(board).is_some() {
        return Err(MoveError::GameDecided);
    }

    let pos = Position::from_index(index).ok_or(MoveError::OutOfBounds(index))?;
    if !board.is_empty(pos) {
        return Err(MoveError::SquareOccupied(pos));
    }

    let mut next = board.clone();
    next.set(pos, Square::Occupied(mark));
    Ok(next)
}

/// Places `mark` at `index`; a refused move returns the board unchanged.
#[instrument(skip(board))]
pub fn apply_move(board: &Board, index: usize, mark: Mark) -> Board {
    match try_place(board, index, mark) {
        Ok(next) => next,
        Err(e) => {
            debug!(error = %e, "Move ignored");
            board.clone()
        }
    }
}
