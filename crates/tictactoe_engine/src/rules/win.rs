//! Win detection logic for tic-tac-toe.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{Board, Mark, Position, Square};

/// The 8 winning triples, checked in this order: rows, columns, diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A completed triple and the mark that completed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinResult {
    /// The winning mark.
    pub winner: Mark,
    /// The winning triple.
    pub line: [Position; 3],
}

impl WinResult {
    /// Board indices of the winning triple.
    pub fn indices(&self) -> [usize; 3] {
        self.line.map(Position::to_index)
    }

    /// Returns true if the position is part of the winning triple.
    pub fn contains(&self, pos: Position) -> bool {
        self.line.contains(&pos)
    }
}

/// Returns the first completed triple in [`LINES`] order, if any.
///
/// Alternating play can only ever complete triples of one mark, but boards
/// built by hand may hold several; the fixed order keeps the answer stable.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Option<WinResult> {
    LINES.iter().find_map(|&line| {
        let [a, b, c] = line;
        let sq = board.get(a);
        match sq {
            Square::Occupied(mark) if sq == board.get(b) && sq == board.get(c) => {
                Some(WinResult { winner: mark, line })
            }
            _ => None,
        }
    })
}
