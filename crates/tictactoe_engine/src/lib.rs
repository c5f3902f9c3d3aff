//! Pure tic-tac-toe logic.
//!
//! The board is an ordered sequence of 9 squares. Moves never overwrite a
//! marked square, and win detection walks the 8 fixed triples in a stable
//! order (rows, columns, diagonals).
//!
//! ```
//! use tictactoe_engine::{Board, Mark, apply_move, evaluate};
//!
//! let mut board = Board::new();
//! for (index, mark) in [(0, Mark::X), (1, Mark::O), (4, Mark::X), (2, Mark::O), (8, Mark::X)] {
//!     board = apply_move(&board, index, mark);
//! }
//! let result = evaluate(&board).unwrap();
//! assert_eq!(result.winner, Mark::X);
//! assert_eq!(result.indices(), [0, 4, 8]);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod position;
mod rules;
mod types;

pub use position::Position;
pub use rules::{
    GameStatus, LINES, MoveError, WinResult, apply_move, evaluate, is_draw, is_full, status,
    try_place,
};
pub use types::{Board, Mark, Square};
