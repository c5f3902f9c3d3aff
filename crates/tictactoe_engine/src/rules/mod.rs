//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Nothing here mutates
//! state in place; every operation returns a new value.

mod draw;
mod moves;
mod status;
mod win;

pub use draw::{is_draw, is_full};
pub use moves::{MoveError, apply_move, try_place};
pub use status::{GameStatus, status};
pub use win::{LINES, WinResult, evaluate};
