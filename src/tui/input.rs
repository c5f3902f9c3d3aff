//! Keyboard handling.

use crossterm::event::KeyCode;
use tictactoe_engine::Position;

/// What a key press asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor to this cell.
    MoveCursor(Position),
    /// Place the current mark on this cell.
    Play(Position),
    /// Start a new game in the same session.
    Reset,
    /// Copy the share link.
    Share,
    /// Leave the UI.
    Quit,
}

/// Maps a key to an action, given where the cursor is.
pub fn action_for_key(key: KeyCode, cursor: Position) -> Option<Action> {
    match key {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            Some(Action::MoveCursor(move_cursor(cursor, key)))
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Play(cursor)),
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .and_then(|d| Position::from_cell_number(d as usize))
            .map(Action::Play),
        KeyCode::Char('n') | KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('s') => Some(Action::Share),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Moves the cursor one cell with the arrow keys, stopping at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let index = cursor.to_index();
    let (row, col) = (index / 3, index % 3);

    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };

    Position::from_index(row * 3 + col).unwrap_or(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_moves_and_clamps() {
        assert_eq!(move_cursor(Position::Center, KeyCode::Up), Position::TopCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Right), Position::MiddleRight);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Up), Position::TopLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Left), Position::TopLeft);
        assert_eq!(move_cursor(Position::BottomRight, KeyCode::Down), Position::BottomRight);
        assert_eq!(move_cursor(Position::BottomRight, KeyCode::Right), Position::BottomRight);
        assert_eq!(move_cursor(Position::MiddleRight, KeyCode::Down), Position::BottomRight);
    }

    #[test]
    fn test_key_mapping() {
        let cursor = Position::Center;
        assert_eq!(action_for_key(KeyCode::Enter, cursor), Some(Action::Play(cursor)));
        assert_eq!(
            action_for_key(KeyCode::Char('1'), cursor),
            Some(Action::Play(Position::TopLeft))
        );
        assert_eq!(
            action_for_key(KeyCode::Char('9'), cursor),
            Some(Action::Play(Position::BottomRight))
        );
        assert_eq!(action_for_key(KeyCode::Char('0'), cursor), None);
        assert_eq!(action_for_key(KeyCode::Char('n'), cursor), Some(Action::Reset));
        assert_eq!(action_for_key(KeyCode::Char('s'), cursor), Some(Action::Share));
        assert_eq!(action_for_key(KeyCode::Esc, cursor), Some(Action::Quit));
        assert_eq!(
            action_for_key(KeyCode::Left, cursor),
            Some(Action::MoveCursor(Position::MiddleLeft))
        );
    }
}
