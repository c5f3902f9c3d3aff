//! Tests for move application, win and draw rules.

use tictactoe_engine::{
    Board, GameStatus, LINES, Mark, Position, Square, apply_move, evaluate, is_draw, status,
};

/// Every board over {empty, X, O}^9, in base-3 order.
fn all_boards() -> impl Iterator<Item = Board> {
    (0..3usize.pow(9)).map(|mut code| {
        let mut squares = [Square::Empty; 9];
        for square in &mut squares {
            *square = match code % 3 {
                0 => Square::Empty,
                1 => Square::Occupied(Mark::X),
                _ => Square::Occupied(Mark::O),
            };
            code /= 3;
        }
        Board::from_squares(squares)
    })
}

fn uniform_line(board: &Board) -> Option<Mark> {
    LINES.iter().find_map(|line| {
        let marks: Vec<_> = line.iter().map(|pos| board.get(*pos).mark()).collect();
        match marks.as_slice() {
            [Some(a), Some(b), Some(c)] if a == b && b == c => Some(*a),
            _ => None,
        }
    })
}

#[test]
fn test_evaluate_reports_winner_iff_a_triple_is_uniform() {
    for board in all_boards() {
        let expected = uniform_line(&board);
        let actual = evaluate(&board).map(|r| r.winner);
        assert_eq!(actual, expected, "board:\n{}", board.display());
    }
}

#[test]
fn test_apply_move_never_changes_an_occupied_cell() {
    for board in all_boards().step_by(7) {
        for pos in Position::ALL {
            if board.is_empty(pos) {
                continue;
            }
            for mark in [Mark::X, Mark::O] {
                assert_eq!(apply_move(&board, pos.to_index(), mark), board);
            }
        }
    }
}

#[test]
fn test_diagonal_win_scenario() {
    let moves = [(0, Mark::X), (1, Mark::O), (4, Mark::X), (2, Mark::O), (8, Mark::X)];
    let board = moves
        .iter()
        .fold(Board::new(), |board, &(index, mark)| apply_move(&board, index, mark));

    let result = evaluate(&board).expect("X should win");
    assert_eq!(result.winner, Mark::X);
    assert_eq!(result.indices(), [0, 4, 8]);
    assert_eq!(status(&board, Mark::O).to_string(), "Winner: X");
}

#[test]
fn test_alternating_fill_without_triple_is_draw() {
    // X O X / X O O / O X X, played in alternating order.
    let order = [0, 1, 2, 4, 3, 5, 7, 6, 8];
    let mut board = Board::new();
    let mut mark = Mark::X;
    for index in order {
        board = apply_move(&board, index, mark);
        mark = mark.opponent();
    }

    assert!(is_draw(&board));
    assert_eq!(status(&board, mark), GameStatus::Draw);
    assert_eq!(status(&board, mark).to_string(), "Draw");
}

#[test]
fn test_moves_after_win_are_ignored() {
    let mut board = Board::new();
    for (index, mark) in [(0, Mark::X), (3, Mark::O), (1, Mark::X), (4, Mark::O), (2, Mark::X)] {
        board = apply_move(&board, index, mark);
    }
    assert_eq!(apply_move(&board, 5, Mark::O), board);
}
