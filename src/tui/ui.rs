//! Stateless rendering of a [`GameView`], and mapping clicks back onto it.

use std::rc::Rc;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position as Point, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictactoe_engine::{Mark, Position, Square};

use crate::controller::GameView;
use crate::tui::Action;

const CELL_WIDTH: u16 = 9;
const BOARD_WIDTH: u16 = CELL_WIDTH * 3 + 2;
const BOARD_HEIGHT: u16 = 11;

// Span indices within the controls line.
const NEW_GAME_SPAN: usize = 2;
const SHARE_SPAN: usize = 4;

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, view: &GameView, cursor: Position) {
    let chunks = screen_chunks(frame.area(), view);

    draw_header(frame, chunks[0]);
    draw_controls(frame, chunks[1], view);
    draw_board(frame, chunks[2], view, cursor);
    if let Some(banner) = view.banner() {
        draw_banner(frame, chunks[3], banner);
    }
    draw_info(frame, chunks[4], view);
}

/// Maps a left click at (`column`, `row`) to the cell or control under it.
pub fn action_at(area: Rect, view: &GameView, column: u16, row: u16) -> Option<Action> {
    let chunks = screen_chunks(area, view);
    let point = Point::new(column, row);

    if chunks[1].contains(point) {
        return control_at(chunks[1], view, point);
    }

    board_grid(chunks[2])
        .cells
        .iter()
        .position(|cell| cell.contains(point))
        .and_then(Position::from_index)
        .map(Action::Play)
}

fn screen_chunks(area: Rect, view: &GameView) -> Rc<[Rect]> {
    let banner_height = if view.banner().is_some() { 3 } else { 0 };

    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Title
            Constraint::Length(3),             // Status + controls
            Constraint::Min(BOARD_HEIGHT),     // Board
            Constraint::Length(banner_height), // Winner banner
            Constraint::Length(4),             // Info
        ])
        .split(area)
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Tic Tac Toe",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Challenge your friends!",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

fn draw_controls(frame: &mut Frame, area: Rect, view: &GameView) {
    let controls = Paragraph::new(controls_line(view))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(controls, area);
}

fn controls_line(view: &GameView) -> Line<'static> {
    let share_style = if *view.copied() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Magenta)
    };

    Line::from(vec![
        Span::styled(
            view.status().clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("[n] New Game", Style::default().fg(Color::Blue)),
        Span::raw("  "),
        Span::styled(format!("[s] {}", view.share_label()), share_style),
    ])
}

/// Finds the control under `point`, laid out as `draw_controls` centers it.
fn control_at(area: Rect, view: &GameView, point: Point) -> Option<Action> {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    if point.y != inner.y {
        return None;
    }

    let line = controls_line(view);
    let width = line.width() as u16;
    let mut x = inner.x + (inner.width / 2).saturating_sub(width / 2);
    for (index, span) in line.spans.iter().enumerate() {
        let end = x + span.width() as u16;
        if (x..end).contains(&point.x) {
            return match index {
                NEW_GAME_SPAN => Some(Action::Reset),
                SHARE_SPAN => Some(Action::Share),
                _ => None,
            };
        }
        x = end;
    }
    None
}

/// Screen areas of the cells and the lines between them.
struct BoardGrid {
    cells: [Rect; 9],
    rules: [Rect; 2],
    bars: [Rect; 6],
}

fn board_grid(area: Rect) -> BoardGrid {
    let board_area = center_rect(area, BOARD_WIDTH, BOARD_HEIGHT);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    let mut cells = [Rect::default(); 9];
    let mut bars = [Rect::default(); 6];
    for (row, row_area) in [rows[0], rows[2], rows[4]].into_iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(CELL_WIDTH),
                Constraint::Length(1),
                Constraint::Length(CELL_WIDTH),
                Constraint::Length(1),
                Constraint::Length(CELL_WIDTH),
            ])
            .split(row_area);

        for col in 0..3 {
            cells[row * 3 + col] = cols[col * 2];
        }
        bars[row * 2] = cols[1];
        bars[row * 2 + 1] = cols[3];
    }

    BoardGrid {
        cells,
        rules: [rows[1], rows[3]],
        bars,
    }
}

fn draw_board(frame: &mut Frame, area: Rect, view: &GameView, cursor: Position) {
    let grid = board_grid(area);

    for (index, cell) in grid.cells.into_iter().enumerate() {
        draw_cell(frame, cell, view, cursor, index);
    }
    for rule in grid.rules {
        draw_separator(frame, rule);
    }
    for bar in grid.bars {
        draw_separator_vertical(frame, bar);
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, view: &GameView, cursor: Position, index: usize) {
    let (symbol, mut style) = match view.cells()[index] {
        Square::Empty => (
            (index + 1).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(Mark::X) => (
            "X".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Mark::O) => (
            "O".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    if view.is_winning(index) {
        style = style.bg(Color::Green).fg(Color::Black);
    } else if !view.playable()[index] && view.cells()[index] == Square::Empty {
        style = style.add_modifier(Modifier::DIM);
    }
    if cursor.to_index() == index {
        style = style.add_modifier(Modifier::REVERSED);
    }

    // Vertically center within the 3-line cell.
    let text = vec![Line::raw(""), Line::from(Span::styled(symbol, style))];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn draw_banner(frame: &mut Frame, area: Rect, banner: &str) {
    let banner = Paragraph::new(format!("🎉 {} 🎉", banner))
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(banner, area);
}

fn draw_info(frame: &mut Frame, area: Rect, view: &GameView) {
    let info = Paragraph::new(vec![
        Line::from("Play on the same device or share the link to play with a friend remotely!"),
        Line::from(Span::styled(
            view.share_link().clone(),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            "arrows/1-9 move · enter/click play · n new · s share · q quit",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(info, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new(vec![Line::raw("│"); area.height as usize])
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
