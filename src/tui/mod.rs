//! Terminal UI for a shared tic-tac-toe session.

mod input;
mod ui;

pub use input::{Action, action_for_key, move_cursor};
pub use ui::{action_at, draw};

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tictactoe_engine::Position;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{Duration, sleep};
use tracing::{debug, error, info, instrument};

use crate::controller::{SessionController, UiEvent};

/// Runs the interactive UI until the user quits.
///
/// The terminal is restored even when the loop fails.
#[instrument(skip_all, fields(token = %controller.token()))]
pub async fn run_tui(
    mut controller: SessionController,
    mut events: UnboundedReceiver<UiEvent>,
) -> Result<()> {
    info!("Starting tic-tac-toe TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, &mut controller, &mut events).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "UI loop error");
    }
    info!(token = %controller.token(), "TUI closed");
    res
}

/// Redraws whenever the controller reports a change or the cursor moves.
///
/// Keys and left clicks both resolve to an [`Action`].
async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    controller: &mut SessionController,
    events: &mut UnboundedReceiver<UiEvent>,
) -> Result<()> {
    let mut cursor = Position::Center;
    let mut dirty = true;

    loop {
        while let Ok(event) = events.try_recv() {
            dirty |= controller.handle_event(&event);
        }

        if dirty {
            let view = controller.view();
            terminal.draw(|f| draw(f, &view, cursor))?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(100))? {
            let action = match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    action_for_key(key.code, cursor)
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    let size = terminal.size()?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    action_at(area, &controller.view(), mouse.column, mouse.row)
                }
                Event::Resize(..) => {
                    dirty = true;
                    None
                }
                _ => None,
            };

            match action {
                Some(Action::Quit) => {
                    info!("User quit");
                    return Ok(());
                }
                Some(Action::MoveCursor(next)) => {
                    cursor = next;
                    dirty = true;
                }
                Some(Action::Play(pos)) => {
                    cursor = pos;
                    dirty = true;
                    if !controller.click(pos.to_index()) {
                        debug!(position = %pos, "Click ignored");
                    }
                }
                Some(Action::Reset) => controller.reset(),
                Some(Action::Share) => {
                    controller.share().await;
                }
                None => {}
            }
        }

        sleep(Duration::from_millis(10)).await;
    }
}
