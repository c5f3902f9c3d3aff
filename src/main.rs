//! Tic Tac Toe - unified CLI
//!
//! Interactive terminal play plus one-shot commands over stored sessions.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use tictactoe_share::{
    AppConfig, ControllerOptions, Osc52Clipboard, Position, SessionController, SessionState,
    SessionStore, SessionToken, build_share_link, run_tui, try_place,
};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(db_path) = cli.db_path {
        config = config.with_db_path(db_path);
    }

    match cli.command {
        Command::Play { game } => run_play(config, game).await,
        command => {
            initialize_stderr_tracing();
            run_command(&config, command)
        }
    }
}

/// Run the interactive UI
async fn run_play(config: AppConfig, game: Option<SessionToken>) -> Result<()> {
    initialize_file_tracing(config.log_file())?;

    let store = SessionStore::from_config(&config);
    let options = ControllerOptions::new(config.share_base()?, config.copied_notice());
    let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel();

    let controller =
        SessionController::open(store, game, options, Box::new(Osc52Clipboard), event_tx);
    if controller.is_degraded() {
        warn!("Session storage unavailable, this game will not be saved");
    }
    let token = controller.token().clone();
    let link = controller.share_link().clone();

    run_tui(controller, event_rx).await?;

    println!("Game {} saved. Resume or share with:\n  {}", token, link);
    Ok(())
}

/// Run a one-shot command against the session store
#[instrument(skip(config))]
fn run_command(config: &AppConfig, command: Command) -> Result<()> {
    let mut store = SessionStore::from_config(config);
    let base = config.share_base()?;

    match command {
        Command::Play { .. } => anyhow::bail!("play runs interactively, not as a one-shot command"),
        Command::New => {
            let token = store.create_session();
            store.save_session(&token, &SessionState::new());
            println!("{}", token);
            println!("{}", build_share_link(&base, &token));
        }
        Command::Show(arg) => {
            let state = load_or_blank(&mut store, &arg.game);
            print_state(&state);
            println!("{}", build_share_link(&base, &arg.game));
        }
        Command::Move { game, cell } => {
            let token = game.game;
            let pos = Position::parse(&cell)
                .with_context(|| format!("'{}' is not a cell (use 1-9 or a label)", cell))?;
            let mut state = load_or_blank(&mut store, &token);

            match try_place(state.board(), pos.to_index(), state.next()) {
                Ok(_) => {
                    let mark = state.next();
                    state.play(pos.to_index());
                    store.save_session(&token, &state);
                    info!(token = %token, position = %pos, mark = %mark, "Move saved");
                    println!("{} played {}", mark, pos);
                }
                Err(e) => println!("Move ignored: {}", e),
            }
            print_state(&state);
        }
        Command::Reset(arg) => {
            let mut state = load_or_blank(&mut store, &arg.game);
            state.reset();
            store.save_session(&arg.game, &state);
            println!("Game {} reset", arg.game);
            print_state(&state);
        }
        Command::Link(arg) => {
            println!("{}", build_share_link(&base, &arg.game));
        }
        Command::Forget(arg) => {
            store.delete_session(&arg.game);
            println!("Game {} forgotten", arg.game);
        }
    }

    if store.is_degraded() {
        warn!("Session storage unavailable, changes were not saved");
    }
    Ok(())
}

fn load_or_blank(store: &mut SessionStore, token: &SessionToken) -> SessionState {
    store.load_session(token).unwrap_or_else(|| {
        info!(token = %token, "No saved game, using a blank board");
        SessionState::new()
    })
}

fn print_state(state: &SessionState) {
    println!("{}\n", state.board().display());
    println!("{}", state.status());
}

/// Logs to stderr for one-shot commands.
fn initialize_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Logs to a file so output does not interfere with the TUI.
fn initialize_file_tracing(path: &str) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file '{}'", path))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    info!("File tracing initialized");
    Ok(())
}
