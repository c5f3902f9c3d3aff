//! Command-line interface for tictactoe_share.

use clap::{Args, Parser, Subcommand};
use tictactoe_share::{SessionToken, token_from_link};

/// Tic Tac Toe - play on one device or share a link
#[derive(Parser, Debug)]
#[command(name = "tictactoe_share")]
#[command(about = "Two-player tic-tac-toe with shareable game links", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional)
    #[arg(short, long, default_value = "tictactoe_share.toml")]
    pub config: std::path::PathBuf,

    /// Override the session database path (":memory:" keeps nothing)
    #[arg(long)]
    pub db_path: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// A session token or a share link carrying one.
#[derive(Args, Debug, Clone)]
pub struct GameArg {
    /// Session token, or a link containing `?game=<token>`
    #[arg(short, long, value_parser = parse_game)]
    pub game: SessionToken,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Play {
        /// Session token or share link; a new session is created if omitted
        #[arg(short, long, value_parser = parse_game)]
        game: Option<SessionToken>,
    },

    /// Create a session and print its token and share link
    New,

    /// Print the board, status and share link of a session
    Show(GameArg),

    /// Place the next mark on a cell (1-9 or a label such as "center")
    Move {
        /// Session to play in
        #[command(flatten)]
        game: GameArg,

        /// Cell to play
        cell: String,
    },

    /// Clear the board, keeping the session token
    Reset(GameArg),

    /// Print the share link of a session
    Link(GameArg),

    /// Delete the stored record of a session
    Forget(GameArg),
}

fn parse_game(s: &str) -> Result<SessionToken, String> {
    token_from_link(s).ok_or_else(|| format!("'{}' is neither a session token nor a share link", s))
}
