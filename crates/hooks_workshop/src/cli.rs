//! Command-line interface for the `hooks` binary.

use clap::{Parser, Subcommand};
use hooks_tictactoe::Position;
use std::path::PathBuf;

/// State and effect exercises in the terminal
#[derive(Parser, Debug)]
#[command(name = "hooks")]
#[command(about = "Persisted form, time-travel tic-tac-toe and a fetch panel", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = "hooks.toml")]
    pub config: PathBuf,

    /// Override the file persisted state is stored in
    #[arg(long)]
    pub storage: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play tic-tac-toe, reading moves from stdin
    Play,

    /// Show the greeting, optionally saving a new name first
    Greet {
        /// Name to save
        name: Option<String>,
    },

    /// Fetch a record by name and show the panel
    Fetch {
        /// Name to look up
        name: String,
    },
}

/// One line of input during `hooks play`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCommand {
    /// Place a mark.
    Square(Position),
    /// Jump to a history entry.
    History(usize),
    /// Clear the board.
    Restart,
    /// Leave the game.
    Quit,
}

impl PlayCommand {
    /// Parses `0`-`8` or a square label, `history N`, `restart`, or `quit`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        match words.next()?.to_lowercase().as_str() {
            "quit" | "q" | "exit" => Some(Self::Quit),
            "restart" | "r" => Some(Self::Restart),
            "history" | "h" => words.next()?.parse().ok().map(Self::History),
            _ => Position::from_label_or_number(line).map(Self::Square),
        }
    }
}
