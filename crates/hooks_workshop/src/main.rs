//! Hooks workshop - unified CLI
//!
//! Runs the persisted greeting, time-travel tic-tac-toe and the fetch panel
//! from a terminal.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, PlayCommand};
use hooks_workshop::{AppConfig, FetchPanel, FileStore, Greeting, HttpFetcher, PersistedGame};
use std::io::BufRead;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,hooks_workshop=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)?;
    if let Some(storage) = cli.storage {
        info!(storage = %storage.display(), "Overriding storage path");
        config = config.with_storage_path(storage);
    }

    match cli.command {
        Command::Play => run_play(&config),
        Command::Greet { name } => run_greet(&config, name),
        Command::Fetch { name } => run_fetch(&config, name).await,
    }
}

/// Play tic-tac-toe against stdin until EOF or `quit`
#[instrument(skip(config))]
fn run_play(config: &AppConfig) -> Result<()> {
    let store = FileStore::open(config.storage_path()).context("Failed to open state file")?;
    let mut game = PersistedGame::open(store, *config.restart_policy());

    print_game(&game);
    for line in std::io::stdin().lock().lines() {
        let line = line.context("Failed to read input")?;
        match PlayCommand::parse(&line) {
            Some(PlayCommand::Quit) => break,
            Some(PlayCommand::Restart) => game.restart(),
            Some(PlayCommand::History(index)) => {
                if let Err(e) = game.select_history(index) {
                    println!("{}", e);
                }
            }
            Some(PlayCommand::Square(pos)) => {
                game.select_square(pos);
            }
            None => {
                warn!(input = %line, "Unrecognized command");
                println!("Commands: 0-8 | history N | restart | quit");
                continue;
            }
        }
        print_game(&game);
    }

    info!("Leaving game");
    Ok(())
}

fn print_game(game: &PersistedGame<FileStore>) {
    println!("{}", game.status_text());
    println!("{}", game.board().display());
    for entry in game.history_entries() {
        println!("  [{}] {}", entry.index(), entry.label());
    }
}

/// Show the greeting, saving `name` first when given
#[instrument(skip(config))]
fn run_greet(config: &AppConfig, name: Option<String>) -> Result<()> {
    let store = FileStore::open(config.storage_path()).context("Failed to open state file")?;
    let mut greeting = Greeting::open(store, config.initial_name());
    if let Some(name) = name {
        greeting.set_name(&name);
    }
    println!("{}", greeting.message());
    Ok(())
}

/// Fetch one record and print the panel
#[instrument(skip(config))]
async fn run_fetch(config: &AppConfig, name: String) -> Result<()> {
    let mut panel = FetchPanel::new(HttpFetcher::new(config.fetch_base_url()));
    let view = panel.submit(&name).await;
    println!("{}", view);
    Ok(())
}
