//! Status derivation: the game phase and the line shown above the board.

use super::{check_winner, is_full};
use crate::{Board, GameStatus, Player};
use tracing::instrument;

/// Derives the game phase from a board.
#[instrument(skip(board))]
pub fn game_status(board: &Board) -> GameStatus {
    if let Some(winner) = check_winner(board) {
        GameStatus::Won(winner)
    } else if is_full(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

/// Formats the status line.
///
/// A winner takes precedence over a full board.
#[instrument(skip(board))]
pub fn status_text(winner: Option<Player>, board: &Board, next: Player) -> String {
    match winner {
        Some(winner) => format!("Winner: {}", winner),
        None if is_full(board) => "Scratch: Cat's game".to_string(),
        None => format!("Next player: {}", next),
    }
}
