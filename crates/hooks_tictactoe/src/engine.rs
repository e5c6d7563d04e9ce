//! Game engine: moves, time travel and restart over a board and its history.
//!
//! Only the board and the history log are stored. Winner, next player,
//! status and the current history index are derived on every access.

use crate::history::{HistoryEntry, HistoryError, HistoryLog};
use crate::rules;
use crate::{Board, GameStatus, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// What `restart` does with the history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestartPolicy {
    /// Collapse the log to the single empty-board entry.
    #[default]
    ResetHistory,
    /// Leave the log untouched; the next move truncates it.
    KeepHistory,
}

/// Why a square selection was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveRejection {
    /// The game already has a winner.
    #[display("Game is already over")]
    GameOver,
    /// The square is taken.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),
    /// The live board is missing from the history log.
    #[display("Board is out of sync with history")]
    Desynchronized,
}

/// Result of selecting a square.
///
/// Ignored selections are a normal part of play, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The mark was placed and recorded.
    Placed {
        /// Who moved.
        player: Player,
        /// Where.
        position: Position,
    },
    /// Nothing changed.
    Ignored(MoveRejection),
}

impl MoveOutcome {
    /// True if the board changed.
    pub fn is_placed(&self) -> bool {
        matches!(self, MoveOutcome::Placed { .. })
    }
}

/// Tic-tac-toe game with time-travel history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    history: HistoryLog,
    restart_policy: RestartPolicy,
}

impl Game {
    /// Creates a new game with the default restart policy.
    #[instrument]
    pub fn new() -> Self {
        Self::with_policy(RestartPolicy::default())
    }

    /// Creates a new game with the given restart policy.
    #[instrument]
    pub fn with_policy(restart_policy: RestartPolicy) -> Self {
        Self {
            board: Board::new(),
            history: HistoryLog::new(),
            restart_policy,
        }
    }

    /// Rebuilds a game from a board and a history log.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::BoardNotInHistory`] if the board is not one
    /// of the logged snapshots.
    #[instrument(skip(board, history), fields(history_len = history.len()))]
    pub fn from_parts(
        board: Board,
        history: HistoryLog,
        restart_policy: RestartPolicy,
    ) -> Result<Self, HistoryError> {
        if history.current_index(&board).is_none() {
            warn!("Restored board is not part of restored history");
            return Err(HistoryError::BoardNotInHistory);
        }
        Ok(Self {
            board,
            history,
            restart_policy,
        })
    }

    /// Places the next player's mark at `pos`.
    ///
    /// Ignored once the game is won or when the square is occupied. A move
    /// made while viewing a past snapshot discards every later snapshot.
    #[instrument(skip(self), fields(next = %self.next_player()))]
    pub fn select_square(&mut self, pos: Position) -> MoveOutcome {
        if self.winner().is_some() {
            debug!("Ignoring move after win");
            return MoveOutcome::Ignored(MoveRejection::GameOver);
        }
        if !self.board.is_empty(pos) {
            debug!("Ignoring move on occupied square");
            return MoveOutcome::Ignored(MoveRejection::SquareOccupied(pos));
        }
        let Some(current) = self.current_index() else {
            warn!("Live board missing from history, ignoring move");
            return MoveOutcome::Ignored(MoveRejection::Desynchronized);
        };

        let player = self.next_player();
        let new_board = self.board.with_mark(pos, player);
        self.history.append(current, new_board);
        self.board = new_board;
        self.debug_check_invariants();

        info!(%player, position = %pos, moves = self.history.len() - 1, "Move placed");
        MoveOutcome::Placed {
            player,
            position: pos,
        }
    }

    /// Jumps the board to history entry `index` without touching the log.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::OutOfRange`] if no such entry exists.
    #[instrument(skip(self))]
    pub fn select_history(&mut self, index: usize) -> Result<(), HistoryError> {
        self.board = *self.history.get(index)?;
        debug!(index, "Travelled to history entry");
        Ok(())
    }

    /// Clears the board. The history follows the configured policy.
    #[instrument(skip(self), fields(policy = ?self.restart_policy))]
    pub fn restart(&mut self) {
        self.board = Board::new();
        if self.restart_policy == RestartPolicy::ResetHistory {
            self.history = HistoryLog::new();
        }
        self.debug_check_invariants();
        info!("Game restarted");
    }

    /// The live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The history log.
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// The restart policy in effect.
    pub fn restart_policy(&self) -> RestartPolicy {
        self.restart_policy
    }

    /// Winner of the live board, if any.
    pub fn winner(&self) -> Option<Player> {
        rules::check_winner(&self.board)
    }

    /// Whose turn it is on the live board.
    pub fn next_player(&self) -> Player {
        rules::next_player(&self.board)
    }

    /// Phase of the live board.
    pub fn status(&self) -> GameStatus {
        rules::game_status(&self.board)
    }

    /// Status line for the live board.
    pub fn status_text(&self) -> String {
        rules::status_text(self.winner(), &self.board, self.next_player())
    }

    /// History entry matching the live board.
    pub fn current_index(&self) -> Option<usize> {
        self.history.current_index(&self.board)
    }

    /// Navigable move list with the current entry marked.
    pub fn history_entries(&self) -> Vec<HistoryEntry> {
        self.history.entries(&self.board)
    }

    /// Empty squares on the live board.
    pub fn valid_moves(&self) -> Vec<Position> {
        Position::valid_moves(&self.board)
    }

    #[cfg(debug_assertions)]
    fn debug_check_invariants(&self) {
        use crate::invariants::{HistoryInvariants, InvariantSet};
        if let Err(violations) = HistoryInvariants::check_all(self.history.boards()) {
            panic!("History invariants violated: {:?}", violations);
        }
        debug_assert!(
            self.current_index().is_some(),
            "Live board must appear in history"
        );
    }

    #[cfg(not(debug_assertions))]
    fn debug_check_invariants(&self) {}
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game: &mut Game, moves: &[usize]) {
        for &index in moves {
            let pos = Position::from_index(index).unwrap();
            assert!(game.select_square(pos).is_placed(), "move {} rejected", index);
        }
    }

    #[test]
    fn test_first_move_is_x() {
        let mut game = Game::new();
        let outcome = game.select_square(Position::TopLeft);
        assert_eq!(
            outcome,
            MoveOutcome::Placed {
                player: Player::X,
                position: Position::TopLeft
            }
        );
        assert_eq!(game.status_text(), "Next player: O");
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_occupied_square_ignored() {
        let mut game = Game::new();
        play(&mut game, &[4]);
        let before = game.clone();
        assert_eq!(
            game.select_square(Position::Center),
            MoveOutcome::Ignored(MoveRejection::SquareOccupied(Position::Center))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_restart_keep_history_truncates_on_next_move() {
        let mut game = Game::with_policy(RestartPolicy::KeepHistory);
        play(&mut game, &[0, 1, 2]);
        game.restart();
        assert!(game.board().is_blank());
        assert_eq!(game.history().len(), 4);
        assert_eq!(game.current_index(), Some(0));

        play(&mut game, &[8]);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_restart_reset_history() {
        let mut game = Game::new();
        play(&mut game, &[0, 1, 2]);
        game.restart();
        assert_eq!(game.history(), &HistoryLog::new());
        assert_eq!(game.status_text(), "Next player: X");
    }

    #[test]
    fn test_from_parts_requires_board_in_history() {
        let board = Board::new().with_mark(Position::Center, Player::X);
        let result = Game::from_parts(board, HistoryLog::new(), RestartPolicy::default());
        assert_eq!(result, Err(HistoryError::BoardNotInHistory));
    }
}
