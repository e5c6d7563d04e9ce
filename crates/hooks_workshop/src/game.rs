//! Tic-tac-toe with its board and history mirrored to a store.

use crate::storage::{KeyValueStore, load_or_else, write_through};
use hooks_tictactoe::{
    Board, Game, HistoryEntry, HistoryError, HistoryLog, MoveOutcome, Player, Position,
    RestartPolicy,
};
use tracing::{info, instrument, warn};

/// Storage key for the live board.
pub const SQUARES_KEY: &str = "squares";

/// Storage key for the history log.
pub const HISTORY_KEY: &str = "squaresHistory";

/// A [`Game`] that writes its board and history through after every change.
#[derive(Debug)]
pub struct PersistedGame<S> {
    store: S,
    game: Game,
}

impl<S: KeyValueStore> PersistedGame<S> {
    /// Restores the game from `store`, or starts a fresh one.
    ///
    /// A board or history that is missing, malformed, or inconsistent with
    /// the other falls back to a new game.
    #[instrument(skip(store))]
    pub fn open(store: S, restart_policy: RestartPolicy) -> Self {
        let board: Board = load_or_else(&store, SQUARES_KEY, Board::new);
        let history: HistoryLog = load_or_else(&store, HISTORY_KEY, HistoryLog::new);

        let game = match Game::from_parts(board, history, restart_policy) {
            Ok(game) => {
                info!(moves = game.history().len() - 1, "Restored saved game");
                game
            }
            Err(e) => {
                warn!(error = %e, "Saved game is inconsistent, starting fresh");
                Game::with_policy(restart_policy)
            }
        };

        let mut persisted = Self { store, game };
        persisted.persist();
        persisted
    }

    /// Places the next mark; persists only if the board changed.
    #[instrument(skip(self))]
    pub fn select_square(&mut self, pos: Position) -> MoveOutcome {
        let outcome = self.game.select_square(pos);
        if outcome.is_placed() {
            self.persist();
        }
        outcome
    }

    /// Time-travels to history entry `index` and persists the board.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::OutOfRange`] if no such entry exists.
    #[instrument(skip(self))]
    pub fn select_history(&mut self, index: usize) -> Result<(), HistoryError> {
        self.game.select_history(index)?;
        self.persist();
        Ok(())
    }

    /// Restarts the game and persists the result.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        self.game.restart();
        self.persist();
    }

    /// The underlying game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The live board.
    pub fn board(&self) -> &Board {
        self.game.board()
    }

    /// The history log.
    pub fn history(&self) -> &HistoryLog {
        self.game.history()
    }

    /// Status line for the live board.
    pub fn status_text(&self) -> String {
        self.game.status_text()
    }

    /// Winner, if any.
    pub fn winner(&self) -> Option<Player> {
        self.game.winner()
    }

    /// Navigable move list.
    pub fn history_entries(&self) -> Vec<HistoryEntry> {
        self.game.history_entries()
    }

    /// Consumes the game, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) {
        write_through(&mut self.store, SQUARES_KEY, self.game.board());
        write_through(&mut self.store, HISTORY_KEY, self.game.history());
    }
}
