//! Pure tic-tac-toe logic with time-travel move history.
//!
//! # Architecture
//!
//! - **Rules**: winner, turn and status derived from a board snapshot
//! - **History**: the ordered log of snapshots along the played line
//! - **Engine**: moves, time travel and restart over board + history
//!
//! # Example
//!
//! ```
//! use hooks_tictactoe::{Game, Position};
//!
//! let mut game = Game::new();
//! game.select_square(Position::Center);
//! game.select_square(Position::TopLeft);
//! game.select_history(1).unwrap();
//! assert_eq!(game.status_text(), "Next player: O");
//! assert_eq!(game.history().len(), 3);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod history;
pub mod invariants;
mod position;
pub mod rules;
mod types;

pub use engine::{Game, MoveOutcome, MoveRejection, RestartPolicy};
pub use history::{HistoryEntry, HistoryError, HistoryLog};
pub use position::Position;
pub use types::{Board, GameStatus, Player, Square};
