//! State and effect exercises around a time-travel tic-tac-toe engine.
//!
//! # Architecture
//!
//! - **Storage**: key-value persistence with fail-soft loading
//! - **Game**: tic-tac-toe whose board and history survive restarts
//! - **Greeting**: a persisted one-field form
//! - **Fetch**: a data-fetching panel with an error boundary
//! - **Config**: TOML settings shared by the `hooks` binary
//!
//! # Example
//!
//! ```
//! use hooks_workshop::{MemoryStore, PersistedGame};
//! use hooks_tictactoe::{Position, RestartPolicy};
//!
//! let mut game = PersistedGame::open(MemoryStore::new(), RestartPolicy::default());
//! game.select_square(Position::Center);
//!
//! let reopened = PersistedGame::open(game.into_store(), RestartPolicy::default());
//! assert_eq!(reopened.history().len(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
pub mod fetch;
mod game;
mod greeting;
pub mod storage;

pub use config::{AppConfig, ConfigError};
pub use fetch::{FetchError, FetchPanel, Fetcher, HttpFetcher, PanelView};
pub use game::{HISTORY_KEY, PersistedGame, SQUARES_KEY};
pub use greeting::{Greeting, NAME_KEY};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
