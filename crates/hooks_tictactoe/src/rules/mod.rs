//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board) snapshot. Nothing here is
//! stored; winner, turn and status are recomputed from the board on every
//! access.

pub mod draw;
pub mod status;
pub mod turn;
pub mod win;

pub use draw::{is_draw, is_full};
pub use status::{game_status, status_text};
pub use turn::next_player;
pub use win::check_winner;
