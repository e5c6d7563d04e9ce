//! Turn derivation.

use crate::{Board, Player};
use tracing::instrument;

/// Derives whose turn it is from the marks on the board.
///
/// X moves whenever the counts are equal, O otherwise. Boards built through
/// the engine never differ by more than one mark.
#[instrument(skip(board))]
pub fn next_player(board: &Board) -> Player {
    if board.count(Player::X) == board.count(Player::O) {
        Player::X
    } else {
        Player::O
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_x_moves_first() {
        assert_eq!(next_player(&Board::new()), Player::X);
    }

    #[test]
    fn test_o_moves_after_x() {
        let board = Board::new().with_mark(Position::Center, Player::X);
        assert_eq!(next_player(&board), Player::O);
    }

    #[test]
    fn test_x_moves_when_counts_equal() {
        let board = Board::new()
            .with_mark(Position::Center, Player::X)
            .with_mark(Position::TopLeft, Player::O);
        assert_eq!(next_player(&board), Player::X);
    }
}
