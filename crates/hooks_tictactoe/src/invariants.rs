//! First-class invariants over a line of play.
//!
//! A line of play is the ordered slice of board snapshots kept by the
//! history log. These checks guard persisted data on restore and run after
//! every engine transition in debug builds.

use crate::{Board, Player, Position, Square};

/// A logical property that must hold for a given state.
pub trait Invariant<S: ?Sized> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S: ?Sized> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    S: ?Sized,
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: the line of play starts from the empty board.
pub struct EmptyRootInvariant;

impl Invariant<[Board]> for EmptyRootInvariant {
    fn holds(boards: &[Board]) -> bool {
        boards.first().is_some_and(Board::is_blank)
    }

    fn description() -> &'static str {
        "History must start with the empty board"
    }
}

/// Invariant: each snapshot adds exactly one mark to its predecessor.
///
/// Squares occupied earlier must be unchanged; exactly one empty square
/// becomes occupied.
pub struct SingleStepInvariant;

impl SingleStepInvariant {
    fn is_single_step(before: &Board, after: &Board) -> bool {
        let mut added = 0;
        for pos in Position::ALL {
            match (before.get(pos), after.get(pos)) {
                (a, b) if a == b => {}
                (Square::Empty, Square::Occupied(_)) => added += 1,
                _ => return false,
            }
        }
        added == 1
    }
}

impl Invariant<[Board]> for SingleStepInvariant {
    fn holds(boards: &[Board]) -> bool {
        boards
            .windows(2)
            .all(|pair| Self::is_single_step(&pair[0], &pair[1]))
    }

    fn description() -> &'static str {
        "Each history entry must add exactly one mark to the previous entry"
    }
}

/// Invariant: X and O alternate, X first.
///
/// On every snapshot X has as many marks as O, or exactly one more.
pub struct AlternatingTurnInvariant;

impl Invariant<[Board]> for AlternatingTurnInvariant {
    fn holds(boards: &[Board]) -> bool {
        boards.iter().all(|board| {
            let x = board.count(Player::X);
            let o = board.count(Player::O);
            x == o || x == o + 1
        })
    }

    fn description() -> &'static str {
        "X and O must alternate with X moving first"
    }
}

/// All history invariants as a composable set.
pub type HistoryInvariants = (
    EmptyRootInvariant,
    SingleStepInvariant,
    AlternatingTurnInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;

    fn line(moves: &[(Position, Player)]) -> Vec<Board> {
        let mut boards = vec![Board::new()];
        for &(pos, player) in moves {
            let next = boards[boards.len() - 1].with_mark(pos, player);
            boards.push(next);
        }
        boards
    }

    #[test]
    fn test_valid_line_holds() {
        let boards = line(&[
            (Position::Center, Player::X),
            (Position::TopLeft, Player::O),
            (Position::BottomRight, Player::X),
        ]);
        assert!(HistoryInvariants::check_all(boards.as_slice()).is_ok());
    }

    #[test]
    fn test_empty_slice_violates_root() {
        let boards: Vec<Board> = Vec::new();
        assert!(!EmptyRootInvariant::holds(boards.as_slice()));
    }

    #[test]
    fn test_skipped_move_detected() {
        let mut boards = line(&[(Position::Center, Player::X)]);
        let jump = boards[1]
            .with_mark(Position::TopLeft, Player::O)
            .with_mark(Position::TopRight, Player::X);
        boards.push(jump);
        assert!(!SingleStepInvariant::holds(boards.as_slice()));
    }

    #[test]
    fn test_overwritten_mark_detected() {
        let boards = vec![
            Board::new(),
            Board::new().with_mark(Position::Center, Player::X),
            Board::new().with_mark(Position::Center, Player::O),
        ];
        assert!(!SingleStepInvariant::holds(boards.as_slice()));
    }

    #[test]
    fn test_o_first_violates_alternation() {
        let boards = line(&[(Position::Center, Player::O)]);
        let violations = HistoryInvariants::check_all(boards.as_slice()).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            AlternatingTurnInvariant::description()
        );
    }
}
