//! Move history for time travel.
//!
//! The log holds one board snapshot per move along the displayed line of
//! play. Entry 0 is always the empty board.

use crate::invariants::{HistoryInvariants, InvariantSet, InvariantViolation};
use crate::Board;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Errors raised by history navigation and restoration.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum HistoryError {
    /// The requested entry does not exist.
    #[display("History entry {} out of range (log has {} entries)", index, len)]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of entries in the log.
        len: usize,
    },

    /// Restored snapshots do not form a valid line of play.
    #[display("Invalid history: {} invariant violation(s)", violations.len())]
    Invalid {
        /// Every invariant that failed.
        #[error(not(source))]
        violations: Vec<InvariantViolation>,
    },

    /// The board is not one of the logged snapshots.
    #[display("Board does not match any history entry")]
    BoardNotInHistory,
}

/// One row of the navigable move list.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct HistoryEntry {
    /// Position in the log.
    index: usize,
    /// Button text, e.g. "Go to move #2 (current)".
    label: String,
    /// Whether this entry matches the live board.
    is_current: bool,
}

/// Ordered board snapshots along one line of play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Board>", into = "Vec<Board>")]
pub struct HistoryLog {
    boards: Vec<Board>,
}

impl HistoryLog {
    /// Creates a log holding only the empty board.
    pub fn new() -> Self {
        Self {
            boards: vec![Board::new()],
        }
    }

    /// Number of snapshots, including the initial empty board.
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// True only for a log that lost its root, which validation rejects.
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Snapshot at `index`.
    pub fn get(&self, index: usize) -> Result<&Board, HistoryError> {
        self.boards.get(index).ok_or(HistoryError::OutOfRange {
            index,
            len: self.boards.len(),
        })
    }

    /// All snapshots in move order.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Finds the first snapshot exactly equal to `board`.
    #[instrument(skip_all, fields(len = self.boards.len()))]
    pub fn current_index(&self, board: &Board) -> Option<usize> {
        self.boards.iter().position(|entry| entry == board)
    }

    /// Records `new_board` as the move following entry `current`.
    ///
    /// Entries after `current` belong to an abandoned line of play and are
    /// dropped before the new snapshot is pushed.
    #[instrument(skip(self, new_board), fields(before = self.boards.len()))]
    pub fn append(&mut self, current: usize, new_board: Board) {
        let keep = (current + 1).min(self.boards.len());
        if keep < self.boards.len() {
            debug!(
                dropped = self.boards.len() - keep,
                "Discarding abandoned line of play"
            );
        }
        self.boards.truncate(keep);
        self.boards.push(new_board);
    }

    /// Builds the navigable move list, marking the entry that matches `board`.
    #[instrument(skip_all)]
    pub fn entries(&self, board: &Board) -> Vec<HistoryEntry> {
        let current = self.current_index(board);
        (0..self.boards.len())
            .map(|index| {
                let is_current = current == Some(index);
                let mut label = if index == 0 {
                    "Go to game start".to_string()
                } else {
                    format!("Go to move #{}", index)
                };
                if is_current {
                    label.push_str(" (current)");
                }
                HistoryEntry {
                    index,
                    label,
                    is_current,
                }
            })
            .collect()
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<Board>> for HistoryLog {
    type Error = HistoryError;

    fn try_from(boards: Vec<Board>) -> Result<Self, Self::Error> {
        HistoryInvariants::check_all(boards.as_slice())
            .map_err(|violations| HistoryError::Invalid { violations })?;
        Ok(Self { boards })
    }
}

impl From<HistoryLog> for Vec<Board> {
    fn from(log: HistoryLog) -> Self {
        log.boards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Position};

    fn played(moves: &[Position]) -> HistoryLog {
        let mut log = HistoryLog::new();
        let mut player = Player::X;
        for &pos in moves {
            let last = log.len() - 1;
            let next = log.get(last).unwrap().with_mark(pos, player);
            log.append(last, next);
            player = player.opponent();
        }
        log
    }

    #[test]
    fn test_new_log_has_empty_root() {
        let log = HistoryLog::new();
        assert_eq!(log.len(), 1);
        assert!(log.get(0).unwrap().is_blank());
        assert_eq!(log.current_index(&Board::new()), Some(0));
    }

    #[test]
    fn test_current_index_requires_exact_match() {
        let log = played(&[Position::Center, Position::TopLeft]);
        let prefix = Board::new().with_mark(Position::Center, Player::X);
        assert_eq!(log.current_index(&prefix), Some(1));

        let unseen = prefix.with_mark(Position::BottomRight, Player::O);
        assert_eq!(log.current_index(&unseen), None);
    }

    #[test]
    fn test_append_truncates_future() {
        let mut log = played(&[Position::Center, Position::TopLeft, Position::TopRight]);
        assert_eq!(log.len(), 4);

        let branch = log.get(1).unwrap().with_mark(Position::BottomLeft, Player::O);
        log.append(1, branch);

        assert_eq!(log.len(), 3);
        assert_eq!(log.get(2).unwrap(), &branch);
        assert!(log.get(3).is_err());
    }

    #[test]
    fn test_entries_mark_current() {
        let log = played(&[Position::Center, Position::TopLeft]);
        let entries = log.entries(log.get(1).unwrap());
        let labels: Vec<_> = entries.iter().map(|e| e.label().as_str()).collect();
        assert_eq!(
            labels,
            vec!["Go to game start", "Go to move #1 (current)", "Go to move #2"]
        );
        assert!(*entries[1].is_current());
        assert!(!*entries[0].is_current());
    }

    #[test]
    fn test_out_of_range_reports_length() {
        let log = HistoryLog::new();
        assert_eq!(
            log.get(3),
            Err(HistoryError::OutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_deserialize_rejects_broken_line() {
        let json = r#"[[null,null,null,null,null,null,null,null,null],
                       ["X","O",null,null,null,null,null,null,null]]"#;
        let parsed: Result<HistoryLog, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_serialized_log_reloads() {
        let log = played(&[Position::Center, Position::TopLeft]);
        let json = serde_json::to_string(&log).unwrap();
        let reloaded: HistoryLog = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, log);
    }
}
