use crate::error::HistoryError;
use crate::types::{MoveRecord, Position};

/// Ordered move log with a replay cursor.
///
/// Appending while the cursor sits before the end discards everything after
/// the cursor; branches are not kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    moves: Vec<MoveRecord>,
    cursor: Option<usize>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` after the cursor and returns its index.
    pub fn append(&mut self, record: MoveRecord) -> usize {
        self.prune();
        self.moves.push(record);
        let index = self.moves.len() - 1;
        self.cursor = Some(index);
        index
    }

    pub fn at(&self, index: usize) -> Result<&MoveRecord, HistoryError> {
        self.moves.get(index).ok_or(HistoryError::IndexOutOfRange {
            index,
            len: self.moves.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn reset(&mut self) {
        self.moves.clear();
        self.cursor = None;
    }

    /// Drops every entry after the cursor.
    pub fn prune(&mut self) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.moves.truncate(keep);
    }

    /// Moves the cursor without touching the log.
    pub fn seek(&mut self, index: usize) -> Result<(), HistoryError> {
        self.at(index)?;
        self.cursor = Some(index);
        Ok(())
    }

    /// Attaches the swap to the opening move.
    ///
    /// Allowed only while the opening move is the sole entry, has not been
    /// swapped yet, and the cursor points at it.
    pub fn mark_swap(&mut self, new_position: Position) -> Result<(), HistoryError> {
        match self.moves.as_mut_slice() {
            [opening] if !opening.swap_used && self.cursor == Some(0) => {
                opening.swap_used = true;
                opening.swap_new_position = Some(new_position);
                Ok(())
            }
            _ => Err(HistoryError::SwapNotMarkable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Player;

    fn record(n: u32) -> MoveRecord {
        let player = if n % 2 == 1 { Player::A } else { Player::B };
        MoveRecord::new(player, Position::new(n as i32, 0), n)
    }

    #[test]
    fn new_history_is_empty_with_no_cursor() {
        let history = MoveHistory::new();

        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
        assert_eq!(
            history.at(0),
            Err(HistoryError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn append_returns_index_and_advances_cursor() {
        let mut history = MoveHistory::new();

        assert_eq!(history.append(record(1)), 0);
        assert_eq!(history.append(record(2)), 1);
        assert_eq!(history.cursor(), Some(1));
        assert_eq!(history.at(1), Ok(&record(2)));
    }

    #[test]
    fn append_after_seek_prunes_later_branch() {
        let mut history = MoveHistory::new();
        for n in 1..=4 {
            history.append(record(n));
        }

        history.seek(1).unwrap();
        assert_eq!(history.len(), 4);

        let replacement = MoveRecord::new(Player::A, Position::new(9, 9), 3);
        assert_eq!(history.append(replacement), 2);
        assert_eq!(history.len(), 3);
        assert_eq!(history.at(2), Ok(&replacement));
    }

    #[test]
    fn seek_out_of_range_keeps_cursor() {
        let mut history = MoveHistory::new();
        history.append(record(1));

        assert!(history.seek(3).is_err());
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn prune_keeps_entries_up_to_cursor() {
        let mut history = MoveHistory::new();
        for n in 1..=3 {
            history.append(record(n));
        }
        history.seek(0).unwrap();

        history.prune();

        assert_eq!(history.moves(), &[record(1)]);
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn reset_empties_log() {
        let mut history = MoveHistory::new();
        history.append(record(1));
        history.reset();

        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
    }

    #[test]
    fn mark_swap_only_on_lone_unswapped_opening() {
        let mut history = MoveHistory::new();
        assert_eq!(
            history.mark_swap(Position::new(1, 1)),
            Err(HistoryError::SwapNotMarkable)
        );

        history.append(record(1));
        history.mark_swap(Position::new(3, 3)).unwrap();
        assert!(history.at(0).unwrap().swap_used);
        assert_eq!(
            history.at(0).unwrap().swap_new_position,
            Some(Position::new(3, 3))
        );

        assert_eq!(
            history.mark_swap(Position::new(3, 3)),
            Err(HistoryError::SwapNotMarkable)
        );

        let mut longer = MoveHistory::new();
        longer.append(record(1));
        longer.append(record(2));
        assert_eq!(
            longer.mark_swap(Position::new(3, 3)),
            Err(HistoryError::SwapNotMarkable)
        );
    }
}
