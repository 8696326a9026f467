use crate::board::{Board, Dimensions, Position};
use crate::Error;

/// A board as it stood after a move, with the square that was played to reach
/// it. The opening entry has no position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub board: Board,
    pub position: Option<Position>,
}

impl Move {
    /// The move-list label for entry `number`.
    pub fn describe(&self, number: usize, is_current: bool) -> String {
        let location = self
            .position
            .map(|position| format!(" {}", position))
            .unwrap_or_default();
        if number == 0 {
            "Go to game start".to_string()
        } else if is_current {
            format!("You are at move #{}{}", number, location)
        } else {
            format!("Go to move #{}{}", number, location)
        }
    }
}

/// Display order of the move list.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

impl Order {
    pub fn toggle(&self) -> Order {
        match self {
            Order::Ascending => Order::Descending,
            Order::Descending => Order::Ascending,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct History {
    entries: Vec<Move>,
    cursor: usize,
}

impl History {
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            entries: vec![Move {
                board: Board::empty(dimensions),
                position: None,
            }],
            cursor: 0,
        }
    }

    pub fn reset(&mut self, dimensions: Dimensions) {
        *self = History::new(dimensions);
    }

    /// Records a move played from the cursor. Anything recorded after the
    /// cursor is discarded first.
    pub fn append(&mut self, board: Board, position: Position) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(Move {
            board,
            position: Some(position),
        });
        self.cursor = self.entries.len() - 1;
    }

    pub fn jump_to(&mut self, move_number: usize) -> Result<(), Error> {
        if move_number >= self.entries.len() {
            return Err(Error::MoveOutOfRange(move_number));
        }
        self.cursor = move_number;
        Ok(())
    }

    pub fn current(&self) -> &Move {
        &self.entries[self.cursor]
    }

    pub fn entries(&self) -> &[Move] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Never zero: the game start is always recorded.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries with their move numbers, in display order.
    pub fn listing(&self, order: Order) -> Vec<(usize, &Move)> {
        let mut listing: Vec<_> = self.entries.iter().enumerate().collect();
        if order == Order::Descending {
            listing.reverse();
        }
        listing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Mark;

    fn played(history: &mut History, index: usize, mark: Mark) {
        let board = history.current().board.with_mark(index, mark).unwrap();
        let position = board.position_of(index);
        history.append(board, position);
    }

    #[test]
    fn starts_with_a_single_empty_move() {
        let history = History::new(Dimensions::default());
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.current().position, None);
        assert!(history.current().board.is_blank());
    }

    #[test]
    fn append_moves_the_cursor_to_the_new_head() {
        let mut history = History::new(Dimensions::default());
        played(&mut history, 4, Mark::X);
        played(&mut history, 0, Mark::O);
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.current().position, Some(Position { row: 0, col: 0 }));
    }

    #[test]
    fn jumping_keeps_the_recorded_future() {
        let mut history = History::new(Dimensions::default());
        played(&mut history, 4, Mark::X);
        played(&mut history, 0, Mark::O);
        history.jump_to(0).unwrap();
        assert_eq!(history.len(), 3);
        history.jump_to(2).unwrap();
        assert_eq!(history.current().board.get(0), Some(Mark::O));
    }

    #[test]
    fn append_after_a_jump_truncates_at_the_cursor() {
        let mut history = History::new(Dimensions::default());
        played(&mut history, 4, Mark::X);
        played(&mut history, 0, Mark::O);
        played(&mut history, 8, Mark::X);
        history.jump_to(1).unwrap();
        played(&mut history, 2, Mark::O);
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.entries()[2].position, Some(Position { row: 0, col: 2 }));
        assert_eq!(history.current().board.get(0), None);
    }

    #[test]
    fn out_of_range_jump_is_rejected() {
        let mut history = History::new(Dimensions::default());
        assert_eq!(history.jump_to(1), Err(Error::MoveOutOfRange(1)));
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn reset_discards_everything() {
        let mut history = History::new(Dimensions::default());
        played(&mut history, 4, Mark::X);
        history.reset(Dimensions::new(4, 5).unwrap());
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.current().board.len(), 20);
    }

    #[test]
    fn describe_matches_the_move_list() {
        let mut history = History::new(Dimensions::default());
        played(&mut history, 5, Mark::X);
        let entries = history.entries();
        assert_eq!(entries[0].describe(0, false), "Go to game start");
        assert_eq!(entries[1].describe(1, false), "Go to move #1 (1, 2)");
        assert_eq!(entries[1].describe(1, true), "You are at move #1 (1, 2)");
    }

    #[test]
    fn listing_follows_order() {
        let mut history = History::new(Dimensions::default());
        played(&mut history, 5, Mark::X);
        played(&mut history, 6, Mark::O);
        let numbers = |order| -> Vec<usize> {
            history.listing(order).into_iter().map(|(n, _)| n).collect()
        };
        assert_eq!(numbers(Order::Ascending), vec![0, 1, 2]);
        assert_eq!(numbers(Order::Descending), vec![2, 1, 0]);
        assert_eq!(Order::Ascending.toggle(), Order::Descending);
    }
}
