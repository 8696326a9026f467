use std::fmt;

use crate::Error;

/// Smallest number of rows or columns a board may have.
pub const MIN_SIDE: usize = 3;
/// Largest number of rows or columns a board may have.
pub const MAX_SIDE: usize = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn swap(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn from_index(index: usize, columns: usize) -> Position {
        Position {
            row: index / columns,
            col: index % columns,
        }
    }

    pub fn index(&self, columns: usize) -> usize {
        self.row * columns + self.col
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: usize,
    pub columns: usize,
}

impl Dimensions {
    pub fn new(rows: usize, columns: usize) -> Result<Dimensions, Error> {
        Ok(Dimensions {
            rows: Self::check_side(rows)?,
            columns: Self::check_side(columns)?,
        })
    }

    /// Validates a single side length against `MIN_SIDE..=MAX_SIDE`.
    pub fn check_side(side: usize) -> Result<usize, Error> {
        if (MIN_SIDE..=MAX_SIDE).contains(&side) {
            Ok(side)
        } else {
            Err(Error::InvalidDimension(side))
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Dimensions {
            rows: MIN_SIDE,
            columns: MIN_SIDE,
        }
    }
}

/// A row-major grid of squares. Boards are never changed in place, `with_mark`
/// produces the next one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    dimensions: Dimensions,
    squares: Vec<Option<Mark>>,
}

impl Board {
    pub fn empty(dimensions: Dimensions) -> Self {
        let squares = vec![None; dimensions.cell_count()];
        Self {
            dimensions,
            squares,
        }
    }

    pub fn with_mark(&self, index: usize, mark: Mark) -> Result<Board, Error> {
        if !self.is_valid_move(index)? {
            return Err(Error::CellOccupied(index));
        }
        let mut new_board = self.clone();
        new_board.squares[index] = Some(mark);
        Ok(new_board)
    }

    pub fn is_valid_move(&self, index: usize) -> Result<bool, Error> {
        self.squares
            .get(index)
            .map(Option::is_none)
            .ok_or(Error::IndexOutOfBounds(index))
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.squares.get(index).copied().flatten()
    }

    pub fn squares(&self) -> &[Option<Mark>] {
        &self.squares
    }

    /// Never zero: a board has at least `MIN_SIDE * MIN_SIDE` squares.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_blank(&self) -> bool {
        self.squares.iter().all(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.squares.iter().all(Option::is_some)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn rows(&self) -> usize {
        self.dimensions.rows
    }

    pub fn columns(&self) -> usize {
        self.dimensions.columns
    }

    pub fn position_of(&self, index: usize) -> Position {
        Position::from_index(index, self.dimensions.columns)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = vec!["---"; self.columns()].join("+");
        for (row, squares) in self.squares.chunks(self.columns()).enumerate() {
            if row > 0 {
                writeln!(f, "{}", separator)?;
            }
            let line: Vec<String> = squares
                .iter()
                .map(|square| match square {
                    Some(mark) => format!(" {} ", mark),
                    None => "   ".to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}
