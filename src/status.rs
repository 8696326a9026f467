use std::fmt;

use crate::board::{Board, Mark};

/// Shortest run of marks that wins the game.
pub const WIN_LENGTH: usize = 3;

/// Row and column steps, in the order they are tried from each square:
/// horizontal, vertical, diagonal down-right, diagonal down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Win { player: Mark, line: Vec<usize> },
    Draw,
}

impl GameStatus {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, GameStatus::InProgress)
    }

    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameStatus::Win { player, .. } => Some(*player),
            _ => None,
        }
    }

    /// Indices of the winning squares, empty unless the game was won.
    pub fn line(&self) -> &[usize] {
        match self {
            GameStatus::Win { line, .. } => line,
            _ => &[],
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => f.write_str("In progress"),
            GameStatus::Win { player, .. } => write!(f, "Winner: {}", player),
            GameStatus::Draw => f.write_str("Game Draw!"),
        }
    }
}

/// Decides the status of `board`.
///
/// Squares are scanned in row-major order and every direction is tried from
/// each occupied square; the first run of `WIN_LENGTH` or more is reported, even
/// if a longer or second line exists elsewhere on the board.
pub fn evaluate(board: &Board) -> GameStatus {
    for (index, square) in board.squares().iter().enumerate() {
        let Some(player) = *square else {
            continue;
        };
        for direction in DIRECTIONS {
            let line = run_through(board, index, player, direction);
            if line.len() >= WIN_LENGTH {
                return GameStatus::Win { player, line };
            }
        }
    }

    if board.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

/// Collects the contiguous run of `player` passing through `pivot` along
/// `direction`, in both senses, sorted by index.
fn run_through(board: &Board, pivot: usize, player: Mark, (dr, dc): (isize, isize)) -> Vec<usize> {
    let start = board.position_of(pivot);
    let mut line = vec![pivot];

    for sense in [-1, 1] {
        let mut row = start.row as isize + sense * dr;
        let mut col = start.col as isize + sense * dc;
        while let Some(index) = index_at(board, row, col) {
            if board.get(index) != Some(player) {
                break;
            }
            line.push(index);
            row += sense * dr;
            col += sense * dc;
        }
    }

    line.sort_unstable();
    line
}

fn index_at(board: &Board, row: isize, col: isize) -> Option<usize> {
    let in_bounds = (0..board.rows() as isize).contains(&row)
        && (0..board.columns() as isize).contains(&col);
    in_bounds.then(|| row as usize * board.columns() + col as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Dimensions;

    fn board_with(dimensions: Dimensions, marks: &[(usize, Mark)]) -> Board {
        marks
            .iter()
            .fold(Board::empty(dimensions), |board, (index, mark)| {
                board.with_mark(*index, *mark).unwrap()
            })
    }

    fn square(side: usize) -> Dimensions {
        Dimensions::new(side, side).unwrap()
    }

    #[test]
    fn empty_boards_are_in_progress() {
        for rows in 3..=10 {
            for columns in 3..=10 {
                let board = Board::empty(Dimensions::new(rows, columns).unwrap());
                assert_eq!(evaluate(&board), GameStatus::InProgress);
            }
        }
    }

    #[test]
    fn full_board_without_line_is_a_draw() {
        // X O X
        // X O O
        // O X X
        let marks = [
            (0, Mark::X),
            (1, Mark::O),
            (2, Mark::X),
            (3, Mark::X),
            (4, Mark::O),
            (5, Mark::O),
            (6, Mark::O),
            (7, Mark::X),
            (8, Mark::X),
        ];
        let board = board_with(square(3), &marks);
        assert_eq!(evaluate(&board), GameStatus::Draw);
    }

    #[test]
    fn top_row_wins() {
        let board = board_with(square(3), &[(0, Mark::X), (1, Mark::X), (2, Mark::X)]);
        assert_eq!(
            evaluate(&board),
            GameStatus::Win {
                player: Mark::X,
                line: vec![0, 1, 2]
            }
        );
    }

    #[test]
    fn wide_board_row_wins() {
        let dimensions = Dimensions::new(3, 10).unwrap();
        let board = board_with(dimensions, &[(15, Mark::O), (16, Mark::O), (17, Mark::O)]);
        assert_eq!(
            evaluate(&board),
            GameStatus::Win {
                player: Mark::O,
                line: vec![15, 16, 17]
            }
        );
    }

    #[test]
    fn runs_longer_than_three_report_every_square() {
        let marks: Vec<_> = (0..4).map(|col| (5 + col, Mark::X)).collect();
        let board = board_with(square(5), &marks);
        let status = evaluate(&board);
        assert_eq!(status.winner(), Some(Mark::X));
        assert_eq!(status.line(), &[5, 6, 7, 8]);
    }

    #[test]
    fn vertical_and_both_diagonals_win() {
        let vertical = board_with(square(4), &[(1, Mark::O), (5, Mark::O), (9, Mark::O)]);
        assert_eq!(evaluate(&vertical).line(), &[1, 5, 9]);

        let down_right = board_with(square(4), &[(0, Mark::X), (5, Mark::X), (10, Mark::X)]);
        assert_eq!(evaluate(&down_right).line(), &[0, 5, 10]);

        let down_left = board_with(square(4), &[(3, Mark::X), (6, Mark::X), (9, Mark::X)]);
        assert_eq!(evaluate(&down_left).line(), &[3, 6, 9]);
    }

    #[test]
    fn lines_do_not_wrap_around_row_edges() {
        // indices 2, 3, 4 on a 3x3 board straddle rows 0 and 1
        let board = board_with(square(3), &[(2, Mark::X), (3, Mark::X), (4, Mark::X)]);
        assert_eq!(evaluate(&board), GameStatus::InProgress);
    }

    #[test]
    fn first_line_in_scan_order_is_reported() {
        // X X X
        // O O O
        // . . .
        let marks = [
            (3, Mark::O),
            (4, Mark::O),
            (5, Mark::O),
            (0, Mark::X),
            (1, Mark::X),
            (2, Mark::X),
        ];
        let board = board_with(square(3), &marks);
        assert_eq!(
            evaluate(&board),
            GameStatus::Win {
                player: Mark::X,
                line: vec![0, 1, 2]
            }
        );
    }

    #[test]
    fn horizontal_is_tried_before_vertical_from_the_same_square() {
        // X X X
        // X . .
        // X . .
        let marks = [
            (0, Mark::X),
            (1, Mark::X),
            (2, Mark::X),
            (3, Mark::X),
            (6, Mark::X),
        ];
        let board = board_with(square(3), &marks);
        assert_eq!(evaluate(&board).line(), &[0, 1, 2]);
    }

    #[test]
    fn vertical_is_tried_before_the_diagonals() {
        // X . .
        // X X .
        // X . X
        let marks = [
            (0, Mark::X),
            (3, Mark::X),
            (6, Mark::X),
            (4, Mark::X),
            (8, Mark::X),
        ];
        let board = board_with(square(3), &marks);
        assert_eq!(evaluate(&board).line(), &[0, 3, 6]);
    }

    #[test]
    fn down_right_is_tried_before_down_left() {
        // . . X . .
        // . X . X .
        // X . . . X
        let marks = [
            (2, Mark::O),
            (8, Mark::O),
            (14, Mark::O),
            (6, Mark::O),
            (10, Mark::O),
        ];
        let board = board_with(square(5), &marks);
        assert_eq!(evaluate(&board).line(), &[2, 8, 14]);
    }

    #[test]
    fn status_text() {
        assert_eq!(GameStatus::Draw.to_string(), "Game Draw!");
        let win = GameStatus::Win {
            player: Mark::O,
            line: vec![0, 1, 2],
        };
        assert_eq!(win.to_string(), "Winner: O");
    }
}
