use tracing::{debug, instrument};

use crate::board::{Board, Dimensions, Mark};
use crate::command::Command;
use crate::history::History;
use crate::status::{self, GameStatus};
use crate::Error;

/// Owns the board size and move history, and decides whose turn it is.
///
/// Plays and jumps either apply completely or return an [`Error`] and leave
/// the game untouched. `resize` checks each side on its own, so it can apply
/// one side and still report the other as rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameController {
    dimensions: Dimensions,
    history: History,
}

impl GameController {
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            history: History::new(dimensions),
        }
    }

    /// X plays the even-numbered moves, so X always opens.
    pub fn turn(&self) -> Mark {
        if self.history.cursor() % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }

    #[instrument(level = "debug", skip(self), fields(turn = ?self.turn()))]
    pub fn play_at(&mut self, index: usize) -> Result<(), Error> {
        if !self.status().is_in_progress() {
            debug!("game already decided, move ignored");
            return Err(Error::GameOver);
        }

        let board = self.board();
        let next_board = board.with_mark(index, self.turn()).map_err(|err| {
            debug!(%err, "move ignored");
            err
        })?;
        let position = board.position_of(index);
        self.history.append(next_board, position);
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn jump_to(&mut self, move_number: usize) -> Result<(), Error> {
        self.history.jump_to(move_number)
    }

    /// Changes the board size and starts a new game.
    ///
    /// Rows and columns are checked independently: a valid side is applied
    /// even if the other one is rejected. The first rejected side is returned.
    #[instrument(level = "debug", skip(self))]
    pub fn resize(&mut self, rows: Option<usize>, columns: Option<usize>) -> Result<(), Error> {
        let mut rejected = None;
        let mut changed = false;

        if let Some(rows) = rows {
            match Dimensions::check_side(rows) {
                Ok(rows) => {
                    self.dimensions.rows = rows;
                    changed = true;
                }
                Err(err) => rejected = Some(err),
            }
        }
        if let Some(columns) = columns {
            match Dimensions::check_side(columns) {
                Ok(columns) => {
                    self.dimensions.columns = columns;
                    changed = true;
                }
                Err(err) => {
                    rejected.get_or_insert(err);
                }
            }
        }

        if changed {
            self.history.reset(self.dimensions);
        }
        match rejected {
            Some(err) => {
                debug!(%err, "resize rejected");
                Err(err)
            }
            None => Ok(()),
        }
    }

    /// Applies one inbound command. `ToggleOrder` only concerns the move
    /// list display, so it is accepted without touching the game.
    pub fn dispatch(&mut self, command: Command) -> Result<(), Error> {
        match command {
            Command::PlayMove(index) => self.play_at(index),
            Command::Resize { rows, columns } => self.resize(rows, columns),
            Command::JumpTo(move_number) => self.jump_to(move_number),
            Command::ToggleOrder => Ok(()),
        }
    }

    pub fn status(&self) -> GameStatus {
        status::evaluate(self.board())
    }

    pub fn board(&self) -> &Board {
        &self.history.current().board
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}

impl Default for GameController {
    fn default() -> Self {
        GameController::new(Dimensions::default())
    }
}
