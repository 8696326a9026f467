use std::str::FromStr;

use crate::Error;

/// Everything a front end can ask of the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    PlayMove(usize),
    Resize {
        rows: Option<usize>,
        columns: Option<usize>,
    },
    JumpTo(usize),
    ToggleOrder,
}

impl Command {
    /// True for commands that only change how the game is shown.
    pub fn is_display_only(&self) -> bool {
        matches!(self, Command::ToggleOrder)
    }
}

/// Parses one line of text input:
///
/// ```text
/// <index> | play <index> | jump <n> | start | rows <n> | columns <n> | cols <n>
/// resize <rows> <columns> | order
/// ```
impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        fn number(word: &str) -> Result<usize, Error> {
            word.parse::<usize>().map_err(Error::InvalidInteger)
        }

        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            [index] if index.starts_with(|c: char| c.is_ascii_digit()) => {
                Ok(Command::PlayMove(number(index)?))
            }
            ["play", index] => Ok(Command::PlayMove(number(index)?)),
            ["jump" | "goto", move_number] => Ok(Command::JumpTo(number(move_number)?)),
            ["start"] => Ok(Command::JumpTo(0)),
            ["rows", rows] => Ok(Command::Resize {
                rows: Some(number(rows)?),
                columns: None,
            }),
            ["columns" | "cols", columns] => Ok(Command::Resize {
                rows: None,
                columns: Some(number(columns)?),
            }),
            ["resize", rows, columns] => Ok(Command::Resize {
                rows: Some(number(rows)?),
                columns: Some(number(columns)?),
            }),
            ["order"] => Ok(Command::ToggleOrder),
            _ => Err(Error::UnknownCommand(line.trim().to_string())),
        }
    }
}
