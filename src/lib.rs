use std::num::ParseIntError;

use sodium::{Cell, CellLoop, SodiumCtx, Stream};
use thiserror::Error;

mod board;
mod command;
mod game;
mod history;
mod status;

pub use board::{Board, Dimensions, Mark, Position, MAX_SIDE, MIN_SIDE};
pub use command::Command;
pub use game::GameController;
pub use history::{History, Move, Order};
pub use status::{evaluate, GameStatus, WIN_LENGTH};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid move: square {0} is already taken!")]
    CellOccupied(usize),

    #[error("invalid index: {0}!")]
    IndexOutOfBounds(usize),

    #[error("the game is over!")]
    GameOver,

    #[error("invalid move number: {0}!")]
    MoveOutOfRange(usize),

    #[error("invalid board side: {0}! sides must be between {} and {}", MIN_SIDE, MAX_SIDE)]
    InvalidDimension(usize),

    #[error("invalid input: {0}!")]
    InvalidInteger(ParseIntError),

    #[error("unknown command: {0:?}")]
    UnknownCommand(String),
}

/// A game wired into a sodium network: commands go in as a stream, the
/// current game comes out as cells.
pub struct GameSession {
    pub game: Cell<GameController>,
    pub board: Cell<Board>,
    pub status: Cell<GameStatus>,
    pub turn: Cell<Mark>,
    pub order: Cell<Order>,
    pub moves: Stream<(usize, Mark)>,
    pub winner: Stream<Mark>,
    pub rejected: Stream<Error>,
}

/// Splits lines of text into commands and parse errors.
pub struct CommandParser {
    pub commands: Stream<Command>,
    pub errors: Stream<Error>,
}

#[derive(Clone)]
struct Outcome {
    command: Command,
    game: GameController,
    result: Result<(), Error>,
}

impl Outcome {
    fn played(&self) -> Option<(usize, Mark)> {
        match (self.command, &self.result) {
            (Command::PlayMove(index), Ok(())) => {
                self.game.board().get(index).map(|mark| (index, mark))
            }
            _ => None,
        }
    }
}

impl GameSession {
    pub fn new(ctx: &SodiumCtx, commands: &Stream<Command>, dimensions: Dimensions) -> GameSession {
        ctx.transaction(|| {
            let game_cell_loop: CellLoop<GameController> = ctx.new_cell_loop();
            let game_cell_fwd = game_cell_loop.cell();

            let game_commands = commands.filter(|command: &Command| !command.is_display_only());
            let toggles = commands
                .filter(|command: &Command| command.is_display_only())
                .map(|_: &Command| ());

            let outcome_stream = game_commands.snapshot(
                &game_cell_fwd,
                |command: &Command, game: &GameController| {
                    let mut game = game.clone();
                    let result = game.dispatch(*command);
                    Outcome {
                        command: *command,
                        game,
                        result,
                    }
                },
            );

            let game_cell = outcome_stream
                .map(|outcome: &Outcome| outcome.game.clone())
                .hold(GameController::new(dimensions));
            game_cell_loop.loop_(&game_cell);

            let rejected = outcome_stream
                .map(|outcome: &Outcome| outcome.result.clone().err())
                .filter_option();

            let moves = outcome_stream
                .map(|outcome: &Outcome| outcome.played())
                .filter_option();

            let winner = outcome_stream
                .filter(|outcome: &Outcome| outcome.played().is_some())
                .map(|outcome: &Outcome| outcome.game.status().winner())
                .filter_option();

            GameSession {
                board: game_cell.map(|game: &GameController| game.board().clone()),
                status: game_cell.map(|game: &GameController| game.status()),
                turn: game_cell.map(|game: &GameController| game.turn()),
                order: order_swapping(ctx, &toggles),
                game: game_cell,
                moves,
                winner,
                rejected,
            }
        })
    }
}

impl CommandParser {
    pub fn new(input_stream: &Stream<String>) -> CommandParser {
        let (commands, errors) = input_stream
            .filter(|line: &String| !line.trim().is_empty())
            .map(|line: &String| line.parse::<Command>())
            .split_res();

        CommandParser { commands, errors }
    }
}

fn order_swapping(ctx: &SodiumCtx, toggle_stream: &Stream<()>) -> Cell<Order> {
    ctx.transaction(|| {
        let order_cell_loop: CellLoop<Order> = ctx.new_cell_loop();

        let order_cell_fwd = order_cell_loop.cell();
        let order_cell = toggle_stream
            .snapshot(&order_cell_fwd, |_: &(), order: &Order| order.toggle())
            .hold(Order::Ascending);

        order_cell_loop.loop_(&order_cell);
        order_cell
    })
}
