use std::io::BufRead;

use clap::Parser;
use sodium::{SodiumCtx, StreamSink};
use tracing_subscriber::EnvFilter;

use gridttt::{
    Board, CommandParser, Dimensions, Error, GameController, GameSession, Mark, Order,
};

/// Play tic-tac-toe on a grid of any size from 3x3 to 10x10.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Number of rows on the board
    #[arg(short, long, default_value_t = 3)]
    rows: usize,

    /// Number of columns on the board
    #[arg(short, long, default_value_t = 3)]
    columns: usize,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let dimensions = Dimensions::new(cli.rows, cli.columns)?;

    let ctx = SodiumCtx::new();

    let (kb_input, _listeners) = ctx.transaction(|| {
        let mut listeners = Vec::new();
        let kb_input: StreamSink<String> = ctx.new_stream_sink();

        let parser = CommandParser::new(&kb_input.stream());
        let session = GameSession::new(&ctx, &parser.commands, dimensions);

        listeners.push(parser.errors.listen(|err: &Error| println!("{}", err)));
        listeners.push(session.rejected.listen(|err: &Error| println!("{}", err)));

        listeners.push(session.moves.listen(|(index, mark): &(usize, Mark)| {
            println!("\n{}s took square {}:", mark, index)
        }));

        listeners.push(
            session
                .game
                .updates()
                .snapshot(&session.order, |game: &GameController, order: &Order| {
                    (game.clone(), *order)
                })
                .listen(|(game, order): &(GameController, Order)| {
                    print_game(game);
                    print_history(game, *order);
                }),
        );

        listeners.push(
            session
                .order
                .updates()
                .snapshot(&session.game, |order: &Order, game: &GameController| {
                    (*order, game.clone())
                })
                .listen(|(order, game): &(Order, GameController)| print_history(game, *order)),
        );

        listeners.push(
            session
                .winner
                .listen(|mark: &Mark| println!("{} has won the game!", mark)),
        );

        println!("Welcome to Tic Tac Toe!\n");
        print_game(&session.game.sample());

        (kb_input, listeners)
    });

    let stdin = std::io::stdin().lock();
    for line in stdin.lines().map_while(Result::ok) {
        kb_input.send(line);
    }

    Ok(())
}

fn print_game(game: &GameController) {
    let board: &Board = game.board();
    println!("{}", board);
    if game.status().is_in_progress() {
        println!("Next player: {}", game.turn());
    } else {
        println!("{}", game.status());
    }
}

fn print_history(game: &GameController, order: Order) {
    let history = game.history();
    println!("Game History");
    for (number, entry) in history.listing(order) {
        println!("  {}", entry.describe(number, number == history.cursor()));
    }
}
