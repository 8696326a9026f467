use std::io;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gridttt::{Command, Dimensions, Error, GameController, GameSession, Order};
use sodium as na;
use tracing_subscriber::EnvFilter;
use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame, Terminal,
};

/// Terminal front end for grid tic-tac-toe.
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

const HELP: &str = "arrows move, enter plays, u/n back/forward, o order, r/R c/C size, q quits";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr, redirect it when setting RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let dimensions = Dimensions::new(cli.rows, cli.columns)?;

    let ctx = na::SodiumCtx::new();
    let (commands, mut ui) = ctx.transaction(|| {
        let commands: na::StreamSink<Command> = ctx.new_stream_sink();
        let session = GameSession::new(&ctx, &commands.stream(), dimensions);

        // Rejections win over the game update fired in the same transaction.
        let message = session
            .rejected
            .map(|err: &Error| Some(err.to_string()))
            .or_else(&session.game.updates().map(|_: &GameController| None::<String>))
            .hold(None);

        let ui = Ui {
            game: session.game,
            order: session.order,
            message,
            selected: 0,
        };
        (commands, ui)
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &commands, &mut ui);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(result?)
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    commands: &na::StreamSink<Command>,
    ui: &mut Ui,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui.draw(f))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let game = ui.game.sample();
        let dimensions = game.dimensions();
        let cursor = game.history().cursor();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                ui.move_selection(key.code, dimensions)
            }
            KeyCode::Enter | KeyCode::Char(' ') => commands.send(Command::PlayMove(ui.selected)),
            KeyCode::Char('u') | KeyCode::Backspace => {
                commands.send(Command::JumpTo(cursor.saturating_sub(1)))
            }
            KeyCode::Char('n') => commands.send(Command::JumpTo(cursor + 1)),
            KeyCode::Char('o') => commands.send(Command::ToggleOrder),
            KeyCode::Char('r') => commands.send(Command::Resize {
                rows: Some(dimensions.rows.saturating_sub(1)),
                columns: None,
            }),
            KeyCode::Char('R') => commands.send(Command::Resize {
                rows: Some(dimensions.rows + 1),
                columns: None,
            }),
            KeyCode::Char('c') => commands.send(Command::Resize {
                rows: None,
                columns: Some(dimensions.columns.saturating_sub(1)),
            }),
            KeyCode::Char('C') => commands.send(Command::Resize {
                rows: None,
                columns: Some(dimensions.columns + 1),
            }),
            _ => {}
        }

        if ui.game.sample().dimensions() != dimensions {
            ui.selected = 0;
        }
    }
}

struct Ui {
    game: na::Cell<GameController>,
    order: na::Cell<Order>,
    message: na::Cell<Option<String>>,
    selected: usize,
}

impl Ui {
    fn move_selection(&mut self, code: KeyCode, dimensions: Dimensions) {
        let row = self.selected / dimensions.columns;
        let col = self.selected % dimensions.columns;
        match code {
            KeyCode::Left if col > 0 => self.selected -= 1,
            KeyCode::Right if col + 1 < dimensions.columns => self.selected += 1,
            KeyCode::Up if row > 0 => self.selected -= dimensions.columns,
            KeyCode::Down if row + 1 < dimensions.rows => self.selected += dimensions.columns,
            _ => {}
        }
    }

    fn draw<B: Backend>(&self, f: &mut Frame<B>) {
        let game = self.game.sample();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .margin(2)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
            .split(f.size());
        let block = Block::default().title("Board").borders(Borders::ALL);
        f.render_widget(Paragraph::new(self.board_lines(&game)).block(block), chunks[0]);

        let info = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(3)].as_ref())
            .split(chunks[1]);

        let status = game.status();
        let status_line = if status.is_in_progress() {
            format!("Next player: {}", game.turn())
        } else {
            status.to_string()
        };
        let info_lines = vec![
            Spans::from(Span::styled(
                status_line,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Spans::from(Span::styled(
                self.message.sample().unwrap_or_default(),
                Style::default().fg(Color::Red),
            )),
            Spans::from(Span::raw(HELP)),
        ];
        let block = Block::default().title("Game Info").borders(Borders::ALL);
        f.render_widget(Paragraph::new(info_lines).block(block), info[0]);

        let order = self.order.sample();
        let history = game.history();
        let items: Vec<ListItem> = history
            .listing(order)
            .into_iter()
            .map(|(number, entry)| {
                let is_current = number == history.cursor();
                let style = if is_current {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(entry.describe(number, is_current)).style(style)
            })
            .collect();
        let title = match order {
            Order::Ascending => "Game History (ascending)",
            Order::Descending => "Game History (descending)",
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        f.render_widget(List::new(items).block(block), info[1]);
    }

    fn board_lines(&self, game: &GameController) -> Vec<Spans<'static>> {
        let board = game.board();
        let status = game.status();
        let columns = board.columns();
        let separator = vec!["───"; columns].join("┼");

        let mut lines = Vec::new();
        for (row, squares) in board.squares().chunks(columns).enumerate() {
            if row > 0 {
                lines.push(Spans::from(separator.clone()));
            }
            let mut spans = Vec::new();
            for (col, square) in squares.iter().enumerate() {
                let index = row * columns + col;
                if col > 0 {
                    spans.push(Span::raw("│"));
                }
                let symbol = square.map(|mark| mark.to_string()).unwrap_or_default();
                let mut style = Style::default();
                if status.line().contains(&index) {
                    style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
                }
                if index == self.selected {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(format!(" {:1} ", symbol), style));
            }
            lines.push(Spans::from(spans));
        }
        lines
    }
}
