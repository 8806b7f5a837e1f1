use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use special_connect_four::config::GameConfig;
use special_connect_four::error::{InputError, MoveError};
use special_connect_four::game::{Board, GameOutcome, GameSession, Player, Symbol};
use special_connect_four::input::{parse_player_line, parse_turn};

/// Play Connect Four with Bomb and Teleport pieces in the terminal.
#[derive(Parser)]
#[command(name = "special-connect-four", about = "Connect Four with Bomb and Teleport pieces")]
struct Cli {
    /// Number of rows on the board
    #[arg(requires = "columns")]
    rows: Option<usize>,

    /// Number of columns on the board
    columns: Option<usize>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,
}

type Lines = io::Lines<io::StdinLock<'static>>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the board.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if cli.print_config {
        print!("{}", GameConfig::classic_toml());
        return Ok(());
    }

    let mut config = GameConfig::from_file_or_classic(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let (Some(rows), Some(columns)) = (cli.rows, cli.columns) {
        config.board.rows = rows;
        config.board.cols = columns;
    }

    let (rows, cols) = (config.board.rows, config.board.cols);
    let board = Board::new(rows, cols).context("creating board")?;
    if !board.can_connect_four() {
        warn!(rows, cols, "board too small for four in a row; the game can only end in a draw");
    }

    println!("Starting connect four game with {rows}x{cols}");
    println!("Please enter the username and symbol you want to use, symbol can be either O or X.\n");

    let mut lines = io::stdin().lines();
    let first = prompt_player(&mut lines, "Enter player one's name and symbol: ", None)?;
    let second = prompt_player(
        &mut lines,
        "Enter player two's name and symbol: ",
        Some(first.symbol()),
    )?;
    let mut game = GameSession::new(board, first, second, &config.pieces)?;

    play(&mut game, &mut lines, config.input.one_based_columns)?;

    match game.outcome() {
        Some(GameOutcome::Winner(symbol)) => {
            let name = game.player(symbol).map_or("Somebody", Player::username);
            println!("{name} wins!");
        }
        Some(GameOutcome::Draw) | None => println!("It was a draw!"),
    }
    print!("{}", game.board());
    Ok(())
}

fn prompt(lines: &mut Lines, text: &str) -> Result<String> {
    print!("{text}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => line.context("reading stdin"),
        None => bail!("input closed before the game finished"),
    }
}

fn prompt_player(lines: &mut Lines, text: &str, taken: Option<Symbol>) -> Result<Player> {
    loop {
        let line = prompt(lines, text)?;
        let parsed = parse_player_line(&line).and_then(|(name, symbol)| {
            if taken == Some(symbol) {
                return Err(InputError::DuplicateSymbol(symbol.as_char()));
            }
            Player::new(&name, symbol)
        });
        match parsed {
            Ok(player) => return Ok(player),
            Err(err) => println!("{err}"),
        }
    }
}

fn play(game: &mut GameSession, lines: &mut Lines, one_based: bool) -> Result<()> {
    print!("{}", game.board());
    while !game.is_terminal() {
        if let Some(skipped) = game.skip_exhausted() {
            let name = game.player(skipped).map_or("Player", Player::username);
            println!("{name} out of pieces");
            print!("{}", game.board());
            continue;
        }

        let player = game.current_player();
        let owner = player.symbol();
        println!("{}", player.describe_hand());
        let line = prompt(lines, "Choose a piece to play (symbol and column): ")?;

        let command = match parse_turn(&line, owner, one_based) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        match game.play(command.kind, command.column) {
            Ok(_) => {
                if !game.is_terminal() {
                    print!("{}", game.board());
                }
            }
            Err(err) => println!("{}", describe_move_error(&err, one_based)),
        }
    }
    Ok(())
}

/// Report move errors with column numbers as the player typed them.
fn describe_move_error(err: &MoveError, one_based: bool) -> String {
    let shown = |col: usize| if one_based { col + 1 } else { col };
    match err {
        MoveError::InvalidColumn { column, cols } => format!(
            "column {} is outside the board ({}..={})",
            shown(*column),
            shown(0),
            shown(cols - 1)
        ),
        MoveError::ColumnFull(col) => format!("column {} is full", shown(*col)),
        other => other.to_string(),
    }
}
