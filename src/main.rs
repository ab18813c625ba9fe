use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use tictac_nn::game::SIZE;
use tictac_nn::{
    play_game, BoardRenderer, Engine, EngineConfig, Evaluation, Game, MoveError, MoveSource, NetworkSpec, Status,
    Strategy, Symbol,
};

/// Play tic-tac-toe against a network trained on minimax targets.
#[derive(Parser)]
#[command(name = "tictac-nn", about = "Play tic-tac-toe against a minimax-trained network")]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, default_value = "tictac-nn.json")]
    config: PathBuf,

    /// Difficulty from 1 to 10; more means more training
    #[arg(long)]
    difficulty: Option<u8>,

    /// Your symbol
    #[arg(long, value_enum)]
    human: Option<Side>,

    /// Seed for weight initialisation and random choices
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with the network topology, replacing the config's
    #[arg(long)]
    network_spec: Option<PathBuf>,

    /// Override the number of training epochs
    #[arg(long)]
    epochs: Option<usize>,

    /// Let the computer search with minimax instead of the network
    #[arg(long)]
    perfect: bool,

    /// Print the training summary as JSON
    #[arg(long)]
    json: bool,

    /// After training, compare the network with minimax on this many random boards
    #[arg(long, value_name = "BOARDS")]
    report: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    X,
    O,
}

/// Reads "row column" pairs, 1-based, one move per line.
struct ConsoleMoves<R> {
    input: R,
}

impl<R: BufRead> MoveSource for ConsoleMoves<R> {
    fn next_move(&mut self, _game: &Game) -> Option<(usize, usize)> {
        loop {
            print!("Your turn. Enter row and column (1-3): ");
            io::stdout().flush().ok()?;

            let mut line = String::new();
            if self.input.read_line(&mut line).ok()? == 0 {
                return None;
            }

            let parts: Vec<usize> = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|s| !s.is_empty())
                .filter_map(|s| s.parse().ok())
                .collect();

            match parts.as_slice() {
                [row, column] if *row >= 1 && *column >= 1 => return Some((row - 1, column - 1)),
                _ => println!("Please enter two numbers between 1 and {SIZE}."),
            }
        }
    }

    fn rejected(&mut self, error: MoveError) {
        println!("Invalid move: {}. Try again.", describe(error));
    }
}

/// `MoveError` text with the 1-based coordinates the player typed.
fn describe(error: MoveError) -> String {
    match error {
        MoveError::OutOfBounds { row, column } => MoveError::OutOfBounds { row: row + 1, column: column + 1 }.to_string(),
        MoveError::Occupied { row, column } => MoveError::Occupied { row: row + 1, column: column + 1 }.to_string(),
        MoveError::GameOver => error.to_string(),
    }
}

fn print_report(evaluation: &Evaluation) {
    for (i, report) in evaluation.reports.iter().enumerate() {
        println!("Board {} (computer as X):", i + 1);
        println!("{}", report.board);
        let row = |values: &[f64]| values.iter().map(|v| format!("{v:6.2}")).collect::<Vec<_>>().join(" ");
        println!("  network:    {}", row(&report.predicted[..]));
        println!("  minimax:    {}", row(&report.optimal[..]));
        println!("  difference: {}", row(&report.difference()[..]));
        match report.agrees {
            Some(true) => println!("  best move matches minimax"),
            Some(false) => println!("  best move differs from minimax"),
            None => println!("  game already over"),
        }
    }
    println!("Mean absolute error: {:.3}", evaluation.mean_abs_error());
    if let Some(agreement) = evaluation.agreement() {
        println!("Best-move agreement: {:.1}%", agreement * 100.0);
    }
}

struct ConsoleBoard;

impl BoardRenderer for ConsoleBoard {
    fn render(&mut self, cells: &[[Symbol; SIZE]; SIZE], text: fn(Symbol) -> &'static str) {
        println!();
        for (i, row) in cells.iter().enumerate() {
            let line: Vec<&str> = row.iter().map(|&s| text(s)).collect();
            println!("{}", line.join("|"));
            if i < SIZE - 1 {
                println!("-----");
            }
        }
        println!();
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = EngineConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(side) = cli.human {
        config.human_symbol = match side {
            Side::X => Symbol::X,
            Side::O => Symbol::O,
        };
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(path) = &cli.network_spec {
        config.network = NetworkSpec::load_json(path)
            .with_context(|| format!("loading network spec from {}", path.display()))?;
    }
    if cli.perfect {
        config.strategy = Strategy::Minimax;
    }
    let epochs = cli.epochs.unwrap_or_else(|| config.epochs());

    let mut engine = Engine::new(config).context("invalid engine configuration")?;

    if engine.config().strategy == Strategy::Network {
        let summary = engine.train(epochs, None).context("training failed")?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        if let Some(samples) = cli.report {
            let evaluation = engine.evaluate(samples).context("evaluation failed")?;
            print_report(&evaluation);
        }
    }

    let mut game = engine.new_game();
    println!(
        "You are {}. {} moves first.",
        engine.human_symbol().as_str(),
        game.current_player().symbol().as_str()
    );

    let stdin = io::stdin();
    let mut human = ConsoleMoves { input: stdin.lock() };
    let status = play_game(&mut engine, &mut game, &mut human, &mut ConsoleBoard)?;

    let human_won = matches!(
        (status, engine.human_symbol()),
        (Status::XWon, Symbol::X) | (Status::OWon, Symbol::O)
    );
    match status {
        Status::Draw => println!("It's a draw."),
        Status::InProgress => println!("Game abandoned."),
        _ if human_won => println!("You win!"),
        _ => println!("The computer wins."),
    }

    Ok(())
}
