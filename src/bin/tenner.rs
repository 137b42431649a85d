//! Command-line frontend: solve puzzle files, generate fresh puzzles.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tenner::{
    grid::{layout::Layout, puzzle::Puzzle},
    solver::{seeder::Seeder, stats::render_stats_table, strategy::StrategyKind},
};

#[derive(Parser)]
#[command(name = "tenner", version, about = "Solve and generate Tenner Grid puzzles")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a puzzle file (rows of comma-separated digits with `_` for
    /// blanks, closed by an `=`-prefixed line of column sums).
    Solve {
        /// Path to the puzzle, or `-` to read standard input.
        file: PathBuf,
        /// Search strategy to use.
        #[arg(long, value_enum, default_value_t = StrategyKind::ForwardCheckingMrv)]
        strategy: StrategyKind,
        /// Print the search statistics table after the result.
        #[arg(long)]
        stats: bool,
        /// Emit the solved grid as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Generate a fresh puzzle.
    Generate {
        /// Number of grid rows.
        #[arg(long, default_value_t = 3)]
        rows: usize,
        /// RNG seed; equal seeds reproduce equal puzzles.
        #[arg(long)]
        seed: Option<u64>,
        /// Also print the solved grid the puzzle extends to.
        #[arg(long)]
        solution: bool,
        /// Emit the puzzle as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match cli.command {
        Command::Solve {
            file,
            strategy,
            stats,
            json,
        } => {
            let text = if file.as_os_str() == "-" {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            } else {
                fs::read_to_string(&file)?
            };
            let puzzle: Puzzle = text.parse()?;

            let (solution, search_stats) = puzzle.solve(strategy)?;
            let outcome = match solution {
                Some(solved) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&solved)?);
                    } else {
                        println!("{solved}");
                    }
                    ExitCode::SUCCESS
                }
                None => {
                    eprintln!("no solution found");
                    ExitCode::FAILURE
                }
            };
            if stats {
                println!("{}", render_stats_table(&search_stats));
            }
            Ok(outcome)
        }
        Command::Generate {
            rows,
            seed,
            solution,
            json,
        } => {
            let layout = Layout::new(rows)?;
            let puzzle = match seed {
                Some(seed) => Puzzle::generate(layout, &mut Seeder::from_seed(seed))?,
                None => Puzzle::generate(layout, &mut Seeder::new_default())?,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&puzzle)?);
            } else {
                println!("{puzzle}");
            }
            if solution {
                let (solved, _) = puzzle.solve(StrategyKind::ForwardCheckingMrv)?;
                // Generation guarantees solvability, so this always prints.
                if let Some(solved) = solved {
                    println!();
                    println!("{solved}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
