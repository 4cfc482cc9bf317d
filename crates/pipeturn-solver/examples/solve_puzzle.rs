//! Example demonstrating rotational pipe puzzle solving.
//!
//! This example shows how to:
//! - Build a random puzzle with `PuzzleFixture`, or read one from a file
//! - Solve it with `PipeSolver`
//! - Display the puzzle, the solution and the solver statistics
//!
//! # Usage
//!
//! ```sh
//! cargo run --example solve_puzzle
//! ```
//!
//! Choose the puzzle size, the share of open edges and the seed:
//!
//! ```sh
//! cargo run --example solve_puzzle -- --rows 12 --cols 20 --fill-ratio 0.6 --seed 7
//! ```
//!
//! Solve a grid stored as one row of hexadecimal tile values per line:
//!
//! ```sh
//! cargo run --example solve_puzzle -- --input puzzle.txt
//! ```
//!
//! Search independent clusters in parallel and show progress logs:
//!
//! ```sh
//! RUST_LOG=info cargo run --example solve_puzzle -- --parallel
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use pipeturn_core::TileGrid;
use pipeturn_solver::{PipeSolver, SolverStats, testing::PuzzleFixture};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Number of interior rows of a generated puzzle.
    #[arg(long, value_name = "ROWS", default_value_t = 8)]
    rows: usize,

    /// Number of interior columns of a generated puzzle.
    #[arg(long, value_name = "COLS", default_value_t = 12)]
    cols: usize,

    /// Probability that an edge between two interior cells is open.
    #[arg(long, value_name = "RATIO", default_value_t = 0.5)]
    fill_ratio: f64,

    /// Seed of the generated puzzle. Random if omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Solve the grid in FILE instead of a generated puzzle.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["rows", "cols", "fill_ratio", "seed"])]
    input: Option<PathBuf>,

    /// Search independent clusters in parallel.
    #[arg(long)]
    parallel: bool,
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let puzzle = match &args.input {
        Some(path) => read_puzzle(path),
        None => generate_puzzle(&args),
    };

    println!("Problem:");
    print_grid(&puzzle);
    println!();

    let solver = PipeSolver::new().with_parallel_clusters(args.parallel);
    let mut stats = SolverStats::default();
    let result = solver.solve_with_stats(&puzzle, &mut stats);
    match result {
        Ok(solved) => {
            println!("Solution:");
            print_grid(&solved);
            println!();
            print_stats(&stats);
        }
        Err(err) => {
            print_stats(&stats);
            eprintln!("Failed to solve the puzzle: {err}");
            process::exit(1);
        }
    }
}

fn read_puzzle(path: &Path) -> TileGrid {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Failed to read {}: {err}", path.display());
            process::exit(2);
        }
    };
    match text.parse() {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("Failed to parse {}: {err}", path.display());
            process::exit(2);
        }
    }
}

fn generate_puzzle(args: &Args) -> TileGrid {
    if args.rows == 0 || args.cols == 0 {
        eprintln!("--rows and --cols must be at least 1.");
        process::exit(2);
    }
    if !(0.0..=1.0).contains(&args.fill_ratio) {
        eprintln!("--fill-ratio must be between 0 and 1.");
        process::exit(2);
    }
    let seed = args.seed.unwrap_or_else(rand::random);
    println!("Seed:");
    println!("  {seed}");
    println!();
    PuzzleFixture::generate(args.rows, args.cols, args.fill_ratio, seed)
        .scrambled()
        .clone()
}

fn print_grid(grid: &TileGrid) {
    for line in grid.to_string().lines() {
        println!("  {line}");
    }
}

fn print_stats(stats: &SolverStats) {
    println!("Stats:");
    println!("  interior cells: {}", stats.interior_cells());
    println!(
        "  resolved by propagation: {} ({:.1}%)",
        stats.resolved_by_propagation(),
        stats.propagation_ratio() * 100.0
    );
    println!("  clusters: {}", stats.clusters());
    println!("  branches: {}", stats.search().branches());
    println!("  backtracks: {}", stats.search().backtracks());
    println!("  max depth: {}", stats.search().max_depth());
}
