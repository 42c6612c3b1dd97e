//! Solves puzzles with the technique solver and reports what it used.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example solve_puzzle -- 8..........36......7..9.2...5...7.......457.....1...3...1....68..85...1..9....4..
//! ```
//!
//! Read one puzzle per line from stdin when no puzzle is given, and solve them in
//! parallel:
//!
//! ```sh
//! cargo run --release --example solve_puzzle < puzzles.txt
//! ```
//!
//! List every chain found once the simpler techniques are stuck:
//!
//! ```sh
//! RUST_LOG=chainlace_solver=debug cargo run --example solve_puzzle -- --chains <PUZZLE>
//! ```

use std::{
    io::{self, BufRead as _},
    process,
};

use chainlace_core::DigitGrid;
use chainlace_solver::{
    TechniqueGrid, TechniqueSolver, TechniqueSolverStats,
    chain::{ChainSearcher, ChainingOptions},
    technique,
};
use clap::{Parser, ValueEnum};
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SolverKind {
    All,
    Fundamental,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    Elementary,
    Grouped,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Puzzles as 81-character strings. Read from stdin when omitted.
    #[arg(value_name = "PUZZLE")]
    puzzles: Vec<String>,

    /// Solver technique set.
    #[arg(long, value_name = "KIND", default_value = "all")]
    solver: SolverKind,

    /// After solving, list every chain found on the grid where the simpler
    /// techniques got stuck.
    #[arg(long)]
    chains: bool,

    /// Link types used by `--chains`.
    #[arg(long, value_name = "PRESET", default_value = "grouped")]
    preset: Preset,

    /// Do not assume the puzzle has a unique solution (disables unique rectangles).
    #[arg(long)]
    no_uniqueness: bool,
}

struct Report {
    puzzle: DigitGrid,
    result: Result<(bool, TechniqueGrid, TechniqueSolverStats), String>,
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let puzzles = match read_puzzles(&args.puzzles) {
        Ok(puzzles) => puzzles,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    let solver = build_solver(args.solver);
    let reports = puzzles
        .into_par_iter()
        .map(|puzzle| {
            let mut grid = TechniqueGrid::from_digit_grid(&puzzle);
            let result = solver
                .solve(&mut grid)
                .map(|(solved, stats)| (solved, grid, stats))
                .map_err(|err| err.to_string());
            Report { puzzle, result }
        })
        .collect::<Vec<_>>();

    let mut unsolved = 0;
    for report in &reports {
        println!("Problem:");
        println!("  {}", report.puzzle);
        match &report.result {
            Ok((solved, grid, stats)) => {
                println!("{}:", if *solved { "Solution" } else { "Stuck at" });
                println!("  {}", grid.to_digit_grid());
                print_stats(&solver, stats);
                if !solved {
                    unsolved += 1;
                    if args.chains {
                        print_chains(&args, &report.puzzle);
                    }
                }
            }
            Err(err) => {
                unsolved += 1;
                println!("Error:");
                println!("  {err}");
            }
        }
        println!();
    }
    println!("Solved {}/{}", reports.len() - unsolved, reports.len());
    if unsolved > 0 {
        process::exit(1);
    }
}

fn read_puzzles(args: &[String]) -> Result<Vec<DigitGrid>, String> {
    let lines = if args.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| format!("failed to read stdin: {err}"))?
    } else {
        args.to_vec()
    };
    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.parse::<DigitGrid>()
                .map_err(|err| format!("invalid puzzle {line:?}: {err}"))
        })
        .collect()
}

fn build_solver(kind: SolverKind) -> TechniqueSolver {
    match kind {
        SolverKind::All => TechniqueSolver::with_all_techniques(),
        SolverKind::Fundamental => TechniqueSolver::with_fundamental_techniques(),
    }
}

fn print_stats(solver: &TechniqueSolver, stats: &TechniqueSolverStats) {
    println!("Stats:");
    for (technique, count) in solver.techniques().iter().zip(stats.applications()) {
        println!("  {}: {count}", technique.name());
    }
    for (name, count) in stats.chain_names() {
        println!("    {name}: {count}");
    }
    println!("  total: {}", stats.total_steps());
}

/// Lists the chains available on the grid the non-chain techniques leave behind.
fn print_chains(args: &Args, puzzle: &DigitGrid) {
    let simple = TechniqueSolver::new(
        technique::all_techniques()
            .into_iter()
            .filter(|technique| !technique.is_chaining())
            .collect(),
    );
    let mut grid = TechniqueGrid::from_digit_grid(puzzle);
    if let Err(err) = simple.solve(&mut grid) {
        println!("  {err}");
        return;
    }

    let options = match args.preset {
        Preset::Elementary => ChainingOptions::elementary(),
        Preset::Grouped => ChainingOptions::grouped(),
    }
    .with_assume_unique_solution(!args.no_uniqueness);
    let searcher = ChainSearcher::new(options);
    let links = searcher.build_links(&grid);
    println!(
        "Links: {} strong, {} weak over {} candidate sets",
        links.strong_count(),
        links.weak_count(),
        links.set_count()
    );
    match searcher.find_steps(&grid, false) {
        Ok(steps) => {
            println!("Chains ({}):", steps.len());
            for step in steps {
                println!("  [{}] {step}", step.complexity());
            }
        }
        Err(err) => println!("  {err}"),
    }
}
