//! CLI entry point for the Temple Trap solver.
//!
//! Usage:
//!   temple-trap solve <puzzle.json> [options]
//!   temple-trap solve --stdin [options]
//!   temple-trap solve --board CDGB.HAEF --rotations 002301002 --pawn-cell 8 --layer ground
//!   temple-trap demo [--mode astar|uniform|both]
//!
//! Options:
//!   --mode <mode>            astar or uniform (default: astar)
//!   --ceiling <cost>         Cost ceiling (uniform default: 15)
//!   --timeout <seconds>      Maximum search time, 0 for none (default: 30)
//!   --max-expansions <n>     Maximum nodes taken off the frontier
//!   --compare                Run both modes and report both
//!
//! Logs go to stderr and are filtered through `RUST_LOG`
//! (default `temple_trap=info`). The JSON report goes to stdout.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use temple_trap::{
    sample_puzzles, Layer, Move, Puzzle, PuzzleConfig, PuzzleError, SearchMode, SolveStatus,
    SolverConfig, SolverResult, DEFAULT_COST_CEILING,
};

#[derive(Parser)]
#[command(name = "temple-trap")]
#[command(about = "Shortest-cost solver for Temple Trap sliding-tile puzzles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Astar,
    Uniform,
    Both,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one puzzle and print a JSON report
    Solve {
        /// Path to puzzle JSON file
        #[arg(value_name = "FILE", conflicts_with_all = ["stdin", "board"])]
        file: Option<PathBuf>,

        /// Read puzzle JSON from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Compact board, one symbol per cell, `.` for the blank
        #[arg(long, requires_all = ["rotations", "pawn_cell", "layer"])]
        board: Option<String>,

        /// Compact rotations, e.g. `002301002` or `0,0,2,3,0,1,0,0,2`
        #[arg(long)]
        rotations: Option<String>,

        /// Starting cell of the pawn (0..=8)
        #[arg(long)]
        pawn_cell: Option<usize>,

        /// Starting layer of the pawn (top or ground)
        #[arg(long)]
        layer: Option<String>,

        /// Search mode
        #[arg(long, value_enum, default_value = "astar")]
        mode: ModeArg,

        /// Maximum accumulated cost before the search gives up
        #[arg(long)]
        ceiling: Option<u32>,

        /// Maximum search time in seconds, 0 for no limit
        #[arg(long, default_value = "30")]
        timeout: u64,

        /// Maximum nodes taken off the frontier
        #[arg(long)]
        max_expansions: Option<usize>,

        /// Run both search modes
        #[arg(long)]
        compare: bool,
    },

    /// Solve the built-in sample puzzles and print the results
    Demo {
        #[arg(long, value_enum, default_value = "both")]
        mode: ModeArg,

        /// Maximum search time per run in seconds, 0 for no limit
        #[arg(long, default_value = "30")]
        timeout: u64,
    },
}

/// Output format for one search run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    puzzle: Option<String>,
    mode: SearchMode,
    status: SolveStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_cost: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    moves: Vec<Move>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    annotation: Option<String>,
    states_explored: usize,
    states_discarded: usize,
    states_generated: usize,
    time_elapsed_ms: u64,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("temple_trap=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            file,
            stdin,
            board,
            rotations,
            pawn_cell,
            layer,
            mode,
            ceiling,
            timeout,
            max_expansions,
            compare,
        } => {
            let input = PuzzleInput {
                file,
                stdin,
                board,
                rotations,
                pawn_cell,
                layer,
            };
            let puzzle = match input.load().and_then(|config| Puzzle::new(&config)) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            let modes = if compare { ModeArg::Both } else { mode };
            let outputs: Vec<SolveOutput> = search_modes(modes)
                .into_iter()
                .map(|mode| {
                    let config = solver_config(mode, ceiling, timeout, max_expansions);
                    format_result(puzzle.name(), mode, &puzzle.solve(&config))
                })
                .collect();

            if let [first, second] = outputs.as_slice() {
                if first.total_cost != second.total_cost {
                    warn!(
                        event = "mode_disagreement",
                        astar = ?first.total_cost,
                        uniform = ?second.total_cost,
                    );
                }
            }

            let solved = outputs.iter().all(|o| o.status == SolveStatus::Solved);
            let rendered = if outputs.len() == 1 {
                serde_json::to_string_pretty(&outputs[0])
            } else {
                serde_json::to_string_pretty(&outputs)
            };
            match rendered {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error writing report: {}", e);
                    std::process::exit(1);
                }
            }

            if solved {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }
        Commands::Demo { mode, timeout } => run_demo(mode, timeout),
    }
}

/// Where the puzzle description comes from
struct PuzzleInput {
    file: Option<PathBuf>,
    stdin: bool,
    board: Option<String>,
    rotations: Option<String>,
    pawn_cell: Option<usize>,
    layer: Option<String>,
}

impl PuzzleInput {
    fn load(&self) -> Result<PuzzleConfig, PuzzleError> {
        if let (Some(board), Some(rotations), Some(cell), Some(layer)) =
            (&self.board, &self.rotations, self.pawn_cell, &self.layer)
        {
            let layer: Layer = layer.parse()?;
            return PuzzleConfig::from_compact(board, rotations, cell, layer);
        }

        let json = if self.stdin {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        } else if let Some(path) = &self.file {
            fs::read_to_string(path)?
        } else {
            return Err(PuzzleError::MissingInput);
        };
        PuzzleConfig::from_json_str(&json)
    }
}

fn search_modes(mode: ModeArg) -> Vec<SearchMode> {
    match mode {
        ModeArg::Astar => vec![SearchMode::AStar],
        ModeArg::Uniform => vec![SearchMode::Uniform],
        ModeArg::Both => vec![SearchMode::AStar, SearchMode::Uniform],
    }
}

fn solver_config(
    mode: SearchMode,
    ceiling: Option<u32>,
    timeout: u64,
    max_expansions: Option<usize>,
) -> SolverConfig {
    let base = match mode {
        SearchMode::AStar => SolverConfig {
            cost_ceiling: ceiling,
            ..SolverConfig::default()
        },
        SearchMode::Uniform => SolverConfig::bounded_at(ceiling.unwrap_or(DEFAULT_COST_CEILING)),
    };
    let timeout = (timeout > 0).then(|| Duration::from_secs(timeout));
    base.with_timeout(timeout).with_max_expansions(max_expansions)
}

fn format_result(name: Option<&str>, mode: SearchMode, result: &SolverResult) -> SolveOutput {
    let solution = result.solution.as_ref();
    SolveOutput {
        puzzle: name.map(str::to_string),
        mode,
        status: result.status,
        total_cost: result.total_cost(),
        moves: solution.map(|s| s.moves.clone()).unwrap_or_default(),
        labels: solution.map(|s| s.labels()).unwrap_or_default(),
        annotation: solution.map(|s| s.annotation()),
        states_explored: result.states_explored,
        states_discarded: result.states_discarded,
        states_generated: result.states_generated,
        time_elapsed_ms: result.time_elapsed_ms,
    }
}

fn run_demo(mode: ModeArg, timeout: u64) {
    for config in sample_puzzles() {
        println!("{}", "-".repeat(50));
        let puzzle = match Puzzle::new(&config) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error: {}", e);
                continue;
            }
        };
        println!("{}", puzzle.name().unwrap_or("unnamed"));
        println!("{}", puzzle.initial_state());

        for mode in search_modes(mode) {
            let result = puzzle.solve(&solver_config(mode, None, timeout, None));
            println!();
            match &result.solution {
                Some(solution) => {
                    println!("{:?}: cost {}", mode, solution.total_cost);
                    println!("  {}", solution.labels().join(", "));
                    println!("  {}", solution.annotation());
                }
                None => println!("{:?}: {:?}", mode, result.status),
            }
            println!(
                "  explored {} / discarded {} / generated {} in {} ms",
                result.states_explored,
                result.states_discarded,
                result.states_generated,
                result.time_elapsed_ms
            );
        }
    }
}
