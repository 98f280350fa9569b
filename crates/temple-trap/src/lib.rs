//! Solver library for Temple Trap sliding-tile puzzles.
//!
//! A 3x3 board of rotatable two-layer tiles with one blank cell. The pawn
//! walks tile openings, tiles slide into the blank, and the puzzle is solved
//! once the pawn can step off the board through the exit cell. This crate
//! finds a cheapest sequence of pawn walks and slides, either with A* or
//! with a cost-bounded uniform-cost search.

pub mod board;
pub mod error;
pub mod moves;
pub mod puzzle;
pub mod reach;
pub mod samples;
pub mod solver;
pub mod tile;

#[cfg(test)]
mod test_utils;

// Re-export main types
pub use board::{Board, State, CELL_COUNT, EXIT_CELL, EXIT_DIRECTION};
pub use error::PuzzleError;
pub use moves::{children, estimate, Move, Successor};
pub use puzzle::{Direction, Layer, PawnStart, Puzzle, PuzzleConfig};
pub use reach::{goal_reachable, reachable, GoalReach, Reachability};
pub use samples::{sample_by_name, sample_puzzles, samples_in, Difficulty};
pub use solver::{
    solve, SearchMode, Solution, SolveStatus, SolverConfig, SolverResult, DEFAULT_COST_CEILING,
};
pub use tile::{TileKind, TileSpec, TileTable, CATALOG};
