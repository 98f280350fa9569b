//! Hand-checked puzzles shared by the unit tests.

use crate::puzzle::{Layer, Puzzle, PuzzleConfig};

fn build(board: &str, rotations: &str, cell: usize, layer: Layer) -> Puzzle {
    let config = PuzzleConfig::from_compact(board, rotations, cell, layer).unwrap();
    Puzzle::new(&config).unwrap()
}

/// Pawn already on the exit tile, top layer, exit side open.
pub fn at_exit() -> Puzzle {
    build("CABD.EFGH", "000000000", 0, Layer::Top)
}

/// Pawn sealed on a ground tile in the centre; it can never move, so the
/// exit is never reachable whatever slides happen around it.
pub fn sealed_pawn() -> Puzzle {
    build("ABCDFEGH.", "000000000", 4, Layer::Ground)
}

/// Exit cell blank; the pawn stands on the only tile that can open the
/// exit. Optimal play: walk down the stairs to the hole at 4, slide D up
/// into the exit cell, walk 4 -> 1 -> 0 on the ground, climb, leave.
/// Total cost 5.
pub fn one_slide() -> Puzzle {
    build(".GADFBCEH", "020010000", 3, Layer::Top)
}

/// A* on this board reaches some states first by a dearer route and later
/// by a cheaper one, leaving stale entries on the frontier. Solves at 25.
pub fn stale_route() -> Puzzle {
    build("DFBAHEC.G", "232303231", 5, Layer::Ground)
}
