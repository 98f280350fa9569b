//! Successor generation and the search heuristic.
//!
//! A state has two kinds of successors, both derived from one
//! reachability pass over the current board:
//!
//! - the pawn walks to any reachable hole tile (cost = walk length);
//! - a tile next to the blank slides into it (cost 1), unless the pawn
//!   is standing on that tile.

use std::fmt;

use serde::Serialize;

use crate::board::{manhattan, neighbors, State, EXIT_CELL, EXIT_DIRECTION};
use crate::puzzle::{Direction, Layer};
use crate::reach::{goal_from, reachable, GoalReach, Path, Reachability};
use crate::tile::{TileKind, TileTable};

/// One action in a solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Move {
    /// Pawn walks from `from` to the hole at `to`, arriving on `layer`.
    Relocate {
        from: usize,
        to: usize,
        layer: Layer,
        cost: u32,
        path: Path,
    },
    /// `tile` slides from `from` into the blank at `to`, travelling `direction`.
    Slide {
        tile: TileKind,
        from: usize,
        to: usize,
        direction: Direction,
    },
    /// Pawn walks to the exit tile and leaves the board.
    Exit { from: usize, cost: u32, path: Path },
}

impl Move {
    /// Cost the move adds to a solution. The exit includes the step off
    /// the board.
    pub fn cost(&self) -> u32 {
        match self {
            Move::Relocate { cost, .. } => *cost,
            Move::Slide { .. } => 1,
            Move::Exit { cost, .. } => cost + 1,
        }
    }

    /// Short label, e.g. `p:3->4` or `t3->0`.
    pub fn label(&self) -> String {
        match self {
            Move::Relocate { from, to, .. } => format!("p:{from}->{to}"),
            Move::Slide { from, to, .. } => format!("t{from}->{to}"),
            Move::Exit { .. } => "exit".to_string(),
        }
    }

    pub fn is_relocate(&self) -> bool {
        matches!(self, Move::Relocate { .. })
    }

    pub fn is_slide(&self) -> bool {
        matches!(self, Move::Slide { .. })
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, Move::Exit { .. })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Relocate { path, .. } => {
                write!(f, "♔")?;
                for direction in path {
                    write!(f, "{}", direction.arrow())?;
                }
                Ok(())
            }
            Move::Slide {
                tile, direction, ..
            } => write!(f, "{}{}", tile.glyph(), direction.arrow()),
            Move::Exit { path, .. } => {
                write!(f, "♔")?;
                for direction in path {
                    write!(f, "{}", direction.arrow())?;
                }
                write!(f, "{}", EXIT_DIRECTION.arrow())
            }
        }
    }
}

/// A child state together with the move that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Successor {
    pub state: State,
    pub cost: u32,
    pub step: Move,
}

/// Successors of `state`.
pub fn children(tiles: &TileTable, state: &State) -> Vec<Successor> {
    children_from(tiles, state, &reachable(tiles, state))
}

/// Successors of `state`, reusing a reachability pass over the same state.
pub fn children_from(tiles: &TileTable, state: &State, reach: &Reachability) -> Vec<Successor> {
    let mut out = Vec::new();

    for record in reach.records() {
        if record.cell == state.pawn_cell {
            continue;
        }
        let Some(kind) = state.board.get(record.cell) else {
            continue;
        };
        if !tiles.get(kind).hole {
            continue;
        }
        out.push(Successor {
            state: state.with_pawn(record.cell, record.layer),
            cost: record.cost,
            step: Move::Relocate {
                from: state.pawn_cell,
                to: record.cell,
                layer: record.layer,
                cost: record.cost,
                path: record.path.clone(),
            },
        });
    }

    let blank = state.board.blank();
    for &(neighbor, direction) in neighbors(blank) {
        // the pawn's own tile never slides
        if neighbor == state.pawn_cell {
            continue;
        }
        let Some(tile) = state.board.get(neighbor) else {
            continue;
        };
        out.push(Successor {
            state: State::new(state.board.slide(neighbor), state.pawn_cell, state.pawn_layer),
            cost: 1,
            step: Move::Slide {
                tile,
                from: neighbor,
                to: blank,
                direction: direction.opposite(),
            },
        });
    }

    out
}

/// Estimated remaining cost: zero once the exit is reachable, otherwise the
/// pawn's grid distance to the exit plus one when the exit tile cannot
/// open the exit side on either layer.
///
/// This orders the search; it is not a proven lower bound.
pub fn estimate(tiles: &TileTable, state: &State) -> u32 {
    let reach = reachable(tiles, state);
    estimate_from(tiles, state, &goal_from(tiles, &state.board, &reach))
}

fn estimate_from(tiles: &TileTable, state: &State, goal: &GoalReach) -> u32 {
    if goal.is_reachable() {
        return 0;
    }
    let credit = match state.board.get(EXIT_CELL) {
        None => 1,
        Some(kind) => {
            let tile = tiles.get(kind);
            let exposed = tile.opens(Layer::Top, EXIT_DIRECTION)
                || tile.opens(Layer::Ground, EXIT_DIRECTION);
            u32::from(!exposed)
        }
    };
    manhattan(state.pawn_cell, EXIT_CELL) + credit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{at_exit, one_slide, sealed_pawn};
    use smallvec::smallvec;

    #[test]
    fn test_children_of_one_slide() {
        let puzzle = one_slide();
        let start = puzzle.initial_state();
        let kids = puzzle.children(start);

        assert_eq!(kids.len(), 3);

        assert_eq!(kids[0].state, start.with_pawn(4, Layer::Ground));
        assert_eq!(kids[0].cost, 1);
        assert_eq!(kids[0].step.label(), "p:3->4");

        assert_eq!(kids[1].state, start.with_pawn(1, Layer::Ground));
        assert_eq!(kids[1].cost, 2);
        let path: Path = smallvec![Direction::Right, Direction::Up];
        assert_eq!(
            kids[1].step,
            Move::Relocate {
                from: 3,
                to: 1,
                layer: Layer::Ground,
                cost: 2,
                path
            }
        );

        assert_eq!(
            kids[2].step,
            Move::Slide {
                tile: TileKind::G,
                from: 1,
                to: 0,
                direction: Direction::Left
            }
        );
        assert_eq!(kids[2].cost, 1);
        assert_eq!(kids[2].state.board.blank(), 1);
        assert_eq!(kids[2].state.pawn_cell, 3);
    }

    #[test]
    fn test_pawn_tile_never_slides() {
        let puzzle = one_slide();
        // blank at 0 touches cells 1 and 3; the pawn is on 3
        let slides: Vec<Move> = puzzle
            .children(puzzle.initial_state())
            .into_iter()
            .map(|s| s.step)
            .filter(Move::is_slide)
            .collect();
        assert_eq!(slides.len(), 1);
        assert!(matches!(slides[0], Move::Slide { from: 1, .. }));
    }

    #[test]
    fn test_sealed_pawn_only_slides() {
        let puzzle = sealed_pawn();
        let kids = puzzle.children(puzzle.initial_state());
        // blank in the corner at 8 touches 5 and 7
        assert_eq!(kids.len(), 2);
        assert!(kids.iter().all(|k| k.step.is_slide() && k.cost == 1));
    }

    #[test]
    fn test_relocation_skips_non_holes() {
        let puzzle = at_exit();
        // C and A on the top layer are not holes
        for kid in puzzle.children(puzzle.initial_state()) {
            if let Move::Relocate { to, .. } = kid.step {
                let kind = kid.state.board.get(to).unwrap();
                assert!(puzzle.tiles().get(kind).hole);
            }
        }
    }

    #[test]
    fn test_estimate() {
        let puzzle = at_exit();
        assert_eq!(puzzle.estimate(puzzle.initial_state()), 0);

        // blank exit: distance 1 plus credit
        let puzzle = one_slide();
        assert_eq!(puzzle.estimate(puzzle.initial_state()), 2);

        // A at the exit opens up and right only: distance 2 plus credit
        let puzzle = sealed_pawn();
        assert_eq!(puzzle.estimate(puzzle.initial_state()), 3);
    }

    #[test]
    fn test_estimate_credit_counts_ground_opening() {
        // G at the exit opens left on the ground layer, so no credit
        let puzzle = one_slide();
        let start = puzzle.initial_state();
        let state = State::new(start.board.slide(1), 3, Layer::Top);
        assert_eq!(puzzle.estimate(&state), 1);
    }

    #[test]
    fn test_move_rendering() {
        let slide = Move::Slide {
            tile: TileKind::D,
            from: 3,
            to: 0,
            direction: Direction::Up,
        };
        assert_eq!(slide.to_string(), "◆↑");
        assert_eq!(slide.label(), "t3->0");

        let exit = Move::Exit {
            from: 4,
            cost: 2,
            path: smallvec![Direction::Up, Direction::Left],
        };
        assert_eq!(exit.to_string(), "♔↑←←");
        assert_eq!(exit.cost(), 3);
    }
}
