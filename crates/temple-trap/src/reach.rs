//! Pawn reachability on a fixed board, and the goal test built on it.
//!
//! Stairs are free, lateral steps cost one. The walk is a 0-1 BFS: layer
//! switches go to the front of the deque and steps to the back, so every
//! (cell, layer) pair is settled at its true shortest cost.

use std::collections::VecDeque;

use smallvec::SmallVec;

use crate::board::{neighbors, Board, State, CELL_COUNT, EXIT_CELL, EXIT_DIRECTION};
use crate::puzzle::{Direction, Layer};
use crate::tile::TileTable;

/// Directions walked from the pawn to a reachable pair.
pub type Path = SmallVec<[Direction; 8]>;

/// A reachable (cell, layer) pair with its shortest cost and one shortest walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachRecord {
    pub cell: usize,
    pub layer: Layer,
    pub cost: u32,
    pub path: Path,
}

/// Result of one reachability pass
#[derive(Debug, Clone)]
pub struct Reachability {
    costs: [[Option<u32>; 2]; CELL_COUNT],
    /// Settle order: non-decreasing cost.
    records: Vec<ReachRecord>,
}

impl Reachability {
    pub fn contains(&self, cell: usize, layer: Layer) -> bool {
        self.cost(cell, layer).is_some()
    }

    pub fn cost(&self, cell: usize, layer: Layer) -> Option<u32> {
        self.costs[cell][layer.index()]
    }

    pub fn record(&self, cell: usize, layer: Layer) -> Option<&ReachRecord> {
        self.records
            .iter()
            .find(|r| r.cell == cell && r.layer == layer)
    }

    pub fn records(&self) -> &[ReachRecord] {
        &self.records
    }

    pub fn pairs(&self) -> impl Iterator<Item = (usize, Layer)> + '_ {
        self.records.iter().map(|r| (r.cell, r.layer))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Whether the pawn can step from `cell` into `neighbor` (which lies in
/// `direction`) on `layer`. Both tiles must open towards each other.
pub fn connects(
    tiles: &TileTable,
    board: &Board,
    cell: usize,
    neighbor: usize,
    direction: Direction,
    layer: Layer,
) -> bool {
    let (Some(here), Some(there)) = (board.get(cell), board.get(neighbor)) else {
        return false;
    };
    tiles.get(here).opens(layer, direction) && tiles.get(there).opens(layer, direction.opposite())
}

fn improves(best: &mut [[Option<u32>; 2]; CELL_COUNT], cell: usize, layer: Layer, cost: u32) -> bool {
    let slot = &mut best[cell][layer.index()];
    match *slot {
        Some(known) if known <= cost => false,
        _ => {
            *slot = Some(cost);
            true
        }
    }
}

/// Every (cell, layer) the pawn can walk to without touching the board.
pub fn reachable(tiles: &TileTable, state: &State) -> Reachability {
    assert!(
        state.pawn_cell < CELL_COUNT,
        "pawn cell {} is outside the board",
        state.pawn_cell
    );

    let mut best = [[None; 2]; CELL_COUNT];
    let mut settled = [[false; 2]; CELL_COUNT];
    let mut records = Vec::new();
    let mut queue: VecDeque<(usize, Layer, u32, Path)> = VecDeque::new();

    best[state.pawn_cell][state.pawn_layer.index()] = Some(0);
    queue.push_back((state.pawn_cell, state.pawn_layer, 0, Path::new()));

    while let Some((cell, layer, cost, path)) = queue.pop_front() {
        let slot = layer.index();
        // stale entry: a cheaper route was found after this one was queued
        if settled[cell][slot] || best[cell][slot] != Some(cost) {
            continue;
        }
        settled[cell][slot] = true;

        // a blank cell has no tile to leave from
        let Some(kind) = state.board.get(cell) else {
            records.push(ReachRecord { cell, layer, cost, path });
            continue;
        };
        let tile = tiles.get(kind);

        if tile.stairs && improves(&mut best, cell, layer.other(), cost) {
            queue.push_front((cell, layer.other(), cost, path.clone()));
        }

        for &(neighbor, direction) in neighbors(cell) {
            if !connects(tiles, &state.board, cell, neighbor, direction, layer) {
                continue;
            }
            if improves(&mut best, neighbor, layer, cost + 1) {
                let mut next = path.clone();
                next.push(direction);
                queue.push_back((neighbor, layer, cost + 1, next));
            }
        }

        records.push(ReachRecord { cell, layer, cost, path });
    }

    Reachability {
        costs: best,
        records,
    }
}

/// Outcome of the goal test
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalReach {
    /// The pawn can walk onto the exit tile's top layer at `cost`.
    Reachable { cost: u32, path: Path },
    Unreachable,
}

impl GoalReach {
    pub fn is_reachable(&self) -> bool {
        matches!(self, GoalReach::Reachable { .. })
    }
}

/// Goal test against an already computed reachability pass.
///
/// The exit counts only on the top layer, and only when the exit tile
/// exposes the exit side there.
pub fn goal_from(tiles: &TileTable, board: &Board, reach: &Reachability) -> GoalReach {
    let Some(kind) = board.get(EXIT_CELL) else {
        return GoalReach::Unreachable;
    };
    if !tiles.get(kind).opens(Layer::Top, EXIT_DIRECTION) {
        return GoalReach::Unreachable;
    }
    match reach.record(EXIT_CELL, Layer::Top) {
        Some(record) => GoalReach::Reachable {
            cost: record.cost,
            path: record.path.clone(),
        },
        None => GoalReach::Unreachable,
    }
}

pub fn goal_reachable(tiles: &TileTable, state: &State) -> GoalReach {
    goal_from(tiles, &state.board, &reachable(tiles, state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::children;
    use crate::puzzle::Puzzle;
    use crate::samples::sample_puzzles;
    use crate::test_utils::{at_exit, one_slide, sealed_pawn};
    use smallvec::smallvec;

    /// Initial states of every known puzzle plus two levels of successors.
    fn states_under_test() -> Vec<(Puzzle, State)> {
        let mut puzzles: Vec<Puzzle> = sample_puzzles()
            .iter()
            .map(|c| Puzzle::new(c).unwrap())
            .collect();
        puzzles.extend([at_exit(), sealed_pawn(), one_slide()]);

        let mut out = Vec::new();
        for puzzle in puzzles {
            let start = *puzzle.initial_state();
            out.push((puzzle.clone(), start));
            for child in children(puzzle.tiles(), &start) {
                out.push((puzzle.clone(), child.state));
                for grandchild in children(puzzle.tiles(), &child.state) {
                    out.push((puzzle.clone(), grandchild.state));
                }
            }
        }
        out
    }

    /// Shortest costs by relaxing every edge until nothing changes.
    fn reference_costs(tiles: &TileTable, state: &State) -> [[Option<u32>; 2]; CELL_COUNT] {
        let mut dist = [[None; 2]; CELL_COUNT];
        dist[state.pawn_cell][state.pawn_layer.index()] = Some(0);
        loop {
            let mut changed = false;
            for cell in 0..CELL_COUNT {
                for layer in [Layer::Ground, Layer::Top] {
                    let Some(d) = dist[cell][layer.index()] else {
                        continue;
                    };
                    let Some(kind) = state.board.get(cell) else {
                        continue;
                    };
                    let mut edges = Vec::new();
                    if tiles.get(kind).stairs {
                        edges.push((cell, layer.other(), d));
                    }
                    for &(neighbor, direction) in neighbors(cell) {
                        if connects(tiles, &state.board, cell, neighbor, direction, layer) {
                            edges.push((neighbor, layer, d + 1));
                        }
                    }
                    for (c, l, cost) in edges {
                        let slot = &mut dist[c][l.index()];
                        if slot.map_or(true, |known| cost < known) {
                            *slot = Some(cost);
                            changed = true;
                        }
                    }
                }
            }
            if !changed {
                return dist;
            }
        }
    }

    #[test]
    fn test_start_is_reachable_at_zero_cost() {
        for (puzzle, state) in states_under_test() {
            let reach = reachable(puzzle.tiles(), &state);
            assert_eq!(reach.cost(state.pawn_cell, state.pawn_layer), Some(0));
            assert_eq!(reach.records()[0].cell, state.pawn_cell);
        }
    }

    #[test]
    fn test_costs_are_shortest() {
        for (puzzle, state) in states_under_test() {
            let reach = reachable(puzzle.tiles(), &state);
            let expected = reference_costs(puzzle.tiles(), &state);
            for cell in 0..CELL_COUNT {
                for layer in [Layer::Ground, Layer::Top] {
                    assert_eq!(
                        reach.cost(cell, layer),
                        expected[cell][layer.index()],
                        "cell {cell} {layer} in\n{state}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_records_settle_in_cost_order() {
        for (puzzle, state) in states_under_test() {
            let reach = reachable(puzzle.tiles(), &state);
            let costs: Vec<u32> = reach.records().iter().map(|r| r.cost).collect();
            assert!(costs.windows(2).all(|w| w[0] <= w[1]));
            for record in reach.records() {
                assert_eq!(record.path.len() as u32, record.cost);
            }
        }
    }

    #[test]
    fn test_lateral_edges_are_symmetric() {
        for (puzzle, state) in states_under_test() {
            for cell in 0..CELL_COUNT {
                for &(neighbor, direction) in neighbors(cell) {
                    for layer in [Layer::Ground, Layer::Top] {
                        assert_eq!(
                            connects(puzzle.tiles(), &state.board, cell, neighbor, direction, layer),
                            connects(
                                puzzle.tiles(),
                                &state.board,
                                neighbor,
                                cell,
                                direction.opposite(),
                                layer
                            )
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_walk_through_stairs() {
        let puzzle = one_slide();
        let reach = puzzle.reachable(puzzle.initial_state());
        let records: Vec<(usize, Layer, u32)> = reach
            .records()
            .iter()
            .map(|r| (r.cell, r.layer, r.cost))
            .collect();
        assert_eq!(
            records,
            vec![
                (3, Layer::Top, 0),
                (3, Layer::Ground, 0),
                (4, Layer::Ground, 1),
                (1, Layer::Ground, 2),
            ]
        );
        let expected: Path = smallvec![Direction::Right, Direction::Up];
        assert_eq!(reach.record(1, Layer::Ground).unwrap().path, expected);
        assert!(!reach.contains(0, Layer::Top));
    }

    #[test]
    fn test_sealed_pawn_reaches_only_itself() {
        let puzzle = sealed_pawn();
        let reach = puzzle.reachable(puzzle.initial_state());
        assert_eq!(reach.len(), 1);
        assert!(reach.contains(4, Layer::Ground));
    }

    #[test]
    fn test_blank_cell_is_a_dead_end() {
        let puzzle = one_slide();
        let start = puzzle.initial_state();
        let on_blank = start.with_pawn(start.board.blank(), Layer::Top);
        let reach = puzzle.reachable(&on_blank);
        assert_eq!(reach.len(), 1);
    }

    #[test]
    #[should_panic(expected = "outside the board")]
    fn test_out_of_range_cell_is_a_defect() {
        let puzzle = one_slide();
        let broken = puzzle.initial_state().with_pawn(9, Layer::Top);
        let _ = puzzle.reachable(&broken);
    }

    #[test]
    fn test_goal_at_exit() {
        let puzzle = at_exit();
        assert_eq!(
            puzzle.goal_reachable(puzzle.initial_state()),
            GoalReach::Reachable {
                cost: 0,
                path: Path::new()
            }
        );
    }

    #[test]
    fn test_goal_unreachable_when_exit_blank() {
        let puzzle = one_slide();
        assert_eq!(
            puzzle.goal_reachable(puzzle.initial_state()),
            GoalReach::Unreachable
        );
    }

    #[test]
    fn test_goal_after_slide_climbs_stairs() {
        let puzzle = one_slide();
        let start = puzzle.initial_state();
        // pawn on the hole at 4, D moved up into the exit cell
        let state = State::new(start.board.slide(3), 4, Layer::Ground);
        match puzzle.goal_reachable(&state) {
            GoalReach::Reachable { cost, path } => {
                assert_eq!(cost, 2);
                assert_eq!(path.as_slice(), &[Direction::Up, Direction::Left]);
            }
            GoalReach::Unreachable => panic!("goal should be reachable"),
        }
    }

    #[test]
    fn test_goal_needs_top_exit_opening() {
        // G at the exit only opens on the ground layer
        let puzzle = one_slide();
        let start = puzzle.initial_state();
        let state = State::new(start.board.slide(1), 3, Layer::Top);
        assert_eq!(state.board.get(EXIT_CELL).map(|k| k.symbol()), Some('G'));
        assert!(!puzzle.goal_reachable(&state).is_reachable());
    }
}
