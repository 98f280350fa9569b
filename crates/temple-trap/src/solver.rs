//! Best-first search over puzzle states.
//!
//! The frontier is a min-heap on (estimate, cost, state). In A* mode the
//! estimate is cost plus the heuristic; in uniform mode it is the cost
//! alone, which together with a cost ceiling gives the bounded variant.
//! The best known cost of every state is kept, and a popped node whose
//! cost has since been beaten is dropped without expansion.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::board::State;
use crate::moves::{children_from, estimate, Move};
use crate::puzzle::Puzzle;
use crate::reach::{goal_from, reachable, GoalReach};

/// Ceiling used by the bounded variant unless told otherwise.
pub const DEFAULT_COST_CEILING: u32 = 15;

/// How the frontier is ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Cost so far plus heuristic.
    #[default]
    AStar,
    /// Cost so far only.
    Uniform,
}

/// Configuration for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub mode: SearchMode,
    /// Nodes whose accumulated cost exceeds this are not expanded.
    pub cost_ceiling: Option<u32>,
    /// Maximum time to search
    pub timeout: Option<Duration>,
    /// Maximum number of nodes popped from the frontier
    pub max_expansions: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::AStar,
            cost_ceiling: None,
            timeout: Some(Duration::from_secs(30)),
            max_expansions: None,
        }
    }
}

impl SolverConfig {
    /// Uniform-cost search capped at `DEFAULT_COST_CEILING`.
    pub fn bounded() -> Self {
        Self::bounded_at(DEFAULT_COST_CEILING)
    }

    pub fn bounded_at(ceiling: u32) -> Self {
        Self {
            mode: SearchMode::Uniform,
            cost_ceiling: Some(ceiling),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_expansions(mut self, limit: Option<usize>) -> Self {
        self.max_expansions = limit;
        self
    }
}

/// Why the search stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    Solved,
    /// The frontier ran dry: no solution exists.
    Exhausted,
    /// Every remaining node lies above the cost ceiling.
    CostCeiling,
    TimedOut,
    ExpansionLimit,
}

/// A complete action sequence ending with the exit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub total_cost: u32,
    pub moves: Vec<Move>,
}

impl Solution {
    pub fn labels(&self) -> Vec<String> {
        self.moves.iter().map(Move::label).collect()
    }

    /// Arrow rendering of the whole solution, one group per move.
    pub fn annotation(&self) -> String {
        self.moves
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of the solver search
#[derive(Debug, Clone)]
pub struct SolverResult {
    pub status: SolveStatus,
    pub solution: Option<Solution>,
    /// Nodes popped from the frontier
    pub states_explored: usize,
    /// Popped nodes dropped because a cheaper route was already known
    pub states_discarded: usize,
    /// Children pushed onto the frontier
    pub states_generated: usize,
    pub time_elapsed_ms: u64,
}

impl SolverResult {
    pub fn is_solved(&self) -> bool {
        self.status == SolveStatus::Solved
    }

    pub fn total_cost(&self) -> Option<u32> {
        self.solution.as_ref().map(|s| s.total_cost)
    }
}

/// Append-only history: each node points at the move that produced it.
#[derive(Debug)]
struct Link {
    parent: Option<usize>,
    step: Move,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Node {
    estimate: u32,
    cost: u32,
    state: State,
    link: Option<usize>,
}

fn history(links: &[Link], mut link: Option<usize>) -> Vec<Move> {
    let mut moves = Vec::new();
    while let Some(index) = link {
        moves.push(links[index].step.clone());
        link = links[index].parent;
    }
    moves.reverse();
    moves
}

/// Search for a cheapest way off the board.
pub fn solve(puzzle: &Puzzle, config: &SolverConfig) -> SolverResult {
    let start_time = Instant::now();
    let deadline = config.timeout.map(|t| start_time + t);
    let tiles = puzzle.tiles();
    let initial = *puzzle.initial_state();

    info!(
        event = "solve_start",
        puzzle = puzzle.name().unwrap_or("unnamed"),
        mode = ?config.mode,
        cost_ceiling = ?config.cost_ceiling,
    );

    let priority = |cost: u32, state: &State| match config.mode {
        SearchMode::Uniform => cost,
        SearchMode::AStar => cost + estimate(tiles, state),
    };

    let mut links: Vec<Link> = Vec::new();
    let mut best: HashMap<State, u32> = HashMap::new();
    let mut frontier = BinaryHeap::new();

    best.insert(initial, 0);
    frontier.push(Reverse(Node {
        estimate: priority(0, &initial),
        cost: 0,
        state: initial,
        link: None,
    }));

    let mut states_explored: usize = 0;
    let mut states_discarded: usize = 0;
    let mut states_generated: usize = 0;
    let mut ceiling_hit = false;
    let mut status = SolveStatus::Exhausted;

    while let Some(Reverse(node)) = frontier.pop() {
        if deadline.is_some_and(|d| Instant::now() > d) {
            debug!(event = "timeout", states_explored);
            status = SolveStatus::TimedOut;
            break;
        }
        if config.max_expansions.is_some_and(|limit| states_explored >= limit) {
            debug!(event = "expansion_limit", states_explored);
            status = SolveStatus::ExpansionLimit;
            break;
        }
        if let Some(ceiling) = config.cost_ceiling {
            if node.cost > ceiling {
                ceiling_hit = true;
                if config.mode == SearchMode::Uniform {
                    // costs only grow from here
                    debug!(event = "cost_ceiling", ceiling, states_explored);
                    break;
                }
                continue;
            }
        }
        states_explored += 1;

        let reach = reachable(tiles, &node.state);
        if let GoalReach::Reachable { cost, path } = goal_from(tiles, &node.state.board, &reach) {
            let mut moves = history(&links, node.link);
            moves.push(Move::Exit {
                from: node.state.pawn_cell,
                cost,
                path,
            });
            let solution = Solution {
                total_cost: node.cost + cost + 1,
                moves,
            };
            let time_elapsed_ms = start_time.elapsed().as_millis() as u64;
            info!(
                event = "solve_end",
                status = "solved",
                total_cost = solution.total_cost,
                moves = solution.moves.len(),
                states_explored,
                time_elapsed_ms,
            );
            return SolverResult {
                status: SolveStatus::Solved,
                solution: Some(solution),
                states_explored,
                states_discarded,
                states_generated,
                time_elapsed_ms,
            };
        }

        if best.get(&node.state).is_some_and(|&known| node.cost > known) {
            trace!(event = "discard", cost = node.cost);
            states_discarded += 1;
            continue;
        }
        debug_assert_eq!(best.get(&node.state), Some(&node.cost));

        for child in children_from(tiles, &node.state, &reach) {
            let cost = node.cost + child.cost;
            if best.get(&child.state).is_some_and(|&known| known <= cost) {
                continue;
            }
            best.insert(child.state, cost);
            links.push(Link {
                parent: node.link,
                step: child.step,
            });
            states_generated += 1;
            frontier.push(Reverse(Node {
                estimate: priority(cost, &child.state),
                cost,
                state: child.state,
                link: Some(links.len() - 1),
            }));
        }
    }

    if status == SolveStatus::Exhausted && ceiling_hit {
        status = SolveStatus::CostCeiling;
    }
    let time_elapsed_ms = start_time.elapsed().as_millis() as u64;
    info!(
        event = "solve_end",
        status = ?status,
        states_explored,
        states_generated,
        time_elapsed_ms,
    );

    SolverResult {
        status,
        solution: None,
        states_explored,
        states_discarded,
        states_generated,
        time_elapsed_ms,
    }
}
