//! Puzzle description types and instance construction.
//!
//! `PuzzleConfig` is the serde-facing description read from JSON or built
//! from command-line arguments. `Puzzle` is the validated instance: it owns
//! the rotated tile table and the initial state, and every search runs
//! against it read-only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Board, State, CELL_COUNT};
use crate::error::{PuzzleError, Result};
use crate::moves::{self, Successor};
use crate::reach::{self, GoalReach, Reachability};
use crate::solver::{self, SolverConfig, SolverResult};
use crate::tile::{TileKind, TileTable};

/// Compass direction, numbered 1..=4 clockwise from up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// 1-based code, clockwise from up = 1.
    pub fn code(self) -> u8 {
        self as u8 + 1
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Remap by `rotation` quarter turns (counter-clockwise).
    pub fn rotated(self, rotation: u8) -> Direction {
        let shift = (rotation % 4) as usize;
        Direction::ALL[(self.index() + 4 - shift) % 4]
    }

    pub fn arrow(self) -> char {
        match self {
            Direction::Up => '↑',
            Direction::Right => '→',
            Direction::Down => '↓',
            Direction::Left => '←',
        }
    }
}

/// Vertical plane the pawn walks on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Ground,
    Top,
}

impl Layer {
    pub fn other(self) -> Layer {
        match self {
            Layer::Ground => Layer::Top,
            Layer::Top => Layer::Ground,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Ground => write!(f, "ground"),
            Layer::Top => write!(f, "top"),
        }
    }
}

impl FromStr for Layer {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" | "t" => Ok(Layer::Top),
            "ground" | "g" => Ok(Layer::Ground),
            other => Err(PuzzleError::UnknownLayer(other.to_string())),
        }
    }
}

/// Pawn starting position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PawnStart {
    pub cell: usize,
    pub layer: Layer,
}

/// A puzzle as supplied by the caller: board, rotations and pawn start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Row-major cells; `null` marks the blank.
    pub board: Vec<Option<TileKind>>,
    /// Quarter turns applied to the tile starting in each cell.
    pub rotations: Vec<u8>,
    pub pawn: PawnStart,
}

impl PuzzleConfig {
    pub fn new(board: Vec<Option<TileKind>>, rotations: Vec<u8>, cell: usize, layer: Layer) -> Self {
        Self {
            name: None,
            board,
            rotations,
            pawn: PawnStart { cell, layer },
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Build a config from the compact command-line form, e.g.
    /// `"CDGB.HAEF"` and `"002301002"` or `"0,0,2,3,0,1,0,0,2"`.
    pub fn from_compact(board: &str, rotations: &str, cell: usize, layer: Layer) -> Result<Self> {
        Ok(Self::new(parse_board(board)?, parse_rotations(rotations)?, cell, layer))
    }
}

/// Parse a board string: one symbol per cell, `.`, `_` or space for the blank.
pub fn parse_board(s: &str) -> Result<Vec<Option<TileKind>>> {
    s.chars()
        .filter(|c| *c != ',' && *c != '\n')
        .map(|c| match c {
            '.' | '_' | ' ' => Ok(None),
            _ => TileKind::from_symbol(c)
                .map(Some)
                .ok_or(PuzzleError::UnknownTile(c)),
        })
        .collect()
}

/// Parse rotations either as a comma list or as a run of digits.
pub fn parse_rotations(s: &str) -> Result<Vec<u8>> {
    let s = s.trim();
    if s.contains(',') {
        s.split(',')
            .map(|part| {
                part.trim()
                    .parse::<u8>()
                    .map_err(|_| PuzzleError::BadRotation(part.trim().to_string()))
            })
            .collect()
    } else {
        s.chars()
            .map(|c| {
                c.to_digit(10)
                    .map(|d| d as u8)
                    .ok_or_else(|| PuzzleError::BadRotation(c.to_string()))
            })
            .collect()
    }
}

/// A validated puzzle instance.
#[derive(Debug, Clone)]
pub struct Puzzle {
    name: Option<String>,
    tiles: TileTable,
    initial: State,
}

impl Puzzle {
    /// Validate a config and build its rotated tile table.
    ///
    /// Every malformed input is rejected here, before any search starts.
    pub fn new(config: &PuzzleConfig) -> Result<Self> {
        if config.board.len() != CELL_COUNT {
            return Err(PuzzleError::BoardLength {
                expected: CELL_COUNT,
                found: config.board.len(),
            });
        }
        if config.rotations.len() != config.board.len() {
            return Err(PuzzleError::RotationCount {
                expected: config.board.len(),
                found: config.rotations.len(),
            });
        }
        let board = Board::from_cells(&config.board)?;

        for (cell, &value) in config.rotations.iter().enumerate() {
            if value > 3 {
                return Err(PuzzleError::RotationRange { cell, value });
            }
        }

        let PawnStart { cell, layer } = config.pawn;
        if cell >= CELL_COUNT {
            return Err(PuzzleError::PawnOutOfRange(cell));
        }
        if board.get(cell).is_none() {
            return Err(PuzzleError::PawnOnBlank(cell));
        }

        Ok(Self {
            name: config.name.clone(),
            tiles: TileTable::from_cells(&config.board, &config.rotations),
            initial: State::new(board, cell, layer),
        })
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Self::new(&PuzzleConfig::from_json_str(s)?)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn tiles(&self) -> &TileTable {
        &self.tiles
    }

    pub fn initial_state(&self) -> &State {
        &self.initial
    }

    pub fn reachable(&self, state: &State) -> Reachability {
        reach::reachable(&self.tiles, state)
    }

    pub fn goal_reachable(&self, state: &State) -> GoalReach {
        reach::goal_reachable(&self.tiles, state)
    }

    pub fn children(&self, state: &State) -> Vec<Successor> {
        moves::children(&self.tiles, state)
    }

    pub fn estimate(&self, state: &State) -> u32 {
        moves::estimate(&self.tiles, state)
    }

    pub fn solve(&self, config: &SolverConfig) -> SolverResult {
        solver::solve(self, config)
    }
}
