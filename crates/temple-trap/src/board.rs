//! Board topology, board contents and search states.

use std::fmt;

use crate::error::{PuzzleError, Result};
use crate::puzzle::{Direction, Layer};
use crate::tile::TileKind;

pub const ROWS: usize = 3;
pub const COLS: usize = 3;
pub const CELL_COUNT: usize = ROWS * COLS;

/// The pawn leaves the board from this cell...
pub const EXIT_CELL: usize = 0;
/// ...through this side of the tile, on the top layer.
pub const EXIT_DIRECTION: Direction = Direction::Left;

/// Neighbors of every cell, with the side of the shared edge as seen from
/// the cell itself. Row-major, cell 0 top-left.
pub const NEIGHBORS: [&[(usize, Direction)]; CELL_COUNT] = [
    &[(1, Direction::Right), (3, Direction::Down)],
    &[(0, Direction::Left), (2, Direction::Right), (4, Direction::Down)],
    &[(1, Direction::Left), (5, Direction::Down)],
    &[(0, Direction::Up), (4, Direction::Right), (6, Direction::Down)],
    &[(1, Direction::Up), (5, Direction::Right), (7, Direction::Down), (3, Direction::Left)],
    &[(2, Direction::Up), (8, Direction::Down), (4, Direction::Left)],
    &[(3, Direction::Up), (7, Direction::Right)],
    &[(4, Direction::Up), (8, Direction::Right), (6, Direction::Left)],
    &[(5, Direction::Up), (7, Direction::Left)],
];

pub fn neighbors(cell: usize) -> &'static [(usize, Direction)] {
    NEIGHBORS[cell]
}

/// Grid distance between two cells.
pub fn manhattan(a: usize, b: usize) -> u32 {
    let (ar, ac) = (a / COLS, a % COLS);
    let (br, bc) = (b / COLS, b % COLS);
    (ar.abs_diff(br) + ac.abs_diff(bc)) as u32
}

/// Cell contents, row-major. Exactly one cell is blank and no tile repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Board {
    cells: [Option<TileKind>; CELL_COUNT],
    blank: usize,
}

impl Board {
    /// Validate cell contents and build a board.
    pub fn from_cells(cells: &[Option<TileKind>]) -> Result<Self> {
        let cells: [Option<TileKind>; CELL_COUNT] =
            cells.try_into().map_err(|_| PuzzleError::BoardLength {
                expected: CELL_COUNT,
                found: cells.len(),
            })?;

        let blanks = cells.iter().filter(|c| c.is_none()).count();
        if blanks != 1 {
            return Err(PuzzleError::BlankCount(blanks));
        }

        let mut seen = [false; TileKind::COUNT];
        for kind in cells.iter().flatten() {
            if seen[kind.index()] {
                return Err(PuzzleError::DuplicateTile(*kind));
            }
            seen[kind.index()] = true;
        }

        let blank = cells.iter().position(Option::is_none).unwrap_or_default();
        Ok(Self { cells, blank })
    }

    pub fn get(&self, cell: usize) -> Option<TileKind> {
        self.cells[cell]
    }

    pub fn blank(&self) -> usize {
        self.blank
    }

    pub fn cells(&self) -> &[Option<TileKind>; CELL_COUNT] {
        &self.cells
    }

    /// Move the tile at `from` into the blank, which must be adjacent.
    pub fn slide(&self, from: usize) -> Board {
        debug_assert!(neighbors(self.blank).iter().any(|(n, _)| *n == from));
        let mut cells = self.cells;
        cells[self.blank] = cells[from].take();
        Board { cells, blank: from }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            let line: Vec<String> = (0..COLS)
                .map(|col| match self.cells[row * COLS + col] {
                    Some(kind) => kind.to_string(),
                    None => ".".to_string(),
                })
                .collect();
            if row + 1 < ROWS {
                writeln!(f, "{}", line.join(" "))?;
            } else {
                write!(f, "{}", line.join(" "))?;
            }
        }
        Ok(())
    }
}

/// One search state. Compared, hashed and ordered by value; the derived
/// ordering (pawn cell, pawn layer, board) is the frontier tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State {
    pub pawn_cell: usize,
    pub pawn_layer: Layer,
    pub board: Board,
}

impl State {
    pub fn new(board: Board, pawn_cell: usize, pawn_layer: Layer) -> Self {
        Self {
            pawn_cell,
            pawn_layer,
            board,
        }
    }

    pub fn with_pawn(&self, cell: usize, layer: Layer) -> Self {
        Self::new(self.board, cell, layer)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        write!(f, "pawn: cell {} ({})", self.pawn_cell, self.pawn_layer)
    }
}
