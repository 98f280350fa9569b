//! Error types for puzzle construction.
//!
//! Only malformed input is an error. Search outcomes such as "no solution"
//! or "cost ceiling reached" are reported through `SolveStatus`.

use thiserror::Error;

use crate::tile::TileKind;

/// Why a puzzle could not be built
#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("board must have {expected} cells, found {found}")]
    BoardLength { expected: usize, found: usize },

    #[error("board must have exactly one blank cell, found {0}")]
    BlankCount(usize),

    #[error("tile {0} appears more than once")]
    DuplicateTile(TileKind),

    #[error("unknown tile symbol {0:?}")]
    UnknownTile(char),

    #[error("expected {expected} rotations, found {found}")]
    RotationCount { expected: usize, found: usize },

    #[error("rotation {value} at cell {cell} is outside 0..=3")]
    RotationRange { cell: usize, value: u8 },

    #[error("cannot parse rotation {0:?}")]
    BadRotation(String),

    #[error("pawn cell {0} is outside the board")]
    PawnOutOfRange(usize),

    #[error("pawn cell {0} is the blank cell")]
    PawnOnBlank(usize),

    #[error("unknown layer {0:?}, expected \"top\" or \"ground\"")]
    UnknownLayer(String),

    #[error("no puzzle given: pass a file, --stdin, or --board with its options")]
    MissingInput,
}

/// Result type alias for puzzle construction
pub type Result<T> = std::result::Result<T, PuzzleError>;
