//! Tile catalog and per-instance rotation.
//!
//! The game ships eight tiles. Each exposes openings on the top layer,
//! the ground layer, or both; hole tiles can be stood on and stairs let
//! the pawn change layer without leaving the cell.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::puzzle::{Direction, Layer};

/// A set of directions, one bit per direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Openings(u8);

impl Openings {
    pub const NONE: Openings = Openings(0);

    pub const fn of(directions: &[Direction]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < directions.len() {
            bits |= 1 << directions[i].index();
            i += 1;
        }
        Openings(bits)
    }

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & (1 << direction.index()) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Remap every direction by `rotation` quarter turns.
    pub fn rotated(self, rotation: u8) -> Self {
        let mut out = Openings::NONE;
        for direction in self.iter() {
            out.0 |= 1 << direction.rotated(rotation).index();
        }
        out
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

/// The eight tile archetypes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum TileKind {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl TileKind {
    pub const COUNT: usize = 8;

    pub const ALL: [TileKind; TileKind::COUNT] = [
        TileKind::A,
        TileKind::B,
        TileKind::C,
        TileKind::D,
        TileKind::E,
        TileKind::F,
        TileKind::G,
        TileKind::H,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse a single-letter tile identifier (case-insensitive).
    pub fn from_symbol(symbol: char) -> Option<TileKind> {
        match symbol.to_ascii_uppercase() {
            'A' => Some(TileKind::A),
            'B' => Some(TileKind::B),
            'C' => Some(TileKind::C),
            'D' => Some(TileKind::D),
            'E' => Some(TileKind::E),
            'F' => Some(TileKind::F),
            'G' => Some(TileKind::G),
            'H' => Some(TileKind::H),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            TileKind::A => 'A',
            TileKind::B => 'B',
            TileKind::C => 'C',
            TileKind::D => 'D',
            TileKind::E => 'E',
            TileKind::F => 'F',
            TileKind::G => 'G',
            TileKind::H => 'H',
        }
    }

    /// Glyph used in move annotations.
    pub fn glyph(self) -> &'static str {
        match self {
            TileKind::A => "=",
            TileKind::B => "◽️",
            TileKind::C => "+",
            TileKind::D => "◆",
            TileKind::E => "*",
            TileKind::F => "▷",
            TileKind::G => "x",
            TileKind::H => "⚪️",
        }
    }

    /// The unrotated archetype.
    pub fn spec(self) -> &'static TileSpec {
        &CATALOG[self.index()]
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Openings and flags of a tile, either as catalogued or after rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpec {
    pub kind: TileKind,
    pub top: Openings,
    pub ground: Openings,
    pub hole: bool,
    pub stairs: bool,
}

impl TileSpec {
    pub fn openings(&self, layer: Layer) -> Openings {
        match layer {
            Layer::Top => self.top,
            Layer::Ground => self.ground,
        }
    }

    pub fn opens(&self, layer: Layer, direction: Direction) -> bool {
        self.openings(layer).contains(direction)
    }

    pub fn rotated(&self, rotation: u8) -> TileSpec {
        TileSpec {
            top: self.top.rotated(rotation),
            ground: self.ground.rotated(rotation),
            ..*self
        }
    }
}

const fn tile(
    kind: TileKind,
    top: &[Direction],
    ground: &[Direction],
    hole: bool,
    stairs: bool,
) -> TileSpec {
    TileSpec {
        kind,
        top: Openings::of(top),
        ground: Openings::of(ground),
        hole,
        stairs,
    }
}

use Direction::{Left, Right, Up};

/// Unrotated archetypes, indexed by `TileKind::index`.
pub static CATALOG: [TileSpec; TileKind::COUNT] = [
    tile(TileKind::A, &[Up, Right], &[], false, false),
    tile(TileKind::B, &[Up, Right], &[], false, false),
    tile(TileKind::C, &[Right, Left], &[], false, false),
    tile(TileKind::D, &[Left], &[Right], true, true),
    tile(TileKind::E, &[Left], &[Right], true, true),
    tile(TileKind::F, &[], &[Up, Right], true, false),
    tile(TileKind::G, &[], &[Up, Right], true, false),
    tile(TileKind::H, &[], &[Up, Right], true, false),
];

/// Rotated variant of every tile for one puzzle instance.
///
/// Built once when the puzzle is constructed and never mutated; a rotation
/// belongs to the tile and travels with it when it slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileTable {
    tiles: [TileSpec; TileKind::COUNT],
    rotations: [u8; TileKind::COUNT],
}

impl TileTable {
    /// Every tile in its catalog orientation.
    pub fn unrotated() -> Self {
        Self {
            tiles: CATALOG,
            rotations: [0; TileKind::COUNT],
        }
    }

    /// Build the table from a board and its per-cell rotations.
    ///
    /// Callers validate lengths and ranges first; blank cells are skipped.
    pub fn from_cells(cells: &[Option<TileKind>], rotations: &[u8]) -> Self {
        let mut table = Self::unrotated();
        for (cell, rotation) in cells.iter().zip(rotations) {
            if let Some(kind) = cell {
                table.tiles[kind.index()] = kind.spec().rotated(*rotation);
                table.rotations[kind.index()] = *rotation % 4;
            }
        }
        table
    }

    pub fn get(&self, kind: TileKind) -> &TileSpec {
        &self.tiles[kind.index()]
    }

    pub fn rotation(&self, kind: TileKind) -> u8 {
        self.rotations[kind.index()]
    }
}
