//! Built-in sample puzzles, used by the `demo` subcommand.
//!
//! Boards are written row-major, one letter per tile and `.` for the blank.
//! Rotations are quarter turns of the tile in the matching cell.

use serde::Serialize;

use crate::puzzle::{Layer, PuzzleConfig};
use crate::tile::TileKind;

/// Rough difficulty band of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

struct Sample {
    difficulty: Difficulty,
    board: &'static [u8; 9],
    rotations: [u8; 9],
    cell: usize,
    layer: Layer,
}

const fn sample(
    difficulty: Difficulty,
    board: &'static [u8; 9],
    rotations: [u8; 9],
    cell: usize,
    layer: Layer,
) -> Sample {
    Sample {
        difficulty,
        board,
        rotations,
        cell,
        layer,
    }
}

use Difficulty::{Easy, Hard, Medium};
use Layer::{Ground, Top};

static SAMPLES: [Sample; 14] = [
    sample(Easy, b"CDGB.HAEF", [0, 0, 2, 3, 0, 1, 0, 0, 2], 8, Ground),
    sample(Easy, b"AEGB.DHCF", [2, 1, 0, 0, 0, 0, 0, 2, 2], 1, Top),
    sample(Easy, b"GEBDHFA.C", [2, 3, 1, 0, 1, 0, 0, 0, 3], 1, Ground),
    sample(Easy, b"BDHEGF.AC", [3, 0, 2, 3, 0, 1, 0, 0, 0], 3, Ground),
    sample(Medium, b"GFEABCH.D", [2, 3, 1, 2, 3, 3, 0, 0, 3], 6, Ground),
    sample(Medium, b"CEGF.DHBA", [0, 0, 3, 0, 0, 2, 0, 1, 3], 5, Top),
    sample(Medium, b"CABDEG.FH", [3, 0, 2, 2, 0, 2, 0, 2, 3], 3, Top),
    sample(Medium, b"GHCB.DAEF", [2, 0, 3, 3, 0, 0, 0, 0, 2], 7, Top),
    sample(Hard, b"DBCGFAHE.", [3, 2, 3, 0, 2, 1, 1, 1, 0], 0, Top),
    sample(Hard, b"BADCFG.HE", [2, 0, 3, 0, 2, 3, 0, 1, 1], 4, Ground),
    sample(Hard, b"CA.BHDEGF", [3, 2, 0, 0, 3, 2, 0, 0, 2], 5, Ground),
    sample(Hard, b"BDFAEGHC.", [3, 0, 2, 0, 0, 2, 0, 3, 0], 5, Ground),
    sample(Hard, b"EBG.CHFAD", [2, 2, 2, 0, 3, 2, 2, 0, 0], 8, Top),
    sample(Hard, b"FGB.HEDCA", [3, 2, 2, 0, 0, 2, 2, 0, 1], 0, Ground),
];

/// Every sample, named `<difficulty>-<n>` and numbered within its band.
pub fn sample_puzzles() -> Vec<PuzzleConfig> {
    let mut counts = [0usize; 3];
    SAMPLES
        .iter()
        .map(|s| {
            let count = &mut counts[s.difficulty as usize];
            *count += 1;
            // '.' is not a tile symbol, so it maps to the blank
            let board = s
                .board
                .iter()
                .map(|&b| TileKind::from_symbol(b as char))
                .collect();
            PuzzleConfig::new(board, s.rotations.to_vec(), s.cell, s.layer)
                .with_name(format!("{}-{}", s.difficulty.label(), count))
        })
        .collect()
}

/// Samples in one difficulty band.
pub fn samples_in(difficulty: Difficulty) -> Vec<PuzzleConfig> {
    let prefix = format!("{}-", difficulty.label());
    sample_puzzles()
        .into_iter()
        .filter(|config| {
            config
                .name
                .as_deref()
                .is_some_and(|name| name.starts_with(&prefix))
        })
        .collect()
}

/// Look up a sample by its name.
pub fn sample_by_name(name: &str) -> Option<PuzzleConfig> {
    sample_puzzles()
        .into_iter()
        .find(|config| config.name.as_deref() == Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Puzzle;

    #[test]
    fn test_samples_are_valid() {
        let samples = sample_puzzles();
        assert_eq!(samples.len(), 14);
        for config in &samples {
            assert!(Puzzle::new(config).is_ok(), "{:?}", config.name);
        }
    }

    #[test]
    fn test_sample_names_follow_bands() {
        assert_eq!(samples_in(Difficulty::Easy).len(), 4);
        assert_eq!(samples_in(Difficulty::Medium).len(), 4);
        assert_eq!(samples_in(Difficulty::Hard).len(), 6);
        assert!(sample_by_name("medium-4").is_some());
        assert!(sample_by_name("hard-6").is_some());
        assert!(sample_by_name("hard-7").is_none());
    }

    #[test]
    fn test_sample_by_name() {
        let config = sample_by_name("easy-2").unwrap();
        assert_eq!(config.pawn.cell, 1);
        assert_eq!(config.pawn.layer, Layer::Top);
    }

    #[test]
    fn test_first_sample_matches_json_form() {
        let json = r#"{
            "name": "easy-1",
            "board": ["C", "D", "G", "B", null, "H", "A", "E", "F"],
            "rotations": [0, 0, 2, 3, 0, 1, 0, 0, 2],
            "pawn": { "cell": 8, "layer": "ground" }
        }"#;
        let parsed = PuzzleConfig::from_json_str(json).unwrap();
        assert_eq!(parsed, sample_puzzles()[0]);
    }
}
