/// Built-in levels.
///
/// Levels are literal arrays of tile codes (see `Tile` for the code order),
/// compiled into the binary. There is no level file format.
///
/// A playable level must be rectangular, hold exactly one player, and be
/// ringed by Unbreakable cells so no rule ever looks past the edge.

use std::fmt;

use crate::domain::tile::Tile;
use super::world::WorldState;

pub struct LevelDef {
    pub name: &'static str,
    pub codes: &'static [&'static [u8]],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LevelError {
    Empty,
    Ragged { row: usize, expected: usize, found: usize },
    UnknownCode { x: usize, y: usize, code: u8 },
    PlayerCount(usize),
    OpenBorder { x: usize, y: usize },
    NoSuchLevel(usize),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Empty => write!(f, "level has no cells"),
            LevelError::Ragged { row, expected, found } => {
                write!(f, "row {row} has {found} cells, expected {expected}")
            }
            LevelError::UnknownCode { x, y, code } => {
                write!(f, "unknown tile code {code} at ({x}, {y})")
            }
            LevelError::PlayerCount(n) => write!(f, "level needs exactly one player, found {n}"),
            LevelError::OpenBorder { x, y } => {
                write!(f, "border cell ({x}, {y}) is not Unbreakable")
            }
            LevelError::NoSuchLevel(i) => {
                write!(f, "no built-in level {i} (have {})", LEVELS.len())
            }
        }
    }
}

impl std::error::Error for LevelError {}

// ══════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════

/// Build a fresh world for built-in level `index`.
pub fn load_level(index: usize) -> Result<WorldState, LevelError> {
    let def = LEVELS.get(index).ok_or(LevelError::NoSuchLevel(index))?;
    let mut world = WorldState::from_codes(def.codes)?;
    check_border(&world)?;
    world.level_index = index;
    world.level_name = def.name.to_string();
    log::info!(
        "loaded level {} \"{}\" ({}x{}), player at ({}, {})",
        index, def.name, world.width, world.height, world.player.x, world.player.y,
    );
    Ok(world)
}

#[allow(dead_code)]
pub fn level_count() -> usize {
    LEVELS.len()
}

/// Every edge cell must be a wall.
fn check_border(world: &WorldState) -> Result<(), LevelError> {
    let (w, h) = (world.width, world.height);
    let edge = (0..w).flat_map(|x| [(x, 0), (x, h - 1)])
        .chain((0..h).flat_map(|y| [(0, y), (w - 1, y)]));
    for (x, y) in edge {
        if world.tile_at(x, y) != Tile::Unbreakable {
            return Err(LevelError::OpenBorder { x, y });
        }
    }
    Ok(())
}

// ══════════════════════════════════════════════════════════════
// Embedded levels
// ══════════════════════════════════════════════════════════════

pub const LEVELS: &[LevelDef] = &[
    LevelDef {
        name: "First Key",
        codes: &[
            &[2, 2, 2, 2, 2, 2, 2, 2],
            &[2, 3, 0, 1, 1, 2, 0, 2],
            &[2, 4, 2, 6, 1, 2, 0, 2],
            &[2, 8, 4, 1, 1, 2, 0, 2],
            &[2, 4, 1, 1, 1, 9, 0, 2],
            &[2, 2, 2, 2, 2, 2, 2, 2],
        ],
    },
    LevelDef {
        name: "Stone Drop",
        codes: &[
            &[2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
            &[2, 3, 1, 1, 4, 0, 0, 0, 6, 2],
            &[2, 2, 2, 1, 2, 0, 0, 0, 2, 2],
            &[2, 0, 0, 1, 11, 0, 0, 0, 0, 2],
            &[2, 10, 1, 1, 2, 4, 0, 6, 0, 2],
            &[2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
        ],
    },
    LevelDef {
        name: "Gatehouse",
        codes: &[
            &[2, 2, 2, 2, 2, 2, 2, 2, 2],
            &[2, 8, 1, 9, 0, 11, 0, 10, 2],
            &[2, 2, 1, 2, 6, 2, 0, 2, 2],
            &[2, 3, 1, 1, 1, 1, 1, 9, 2],
            &[2, 2, 2, 2, 2, 2, 2, 2, 2],
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::fixtures::world_from;
    use crate::sim::world::PlayerPos;

    #[test]
    fn every_builtin_level_loads() {
        for i in 0..level_count() {
            let w = load_level(i).unwrap_or_else(|e| panic!("level {i}: {e}"));
            assert_eq!(w.level_index, i);
            assert_eq!(w.count_of(Tile::Player), 1);
            assert!(!w.level_name.is_empty());
        }
    }

    #[test]
    fn first_level_layout() {
        let w = load_level(0).unwrap();
        assert_eq!((w.width, w.height), (8, 6));
        assert_eq!(w.player, PlayerPos { x: 1, y: 1 });
        assert_eq!(w.tile_at(1, 3), Tile::Key1);
        assert_eq!(w.tile_at(5, 4), Tile::Lock1);
        assert_eq!(w.tile_at(3, 2), Tile::Box);
    }

    #[test]
    fn missing_level_is_an_error() {
        let err = load_level(level_count()).unwrap_err();
        assert_eq!(err, LevelError::NoSuchLevel(level_count()));
        assert!(err.to_string().contains("no built-in level"));
    }

    #[test]
    fn border_check_reports_first_gap() {
        let w = world_from(&[
            "####",
            "#P  ",
            "####",
        ]);
        assert_eq!(check_border(&w), Err(LevelError::OpenBorder { x: 3, y: 1 }));

        let sealed = world_from(&[
            "###",
            "#P#",
            "###",
        ]);
        assert_eq!(check_border(&sealed), Ok(()));
    }

    #[test]
    fn errors_read_well() {
        assert_eq!(
            LevelError::Ragged { row: 2, expected: 8, found: 7 }.to_string(),
            "row 2 has 7 cells, expected 8",
        );
        assert_eq!(
            LevelError::UnknownCode { x: 1, y: 0, code: 99 }.to_string(),
            "unknown tile code 99 at (1, 0)",
        );
    }
}
