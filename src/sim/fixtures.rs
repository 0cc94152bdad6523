//! Test helpers: build grids from string diagrams.
//!
//! Legend:  ' '=Air  '.'=Flux  '#'=Unbreakable  'P'=Player
//!          's'=Stone  'S'=FallingStone  'x'=Box  'X'=FallingBox
//!          'k'=Key1  'l'=Lock1  'K'=Key2  'L'=Lock2

use crate::domain::tile::Tile;
use super::world::WorldState;

pub fn tile_from_glyph(ch: char) -> Tile {
    match ch {
        ' ' => Tile::Air,
        '.' => Tile::Flux,
        '#' => Tile::Unbreakable,
        'P' => Tile::Player,
        's' => Tile::Stone,
        'S' => Tile::FallingStone,
        'x' => Tile::Box,
        'X' => Tile::FallingBox,
        'k' => Tile::Key1,
        'l' => Tile::Lock1,
        'K' => Tile::Key2,
        'L' => Tile::Lock2,
        other => panic!("unknown fixture glyph {other:?}"),
    }
}

pub fn tiles_from(rows: &[&str]) -> Vec<Vec<Tile>> {
    rows.iter()
        .map(|row| row.chars().map(tile_from_glyph).collect())
        .collect()
}

pub fn world_from(rows: &[&str]) -> WorldState {
    WorldState::from_tiles(tiles_from(rows)).expect("fixture must be a valid level")
}

/// Render the live grid back into diagram form, for readable assertions.
pub fn diagram(world: &WorldState) -> Vec<String> {
    world.tiles.iter()
        .map(|row| row.iter().map(|t| glyph_of(*t)).collect())
        .collect()
}

fn glyph_of(tile: Tile) -> char {
    match tile {
        Tile::Air => ' ',
        Tile::Flux => '.',
        Tile::Unbreakable => '#',
        Tile::Player => 'P',
        Tile::Stone => 's',
        Tile::FallingStone => 'S',
        Tile::Box => 'x',
        Tile::FallingBox => 'X',
        Tile::Key1 => 'k',
        Tile::Lock1 => 'l',
        Tile::Key2 => 'K',
        Tile::Lock2 => 'L',
    }
}
