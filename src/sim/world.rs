/// WorldState: the complete snapshot of a running level.
///
/// ## Tile Architecture
///
/// Two tile layers:
///   - `base_tiles`: the level as loaded. **Never mutated** after load.
///   - `tiles`:      the live grid the rules and gravity operate on.
///
/// All tile mutations go through `set_tile()`, `relocate_player()` and
/// `clear_all_of_kind()`. `restart()` resets `tiles = base_tiles.clone()`.
///
/// ## Player invariant
///
/// Exactly one `Tile::Player` cell exists, and `player` always points at it.
/// `relocate_player()` clears the old cell and marks the new one in a single
/// call, so no caller can observe zero or two markers.

use crate::domain::rules::MapView;
use crate::domain::tile::Tile;
use super::level::LevelError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PlayerPos {
    pub x: usize,
    pub y: usize,
}

#[derive(Clone, Debug)]
pub struct WorldState {
    // ── Tile layers ──
    /// Original level data. Never mutated after construction.
    pub base_tiles: Vec<Vec<Tile>>,
    /// Live grid.
    pub tiles: Vec<Vec<Tile>>,
    pub width: usize,
    pub height: usize,

    // ── Player ──
    /// Cached position of the single Player cell.
    pub player: PlayerPos,
    pub player_spawn: PlayerPos,

    // ── Meta ──
    pub level_index: usize,
    pub level_name: String,
    pub tick: u64,
}

// ── Construction ──

impl WorldState {
    /// Build a world from decoded rows. Rows must be non-empty, rectangular,
    /// and contain exactly one Player cell.
    pub fn from_tiles(rows: Vec<Vec<Tile>>) -> Result<Self, LevelError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(LevelError::Empty);
        }

        let mut players = vec![];
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(LevelError::Ragged { row: y, expected: width, found: row.len() });
            }
            for (x, tile) in row.iter().enumerate() {
                if *tile == Tile::Player {
                    players.push(PlayerPos { x, y });
                }
            }
        }
        if players.len() != 1 {
            return Err(LevelError::PlayerCount(players.len()));
        }
        let player = players[0];

        Ok(WorldState {
            base_tiles: rows.clone(),
            tiles: rows,
            width,
            height,
            player,
            player_spawn: player,
            level_index: 0,
            level_name: String::new(),
            tick: 0,
        })
    }

    /// Build a world from a literal array of integer tile codes.
    pub fn from_codes<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, LevelError> {
        let mut decoded = Vec::with_capacity(rows.len());
        for (y, row) in rows.iter().enumerate() {
            let mut out = Vec::with_capacity(row.as_ref().len());
            for (x, &code) in row.as_ref().iter().enumerate() {
                let tile = Tile::from_code(code).ok_or(LevelError::UnknownCode { x, y, code })?;
                out.push(tile);
            }
            decoded.push(out);
        }
        Self::from_tiles(decoded)
    }

    /// Put the level back the way it was loaded.
    pub fn restart(&mut self) {
        self.tiles = self.base_tiles.clone();
        self.player = self.player_spawn;
        self.tick = 0;
    }
}

// ── Tile query / mutation API ──

impl WorldState {
    /// Tile at (x, y). Out of bounds reads as a wall.
    #[inline]
    pub fn tile_at(&self, x: usize, y: usize) -> Tile {
        if x < self.width && y < self.height {
            self.tiles[y][x]
        } else {
            Tile::Unbreakable
        }
    }

    /// Overwrite a cell. Out of bounds writes are ignored.
    #[inline]
    pub fn set_tile(&mut self, x: usize, y: usize, tile: Tile) {
        if x < self.width && y < self.height {
            self.tiles[y][x] = tile;
        }
    }

    /// Move the player marker to (x, y). The caller has already decided the
    /// destination is legal.
    pub fn relocate_player(&mut self, x: usize, y: usize) {
        debug_assert!(x < self.width && y < self.height, "player moved off-grid to ({x}, {y})");
        if x >= self.width || y >= self.height {
            return;
        }
        let old = self.player;
        self.tiles[old.y][old.x] = Tile::Air;
        self.tiles[y][x] = Tile::Player;
        self.player = PlayerPos { x, y };
    }

    /// Replace every `tile` with Air. Returns the number of cells cleared.
    pub fn clear_all_of_kind(&mut self, tile: Tile) -> usize {
        let mut cleared = 0;
        for row in &mut self.tiles {
            for cell in row.iter_mut().filter(|c| **c == tile) {
                *cell = Tile::Air;
                cleared += 1;
            }
        }
        cleared
    }

    #[allow(dead_code)]
    pub fn count_of(&self, tile: Tile) -> usize {
        self.tiles.iter().flatten().filter(|t| **t == tile).count()
    }

    /// Read-only view for the rule functions.
    pub fn map_view(&self) -> MapView<'_> {
        MapView { tiles: &self.tiles, width: self.width, height: self.height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::fixtures::world_from;

    #[test]
    fn from_codes_finds_player() {
        let w = WorldState::from_codes(&[
            [2u8, 2, 2, 2],
            [2, 0, 3, 2],
            [2, 2, 2, 2],
        ]).unwrap();
        assert_eq!((w.width, w.height), (4, 3));
        assert_eq!(w.player, PlayerPos { x: 2, y: 1 });
        assert_eq!(w.tile_at(2, 1), Tile::Player);
    }

    #[test]
    fn from_codes_rejects_bad_input() {
        let empty: [&[u8]; 0] = [];
        assert_eq!(WorldState::from_codes(&empty).unwrap_err(), LevelError::Empty);

        let ragged: [&[u8]; 2] = [&[3, 0, 0], &[2, 2]];
        assert_eq!(
            WorldState::from_codes(&ragged).unwrap_err(),
            LevelError::Ragged { row: 1, expected: 3, found: 2 },
        );

        let unknown: [&[u8]; 1] = [&[3, 0, 42]];
        assert_eq!(
            WorldState::from_codes(&unknown).unwrap_err(),
            LevelError::UnknownCode { x: 2, y: 0, code: 42 },
        );

        let none: [&[u8]; 1] = [&[0, 0]];
        assert_eq!(WorldState::from_codes(&none).unwrap_err(), LevelError::PlayerCount(0));

        let two: [&[u8]; 1] = [&[3, 3]];
        assert_eq!(WorldState::from_codes(&two).unwrap_err(), LevelError::PlayerCount(2));
    }

    #[test]
    fn out_of_bounds_is_wall_and_writes_ignored() {
        let mut w = world_from(&["P "]);
        assert_eq!(w.tile_at(2, 0), Tile::Unbreakable);
        assert_eq!(w.tile_at(0, 1), Tile::Unbreakable);
        w.set_tile(5, 5, Tile::Stone);
        assert_eq!(w.tiles, vec![vec![Tile::Player, Tile::Air]]);
    }

    #[test]
    fn relocate_keeps_single_marker() {
        let mut w = world_from(&["P.."]);
        w.relocate_player(2, 0);
        assert_eq!(w.tiles, vec![vec![Tile::Air, Tile::Flux, Tile::Player]]);
        assert_eq!(w.player, PlayerPos { x: 2, y: 0 });
        assert_eq!(w.count_of(Tile::Player), 1);
    }

    #[test]
    fn clear_all_of_kind_scans_whole_grid() {
        let mut w = world_from(&[
            "l  L",
            " P l",
            "llLk",
        ]);
        assert_eq!(w.clear_all_of_kind(Tile::Lock1), 4);
        assert_eq!(w.count_of(Tile::Lock1), 0);
        assert_eq!(w.count_of(Tile::Lock2), 2);
        assert_eq!(w.count_of(Tile::Key1), 1);
        assert_eq!(w.clear_all_of_kind(Tile::Lock1), 0);
    }

    #[test]
    fn restart_restores_base_layer() {
        let mut w = world_from(&["Pk l"]);
        w.clear_all_of_kind(Tile::Lock1);
        w.relocate_player(1, 0);
        w.tick = 9;
        w.restart();
        assert_eq!(w.tiles, w.base_tiles);
        assert_eq!(w.player, PlayerPos { x: 0, y: 0 });
        assert_eq!(w.tick, 0);
    }
}
