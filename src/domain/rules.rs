/// Movement rules, truth-table driven.
///
/// Pure functions over an immutable map view. They decide *what* a move
/// does; `sim::step` performs it on the world.
///
/// ## Horizontal (Left / Right)
/// ┌──────────────────────────────────────────┬──────────┐
/// │ Condition (priority order)                │ Outcome  │
/// ├──────────────────────────────────────────┼──────────┤
/// │ target is Air or Flux                     │ Step     │
/// │ target is Stone/Box, beyond is Air,       │ Push     │
/// │   cell under target is NOT Air            │          │
/// │ target is Key1 / Key2                     │ Unlock   │
/// │ otherwise (walls, locks, falling, ...)    │ Blocked  │
/// └──────────────────────────────────────────┴──────────┘
///
/// ## Vertical (Up / Down)
/// Same table without the Push row. Stones and boxes are never
/// pushed up or down.

use super::direction::Direction;
use super::tile::Tile;

/// Immutable view of the tile map for rule queries.
pub struct MapView<'a> {
    pub tiles: &'a [Vec<Tile>],
    pub width: usize,
    pub height: usize,
}

impl<'a> MapView<'a> {
    pub fn tile_at(&self, x: usize, y: usize) -> Tile {
        if x >= self.width || y >= self.height {
            return Tile::Unbreakable; // out of bounds = wall
        }
        self.tiles[y][x]
    }
}

/// What a single move will do.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    /// Walk onto Air or Flux.
    Step { to: (usize, usize) },
    /// Shove `object` from `to` into `object_to`, then walk onto `to`.
    Push { to: (usize, usize), object: Tile, object_to: (usize, usize) },
    /// Pick up the key at `to`; every `lock` tile dissolves.
    Unlock { to: (usize, usize), lock: Tile },
    Blocked,
}

/// Step `(x, y)` by `(dx, dy)`. `None` when it would leave the positive quadrant.
pub fn offset(x: usize, y: usize, dx: i32, dy: i32) -> Option<(usize, usize)> {
    Some((
        x.checked_add_signed(dx as isize)?,
        y.checked_add_signed(dy as isize)?,
    ))
}

/// Decide the outcome of moving the player at `(x, y)` one cell in `dir`.
pub fn resolve_move(map: &MapView, x: usize, y: usize, dir: Direction) -> MoveOutcome {
    let (dx, dy) = dir.delta();
    let to = match offset(x, y, dx, dy) {
        Some(p) => p,
        None => return MoveOutcome::Blocked,
    };
    let target = map.tile_at(to.0, to.1);

    if target.is_walkable() {
        return MoveOutcome::Step { to };
    }

    if dir.is_horizontal() && target.is_pushable() {
        return match can_push(map, to, dx) {
            Some(object_to) => MoveOutcome::Push { to, object: target, object_to },
            None => MoveOutcome::Blocked,
        };
    }

    if let Some(lock) = target.lock_for_key() {
        return MoveOutcome::Unlock { to, lock };
    }

    MoveOutcome::Blocked
}

/// Where a pushable at `at` lands when shoved by `dx`, if the push is legal.
///
/// The landing cell must be Air and the pushed object must currently rest on
/// something that is not Air.
fn can_push(map: &MapView, at: (usize, usize), dx: i32) -> Option<(usize, usize)> {
    let beyond = offset(at.0, at.1, dx, 0)?;
    if map.tile_at(beyond.0, beyond.1) != Tile::Air {
        return None;
    }
    if map.tile_at(at.0, at.1 + 1) == Tile::Air {
        return None;
    }
    Some(beyond)
}
