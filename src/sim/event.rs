/// Events emitted during a simulation step.
/// The game loop logs these; tests use them to check what a tick did.

use crate::domain::direction::Direction;
use crate::domain::tile::Tile;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(dead_code)]
pub enum GameEvent {
    PlayerMoved { x: usize, y: usize },
    /// `tile` was shoved into (x, y).
    ObjectPushed { tile: Tile, x: usize, y: usize },
    KeyCollected { key: Tile, x: usize, y: usize },
    LocksOpened { lock: Tile, count: usize },
    MoveBlocked { dir: Direction },
    /// A resting object lost support and dropped into (x, y).
    ObjectFell { tile: Tile, x: usize, y: usize },
    /// A falling object came to rest at (x, y).
    ObjectLanded { tile: Tile, x: usize, y: usize },
}
