/// Gravity rules for stones and boxes.
///
/// ## Per-cell guard chain (first match wins)
///
///   1. Stone / FallingStone, Air below  → below = FallingStone, here = Air
///   2. Box / FallingBox, Air below      → below = FallingBox,   here = Air
///   3. FallingStone, supported          → here = Stone
///   4. FallingBox, supported            → here = Box
///   5. anything else                    → unchanged
///
/// "Supported" means the cell below is anything but Air, including the
/// player, keys, locks and the map edge.

use super::tile::Tile;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GravityAction {
    /// Move down one row, arriving as the given falling variant.
    Fall(Tile),
    /// Stay put and become the given resting variant.
    Settle(Tile),
}

/// Gravity decision for a cell holding `here` above a cell holding `below`.
pub fn gravity_action(here: Tile, below: Tile) -> Option<GravityAction> {
    if below == Tile::Air {
        if let Some(falling) = here.falling_variant() {
            return Some(GravityAction::Fall(falling));
        }
    }
    here.settled_variant().map(GravityAction::Settle)
}
