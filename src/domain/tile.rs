/// Tile types and their properties.
/// Properties are queried via methods, not stored as flags,
/// so tile semantics are centralized here.
///
/// Discriminants are the level codes: a level is a literal array of these
/// integers, in declaration order.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Tile {
    Air = 0,
    Flux,         // Walkable, consumed when stepped on
    Unbreakable,  // Wall
    Player,
    Stone,
    FallingStone,
    Box,
    FallingBox,
    Key1,
    Lock1,
    Key2,
    Lock2,
}

impl Tile {
    pub const ALL: [Tile; 12] = [
        Tile::Air, Tile::Flux, Tile::Unbreakable, Tile::Player,
        Tile::Stone, Tile::FallingStone, Tile::Box, Tile::FallingBox,
        Tile::Key1, Tile::Lock1, Tile::Key2, Tile::Lock2,
    ];

    /// Decode a level code. Unknown codes yield `None`.
    pub fn from_code(code: u8) -> Option<Tile> {
        Tile::ALL.get(code as usize).copied()
    }

    #[allow(dead_code)]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Can the player step straight into this cell?
    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Air | Tile::Flux)
    }

    /// Can this tile be shoved sideways? Falling variants cannot.
    pub fn is_pushable(self) -> bool {
        matches!(self, Tile::Stone | Tile::Box)
    }

    pub fn is_stony(self) -> bool {
        matches!(self, Tile::Stone | Tile::FallingStone)
    }

    pub fn is_boxy(self) -> bool {
        matches!(self, Tile::Box | Tile::FallingBox)
    }

    /// In transit: unsupported on the last gravity pass.
    pub fn is_falling(self) -> bool {
        matches!(self, Tile::FallingStone | Tile::FallingBox)
    }

    #[allow(dead_code)]
    pub fn is_key(self) -> bool {
        matches!(self, Tile::Key1 | Tile::Key2)
    }

    pub fn is_lock(self) -> bool {
        matches!(self, Tile::Lock1 | Tile::Lock2)
    }

    /// The gate kind this key dissolves.
    pub fn lock_for_key(self) -> Option<Tile> {
        match self {
            Tile::Key1 => Some(Tile::Lock1),
            Tile::Key2 => Some(Tile::Lock2),
            _ => None,
        }
    }

    /// Stone-like tiles fall as FallingStone, box-like as FallingBox.
    pub fn falling_variant(self) -> Option<Tile> {
        if self.is_stony() {
            Some(Tile::FallingStone)
        } else if self.is_boxy() {
            Some(Tile::FallingBox)
        } else {
            None
        }
    }

    pub fn settled_variant(self) -> Option<Tile> {
        match self {
            Tile::FallingStone => Some(Tile::Stone),
            Tile::FallingBox => Some(Tile::Box),
            _ => None,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Air
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_declaration_order() {
        for (i, t) in Tile::ALL.iter().enumerate() {
            assert_eq!(t.code() as usize, i);
            assert_eq!(Tile::from_code(i as u8), Some(*t));
        }
        assert_eq!(Tile::from_code(12), None);
        assert_eq!(Tile::from_code(255), None);
    }

    #[test]
    fn pushable_excludes_falling() {
        assert!(Tile::Stone.is_pushable());
        assert!(Tile::Box.is_pushable());
        assert!(!Tile::FallingStone.is_pushable());
        assert!(!Tile::FallingBox.is_pushable());
    }

    #[test]
    fn variants_pair_up() {
        assert_eq!(Tile::Stone.falling_variant(), Some(Tile::FallingStone));
        assert_eq!(Tile::FallingStone.falling_variant(), Some(Tile::FallingStone));
        assert_eq!(Tile::Box.falling_variant(), Some(Tile::FallingBox));
        assert_eq!(Tile::Key1.falling_variant(), None);
        assert_eq!(Tile::FallingBox.settled_variant(), Some(Tile::Box));
        assert_eq!(Tile::Stone.settled_variant(), None);
    }

    #[test]
    fn keys_open_matching_locks() {
        assert_eq!(Tile::Key1.lock_for_key(), Some(Tile::Lock1));
        assert_eq!(Tile::Key2.lock_for_key(), Some(Tile::Lock2));
        assert_eq!(Tile::Lock1.lock_for_key(), None);
        assert!(Tile::Lock2.is_lock() && !Tile::Lock2.is_key());
    }
}
