pub mod direction;
pub mod physics;
pub mod rules;
pub mod tile;
