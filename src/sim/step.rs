/// The step function: advances the world by one tick.
///
/// Processing order:
///   1. Drain the input queue (newest direction first)
///   2. Movement resolution, once per drained direction
///   3. Gravity pass (bottom row → top row, left → right)
///
/// Rules (`domain::rules`, `domain::physics`) decide; this module mutates.

use crate::domain::direction::Direction;
use crate::domain::physics::{gravity_action, GravityAction};
use crate::domain::rules::{self, MoveOutcome};
use crate::domain::tile::Tile;
use super::event::GameEvent;
use super::queue::InputQueue;
use super::world::WorldState;

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step(world: &mut WorldState, queue: &mut InputQueue) -> Vec<GameEvent> {
    let mut events: Vec<GameEvent> = Vec::new();
    world.tick += 1;

    for dir in queue.drain_all() {
        apply_move(world, dir, &mut events);
    }
    gravity_pass(world, &mut events);

    events
}

// ══════════════════════════════════════════════════════════════
// Player movement
// ══════════════════════════════════════════════════════════════

/// Resolve and perform one player move. Illegal moves change nothing.
pub fn apply_move(world: &mut WorldState, dir: Direction, events: &mut Vec<GameEvent>) {
    let p = world.player;
    let outcome = rules::resolve_move(&world.map_view(), p.x, p.y, dir);

    match outcome {
        MoveOutcome::Step { to } => {
            world.relocate_player(to.0, to.1);
        }
        MoveOutcome::Push { to, object, object_to } => {
            world.set_tile(object_to.0, object_to.1, object);
            world.relocate_player(to.0, to.1);
            events.push(GameEvent::ObjectPushed { tile: object, x: object_to.0, y: object_to.1 });
        }
        MoveOutcome::Unlock { to, lock } => {
            let key = world.tile_at(to.0, to.1);
            let count = world.clear_all_of_kind(lock);
            world.relocate_player(to.0, to.1);
            events.push(GameEvent::KeyCollected { key, x: to.0, y: to.1 });
            events.push(GameEvent::LocksOpened { lock, count });
        }
        MoveOutcome::Blocked => {
            events.push(GameEvent::MoveBlocked { dir });
            return;
        }
    }

    events.push(GameEvent::PlayerMoved { x: world.player.x, y: world.player.y });
}

// ══════════════════════════════════════════════════════════════
// Gravity
// ══════════════════════════════════════════════════════════════

/// One sweep over the grid. Each cell is visited once, so nothing falls
/// more than one row per pass; lower rows are resolved before the rows
/// above them look down.
pub fn gravity_pass(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    for y in (0..world.height).rev() {
        for x in 0..world.width {
            let here = world.tile_at(x, y);
            let below = world.tile_at(x, y + 1);

            match gravity_action(here, below) {
                Some(GravityAction::Fall(falling)) => {
                    world.set_tile(x, y + 1, falling);
                    world.set_tile(x, y, Tile::Air);
                    if !here.is_falling() {
                        events.push(GameEvent::ObjectFell { tile: here, x, y: y + 1 });
                    }
                }
                Some(GravityAction::Settle(resting)) => {
                    world.set_tile(x, y, resting);
                    events.push(GameEvent::ObjectLanded { tile: resting, x, y });
                }
                None => {}
            }
        }
    }
}
