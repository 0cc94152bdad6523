/// Frame driver: one tick of simulation plus presentation.
///
/// Per frame, in strict order:
///   1. `step` (drain queue → moves → gravity)
///   2. render hook
///
/// Pacing lives with the caller: it measures how long the frame took and
/// waits `frame_delay(budget, elapsed)` before the next one.

use std::io;
use std::time::Duration;

use super::event::GameEvent;
use super::queue::InputQueue;
use super::step;
use super::world::WorldState;

/// Presentation collaborator. Sees the finished grid once per tick.
pub trait RenderHook {
    fn render(&mut self, world: &WorldState) -> io::Result<()>;
}

pub fn run_frame<R: RenderHook + ?Sized>(
    world: &mut WorldState,
    queue: &mut InputQueue,
    hook: &mut R,
) -> io::Result<Vec<GameEvent>> {
    let events = step::step(world, queue);
    hook.render(world)?;
    Ok(events)
}

/// Time left in the frame budget; never negative.
pub fn frame_delay(budget: Duration, elapsed: Duration) -> Duration {
    budget.saturating_sub(elapsed)
}
