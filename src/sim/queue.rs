/// Directions buffered between ticks.
///
/// Input capture appends at the tail; the frame driver drains everything
/// once per tick, newest first.

use crate::domain::direction::Direction;

#[derive(Clone, Debug, Default)]
pub struct InputQueue {
    pending: Vec<Direction>,
}

impl InputQueue {
    pub fn new() -> Self {
        InputQueue { pending: Vec::with_capacity(8) }
    }

    pub fn push(&mut self, dir: Direction) {
        self.pending.push(dir);
    }

    /// Remove every queued direction, most recently pushed first.
    pub fn drain_all(&mut self) -> Vec<Direction> {
        let mut drained = std::mem::take(&mut self.pending);
        drained.reverse();
        drained
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
