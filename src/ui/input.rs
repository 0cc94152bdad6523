/// Keyboard capture.
///
/// Turns crossterm key-down events into queue pushes and meta commands.
/// Only Press and Repeat events count; releases and unmapped keys are
/// dropped without touching the queue.
///
///   ← / a   Left        r      Restart level
///   ↑ / w   Up          Esc/q  Quit
///   → / d   Right       Ctrl+C Quit
///   ↓ / s   Down

use std::io;
use std::time::Instant;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::direction::Direction;
use crate::sim::queue::InputQueue;

/// What a recognized input asks for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Move(Direction),
    Restart,
    Quit,
}

/// Fixed movement mapping, lowercase letters only. Everything else is `None`.
pub fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Up | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Right | KeyCode::Char('d') => Some(Direction::Right),
        KeyCode::Down | KeyCode::Char('s') => Some(Direction::Down),
        _ => None,
    }
}

pub fn command_for_key(key: &KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        code => direction_for_key(code).map(Command::Move),
    }
}

/// Meta state gathered between ticks. Directions go straight to the queue.
#[derive(Debug, Default)]
pub struct InputState {
    pub quit: bool,
    pub restart: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState::default()
    }

    /// Route one command: moves are queued, meta commands latch a flag.
    /// A restart drops the moves queued before it, not the ones after.
    pub fn apply(&mut self, cmd: Command, queue: &mut InputQueue) {
        match cmd {
            Command::Move(dir) => queue.push(dir),
            Command::Restart => {
                queue.clear();
                self.restart = true;
            }
            Command::Quit => self.quit = true,
        }
    }

    /// Handle one raw key event.
    pub fn handle_key(&mut self, key: KeyEvent, queue: &mut InputQueue) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if let Some(cmd) = command_for_key(&key) {
            self.apply(cmd, queue);
        }
    }

    /// Block until `deadline`, feeding every key event that arrives into
    /// the queue. Returns early on quit. Events already pending when the
    /// deadline has passed are still drained.
    pub fn collect_until(&mut self, deadline: Instant, queue: &mut InputQueue) -> io::Result<()> {
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !poll(timeout)? {
                return Ok(());
            }
            if let Event::Key(key) = event::read()? {
                self.handle_key(key, queue);
            }
            if self.quit {
                return Ok(());
            }
        }
    }
}
