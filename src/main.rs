/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::Instant;

use config::GameConfig;
use sim::event::GameEvent;
use sim::frame;
use sim::level::{self, LevelError};
use sim::queue::InputQueue;
use sim::world::WorldState;
use ui::gamepad::GamepadState;
use ui::input::InputState;
use ui::renderer::Renderer;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = GameConfig::load();
    log::debug!("config: {config:?}");

    let (mut world, mut gp) = match setup(&config) {
        Ok(parts) => parts,
        Err(e) => {
            log::error!("cannot start level {}: {e}", config.level);
            std::process::exit(1);
        }
    };

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        log::error!("terminal init failed: {e}");
        return;
    }

    let result = game_loop(&mut world, &mut gp, &mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        log::error!("terminal cleanup failed: {e}");
    }
    if let Err(e) = result {
        log::error!("game error: {e}");
        std::process::exit(1);
    }
}

/// Everything that may log, done while stderr still owns the plain screen.
fn setup(config: &GameConfig) -> Result<(WorldState, GamepadState), LevelError> {
    let world = level::load_level(config.level)?;
    let gp = GamepadState::new(&config.gamepad);
    log::info!("gamepad connected: {}", gp.connected);
    Ok((world, gp))
}

fn game_loop(
    world: &mut WorldState,
    gp: &mut GamepadState,
    renderer: &mut Renderer,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut queue = InputQueue::new();
    let mut kb = InputState::new();
    let budget = config.speed.tick_budget();
    log::info!("tick budget {budget:?}");

    loop {
        let before = Instant::now();

        for cmd in gp.poll_commands() {
            kb.apply(cmd, &mut queue);
        }
        if handle_meta(&mut kb, world) {
            return Ok(());
        }

        let events = frame::run_frame(world, &mut queue, renderer)?;
        log_events(world.tick, &events);

        // Wait out the rest of the frame, capturing keys as they arrive.
        let delay = frame::frame_delay(budget, before.elapsed());
        kb.collect_until(Instant::now() + delay, &mut queue)?;
    }
}

/// Act on latched meta commands. Returns true when the game should end.
/// Queued moves were already trimmed when the restart was applied.
fn handle_meta(kb: &mut InputState, world: &mut WorldState) -> bool {
    if kb.quit {
        return true;
    }
    if kb.restart {
        kb.restart = false;
        world.restart();
        log::info!("level {} restarted", world.level_index);
    }
    false
}

fn log_events(tick: u64, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::LocksOpened { lock, count } => {
                log::info!("tick {tick}: {count} {lock:?} gate(s) opened");
            }
            other => log::debug!("tick {tick}: {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GamepadConfig;
    use crate::domain::direction::Direction;
    use crate::domain::tile::Tile;
    use crate::ui::input::Command;

    fn config_without_pad(level: usize) -> GameConfig {
        GameConfig { gamepad: GamepadConfig { enabled: false }, level, ..GameConfig::default() }
    }

    #[test]
    fn setup_opens_level_and_pad_without_a_terminal() {
        let (world, gp) = setup(&config_without_pad(0)).unwrap();
        assert_eq!(world.level_index, 0);
        assert!(!gp.connected);

        let missing = level::LEVELS.len();
        assert_eq!(
            setup(&config_without_pad(missing)).err(),
            Some(LevelError::NoSuchLevel(missing)),
        );
    }

    #[test]
    fn quit_stops_before_the_next_tick() {
        let mut world = level::load_level(0).unwrap();
        let mut kb = InputState::new();
        let mut queue = InputQueue::new();
        kb.apply(Command::Quit, &mut queue);
        assert!(handle_meta(&mut kb, &mut world));
        assert_eq!(world.tick, 0);
    }

    #[test]
    fn restart_rebuilds_level_and_keeps_later_moves() {
        let (mut world, _) = setup(&config_without_pad(0)).unwrap();
        let mut kb = InputState::new();
        let mut queue = InputQueue::new();

        frame::run_frame(&mut world, &mut queue, &mut NoRender).unwrap();
        queue.push(Direction::Right);
        frame::run_frame(&mut world, &mut queue, &mut NoRender).unwrap();
        assert_eq!(world.tile_at(1, 1), Tile::Air);

        kb.apply(Command::Move(Direction::Down), &mut queue);
        kb.apply(Command::Restart, &mut queue);
        kb.apply(Command::Move(Direction::Right), &mut queue);

        assert!(!handle_meta(&mut kb, &mut world));
        assert!(!kb.restart);
        assert_eq!(world.tiles, world.base_tiles);
        assert_eq!(world.tick, 0);
        assert_eq!(queue.drain_all(), vec![Direction::Right]);
    }

    struct NoRender;

    impl frame::RenderHook for NoRender {
        fn render(&mut self, _world: &WorldState) -> std::io::Result<()> {
            Ok(())
        }
    }
}
