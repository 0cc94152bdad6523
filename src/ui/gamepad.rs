/// Gamepad capture using gilrs.
///
/// Mapping:
///   D-pad / Left Stick    →  Move (one command per press or stick push)
///   Start                 →  Restart level
///   Select                →  Quit
///
/// Built only with the `gamepad` feature; without it, or when disabled in
/// config, `poll_commands` never returns anything.

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;
use crate::domain::direction::Direction;
use super::input::Command;

#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
const STICK_DEADZONE: f32 = 0.5;

/// Which way the left stick currently leans, after the deadzone.
#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
fn stick_direction(x: f32, y: f32) -> Option<Direction> {
    if x.abs() < STICK_DEADZONE && y.abs() < STICK_DEADZONE {
        return None;
    }
    // Dominant axis wins; gilrs reports +Y as up.
    if x.abs() >= y.abs() {
        Some(if x < 0.0 { Direction::Left } else { Direction::Right })
    } else {
        Some(if y > 0.0 { Direction::Up } else { Direction::Down })
    }
}

/// Buttons this game listens to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
enum PadButton {
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    Start,
    Select,
}

impl PadButton {
    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<PadButton> {
        match btn {
            Button::DPadUp    => Some(PadButton::DPadUp),
            Button::DPadDown  => Some(PadButton::DPadDown),
            Button::DPadLeft  => Some(PadButton::DPadLeft),
            Button::DPadRight => Some(PadButton::DPadRight),
            Button::Start     => Some(PadButton::Start),
            Button::Select    => Some(PadButton::Select),
            _ => None,
        }
    }

    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn command(self) -> Command {
        match self {
            PadButton::DPadUp    => Command::Move(Direction::Up),
            PadButton::DPadDown  => Command::Move(Direction::Down),
            PadButton::DPadLeft  => Command::Move(Direction::Left),
            PadButton::DPadRight => Command::Move(Direction::Right),
            PadButton::Start     => Command::Restart,
            PadButton::Select    => Command::Quit,
        }
    }
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    stick_x: f32,
    stick_y: f32,
    /// Direction the stick was leaning at the last poll (edge detection).
    stick_held: Option<Direction>,

    pub connected: bool,
}

impl GamepadState {
    pub fn new(cfg: &GamepadConfig) -> Self {
        #[cfg(feature = "gamepad")]
        let (gilrs, connected) = if cfg.enabled {
            match Gilrs::new() {
                Ok(g) => {
                    let has_pad = g.gamepads().next().is_some();
                    (Some(g), has_pad)
                }
                Err(e) => {
                    log::warn!("gamepad support unavailable: {e}");
                    (None, false)
                }
            }
        } else {
            (None, false)
        };
        #[cfg(not(feature = "gamepad"))]
        let connected = {
            let _ = cfg;
            false
        };

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs,
            stick_x: 0.0,
            stick_y: 0.0,
            stick_held: None,
            connected,
        }
    }

    /// Everything pressed since the last call, in arrival order.
    pub fn poll_commands(&mut self) -> Vec<Command> {
        let mut out = vec![];
        #[cfg(feature = "gamepad")]
        self.poll_gilrs(&mut out);
        out
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self, out: &mut Vec<Command>) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => {
                    self.connected = true;
                    if let Some(b) = PadButton::from_gilrs(btn) {
                        out.push(b.command());
                    }
                }
                EventType::AxisChanged(axis, value, _) => {
                    self.connected = true;
                    match axis {
                        Axis::LeftStickX => self.stick_x = value,
                        Axis::LeftStickY => self.stick_y = value,
                        _ => continue,
                    }
                    self.stick_edge(out);
                }
                EventType::Connected => {
                    log::info!("gamepad connected");
                    self.connected = true;
                }
                EventType::Disconnected => {
                    log::info!("gamepad disconnected");
                    self.connected = false;
                    self.stick_x = 0.0;
                    self.stick_y = 0.0;
                    self.stick_held = None;
                }
                _ => {}
            }
        }
    }

    /// Emit a move when the stick leans into a new direction.
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn stick_edge(&mut self, out: &mut Vec<Command>) {
        let now = stick_direction(self.stick_x, self.stick_y);
        if now != self.stick_held {
            if let Some(dir) = now {
                out.push(Command::Move(dir));
            }
            self.stick_held = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad() -> GamepadState {
        GamepadState::new(&GamepadConfig { enabled: false })
    }

    #[test]
    fn disabled_pad_yields_nothing() {
        let mut gp = pad();
        assert!(!gp.connected);
        assert!(gp.poll_commands().is_empty());
    }

    #[test]
    fn buttons_map_to_commands() {
        assert_eq!(PadButton::DPadLeft.command(), Command::Move(Direction::Left));
        assert_eq!(PadButton::DPadUp.command(), Command::Move(Direction::Up));
        assert_eq!(PadButton::Start.command(), Command::Restart);
        assert_eq!(PadButton::Select.command(), Command::Quit);
    }

    #[test]
    fn stick_deadzone_and_dominant_axis() {
        assert_eq!(stick_direction(0.1, -0.2), None);
        assert_eq!(stick_direction(-0.9, 0.3), Some(Direction::Left));
        assert_eq!(stick_direction(0.2, 0.8), Some(Direction::Up));
        assert_eq!(stick_direction(0.0, -0.7), Some(Direction::Down));
    }

    #[test]
    fn stick_fires_once_per_lean() {
        let mut gp = pad();
        let mut out = vec![];
        gp.stick_x = 0.9;
        gp.stick_edge(&mut out);
        gp.stick_x = 0.95;
        gp.stick_edge(&mut out);
        gp.stick_x = 0.0;
        gp.stick_edge(&mut out);
        gp.stick_x = 0.9;
        gp.stick_edge(&mut out);
        assert_eq!(out, vec![Command::Move(Direction::Right), Command::Move(Direction::Right)]);
    }
}
