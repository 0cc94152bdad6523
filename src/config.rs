/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub speed: SpeedConfig,
    pub gamepad: GamepadConfig,
    /// Index into the built-in levels.
    pub level: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeedConfig {
    pub tick_rate_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GamepadConfig {
    pub enabled: bool,
}

impl SpeedConfig {
    /// Wall-clock budget for one tick.
    pub fn tick_budget(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_gamepad_enabled")]
    enabled: bool,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default)]
    level: usize,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 1000 / 30 }   // 30 ticks per second
fn default_gamepad_enabled() -> bool { true }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed { tick_rate_ms: default_tick_rate() }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad { enabled: default_gamepad_enabled() }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral { level: 0 }
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(toml_cfg: TomlConfig) -> Self {
        GameConfig {
            speed: SpeedConfig { tick_rate_ms: toml_cfg.speed.tick_rate_ms },
            gamepad: GamepadConfig { enabled: toml_cfg.gamepad.enabled },
            level: toml_cfg.general.level,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        TomlConfig::default().into()
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory,
    /// (3) `~/.local/share/keyfall`, (4) `/usr/share/keyfall`.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        load_toml(&candidate_dirs()).into()
    }

    /// Parse config text. Missing keys take their defaults.
    #[allow(dead_code)]
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(Into::into)
    }
}

/// Candidate directories to search: exe dir + CWD + data paths (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable (symlinks resolved)
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG data home
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/keyfall");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    // 4. System data directory
    let sys = PathBuf::from("/usr/share/keyfall");
    if sys.is_dir() && !dirs.iter().any(|d| d == &sys) {
        dirs.push(sys);
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if !path.exists() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                Ok(cfg) => {
                    log::info!("using {}", path.display());
                    return cfg;
                }
                Err(e) => {
                    log::warn!("config.toml parse error: {e}");
                    log::warn!("using default settings");
                    return TomlConfig::default();
                }
            },
            Err(e) => {
                log::warn!("could not read {}: {e}", path.display());
            }
        }
    }
    log::debug!("no config.toml found, using defaults");
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg = GameConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, GameConfig::default());
        assert_eq!(cfg.speed.tick_rate_ms, 33);
        assert!(cfg.gamepad.enabled);
        assert_eq!(cfg.level, 0);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = GameConfig::from_toml_str("[general]\nlevel = 2\n").unwrap();
        assert_eq!(cfg.level, 2);
        assert_eq!(cfg.speed.tick_rate_ms, 33);

        let text = "[speed]\ntick_rate_ms = 100\n[gamepad]\nenabled = false\n";
        let cfg = GameConfig::from_toml_str(text).unwrap();
        assert_eq!(cfg.speed.tick_budget(), Duration::from_millis(100));
        assert!(!cfg.gamepad.enabled);
    }

    #[test]
    fn bad_types_are_errors() {
        assert!(GameConfig::from_toml_str("[speed]\ntick_rate_ms = \"fast\"\n").is_err());
    }

    #[test]
    fn missing_dirs_fall_back_to_defaults() {
        let dirs = [PathBuf::from("/nonexistent/keyfall-test-dir")];
        let cfg: GameConfig = load_toml(&dirs).into();
        assert_eq!(cfg, GameConfig::default());
    }
}
