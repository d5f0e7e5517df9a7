//! Game settings and preferences
//!
//! Persisted as JSON next to the rankings file. Everything here is input to
//! the core; none of it is mutated by the simulation.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_PORT, DEFAULT_TOURNAMENT_TARGET};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting: {0}")]
    Validation(String),
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colors for every drawable element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSet {
    pub background: Rgb,
    pub paddle: Rgb,
    pub ball: Rgb,
    pub obstacle: Rgb,
    pub particle: Rgb,
    pub text: Rgb,
}

/// Visual theme (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Classic,
    Dark,
    Neon,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Classic => "Classic",
            Theme::Dark => "Dark",
            Theme::Neon => "Neon",
        }
    }

    pub fn colors(&self) -> ColorSet {
        match self {
            Theme::Classic => ColorSet {
                background: Rgb(0, 0, 0),
                paddle: Rgb(255, 255, 255),
                ball: Rgb(255, 255, 255),
                obstacle: Rgb(200, 200, 200),
                particle: Rgb(255, 255, 255),
                text: Rgb(255, 255, 255),
            },
            Theme::Dark => ColorSet {
                background: Rgb(20, 20, 20),
                paddle: Rgb(180, 180, 180),
                ball: Rgb(180, 180, 180),
                obstacle: Rgb(100, 100, 100),
                particle: Rgb(180, 180, 180),
                text: Rgb(180, 180, 180),
            },
            Theme::Neon => ColorSet {
                background: Rgb(10, 10, 30),
                paddle: Rgb(57, 255, 20),
                ball: Rgb(255, 20, 147),
                obstacle: Rgb(0, 255, 255),
                particle: Rgb(255, 255, 0),
                text: Rgb(255, 20, 147),
            },
        }
    }
}

/// Difficulty label shown in menus; the adaptive AI ignores it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    #[default]
    Classic,
    TimeAttack,
    /// Obstacles spawn in the middle of the field
    Survival,
    /// First to the target score wins
    Tournament,
}

impl GameMode {
    /// Label used for the timer display and as the ranking key
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::TimeAttack => "Time Attack",
            GameMode::Survival => "Survival",
            GameMode::Tournament => "Tournament",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace([' ', '-', '_'], "").as_str() {
            "classic" => Some(GameMode::Classic),
            "timeattack" => Some(GameMode::TimeAttack),
            "survival" => Some(GameMode::Survival),
            "tournament" => Some(GameMode::Tournament),
            _ => None,
        }
    }

    /// Whether the elapsed-time counter runs and is displayed
    pub fn timed(&self) -> bool {
        matches!(self, GameMode::TimeAttack | GameMode::Tournament)
    }

    pub fn spawns_obstacles(&self) -> bool {
        *self == GameMode::Survival
    }
}

/// Who drives the right paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlayMode {
    /// Right paddle is the adaptive AI
    #[default]
    Single,
    /// Both paddles on this keyboard
    LocalVersus,
    /// Authoritative side of a network game; right paddle is the peer
    OnlineHost,
    /// Mirrors the host's state; sends right-paddle commands
    OnlineClient,
}

/// Key bindings by key name; the input layer resolves names to devices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub left_up: String,
    pub left_down: String,
    pub right_up: String,
    pub right_down: String,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            left_up: "w".into(),
            left_down: "s".into(),
            right_up: "up".into(),
            right_down: "down".into(),
        }
    }
}

/// Network endpoint for online play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// Host to connect to (client only)
    pub host: String,
    pub port: u16,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: DEFAULT_PORT,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub difficulty: Difficulty,
    pub mode: GameMode,
    pub players: PlayMode,
    /// Score that ends a Tournament
    pub tournament_target: u32,
    pub controls: Controls,
    /// Paddles follow the pointer instead of keys
    pub pointer_mode: bool,
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
    pub network: NetworkSettings,
    /// Fixed RNG seed; random per run when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Classic,
            difficulty: Difficulty::Medium,
            mode: GameMode::Classic,
            players: PlayMode::Single,
            tournament_target: DEFAULT_TOURNAMENT_TARGET,
            controls: Controls::default(),
            pointer_mode: false,
            volume: 0.5,
            network: NetworkSettings::default(),
            seed: None,
        }
    }
}

impl Settings {
    /// Load from a JSON file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        self.validate()?;
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Settings saved");
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tournament_target == 0 {
            return Err(SettingsError::Validation(
                "tournament_target must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(SettingsError::Validation(format!(
                "volume {} outside 0.0-1.0",
                self.volume
            )));
        }
        if self.network.port == 0 {
            return Err(SettingsError::Validation("network.port must be non-zero".into()));
        }
        let c = &self.controls;
        for (name, key) in [
            ("left_up", &c.left_up),
            ("left_down", &c.left_down),
            ("right_up", &c.right_up),
            ("right_down", &c.right_down),
        ] {
            if key.trim().is_empty() {
                return Err(SettingsError::Validation(format!("controls.{name} is empty")));
            }
        }
        Ok(())
    }
}
