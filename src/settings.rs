//! Match settings and preferences
//!
//! Owned by the presentation layer and handed to the simulation at setup.
//! Persisted as JSON; the game mode can be overridden from the environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SCORE_TO_WIN;
use crate::error::SettingsError;
use crate::sim::{Controller, GameState, SimConfig};

/// Who controls each paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Left paddle human, right paddle AI
    #[default]
    VersusAi,
    /// Both paddles human
    TwoPlayer,
    /// Both paddles AI (attract screen / headless runs)
    Demo,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::VersusAi => "versus-ai",
            GameMode::TwoPlayer => "two-player",
            GameMode::Demo => "demo",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "versus-ai" | "vs-ai" | "ai" | "single" => Some(GameMode::VersusAi),
            "two-player" | "2p" | "pvp" | "local" => Some(GameMode::TwoPlayer),
            "demo" | "idle" => Some(GameMode::Demo),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Result<Self, SettingsError> {
        Self::from_str(s).ok_or_else(|| SettingsError::UnknownMode(s.to_string()))
    }

    /// (left, right) controllers for this mode
    pub fn controllers(&self, config: &SimConfig) -> (Controller, Controller) {
        match self {
            GameMode::VersusAi => (Controller::human(config), Controller::ai(config)),
            GameMode::TwoPlayer => (Controller::human(config), Controller::human(config)),
            GameMode::Demo => (Controller::ai(config), Controller::ai(config)),
        }
    }
}

/// Paddle color palette (rendering only; the simulation never reads it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaddleColor {
    #[default]
    White,
    Red,
    Blue,
    Green,
    Yellow,
    Cyan,
    Magenta,
}

impl PaddleColor {
    /// Palette in menu order
    pub const ALL: [PaddleColor; 7] = [
        PaddleColor::White,
        PaddleColor::Red,
        PaddleColor::Blue,
        PaddleColor::Green,
        PaddleColor::Yellow,
        PaddleColor::Cyan,
        PaddleColor::Magenta,
    ];

    /// Menu index lookup; out-of-range indices have no color
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaddleColor::White => "White",
            PaddleColor::Red => "Red",
            PaddleColor::Blue => "Blue",
            PaddleColor::Green => "Green",
            PaddleColor::Yellow => "Yellow",
            PaddleColor::Cyan => "Cyan",
            PaddleColor::Magenta => "Magenta",
        }
    }

    /// 0xRRGGBB
    pub fn rgb(&self) -> u32 {
        match self {
            PaddleColor::White => 0xFFFFFF,
            PaddleColor::Red => 0xFF0000,
            PaddleColor::Blue => 0x0000FF,
            PaddleColor::Green => 0x00FF00,
            PaddleColor::Yellow => 0xFFEB04,
            PaddleColor::Cyan => 0x00FFFF,
            PaddleColor::Magenta => 0xFF00FF,
        }
    }
}

/// Match settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: GameMode,
    pub left_color: PaddleColor,
    pub right_color: PaddleColor,
    /// Fixed match seed; `None` picks one at startup
    pub seed: Option<u64>,
    /// Simulation tuning
    pub sim: SimConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::VersusAi,
            left_color: PaddleColor::White,
            right_color: PaddleColor::White,
            seed: None,
            sim: SimConfig::default(),
        }
    }
}

impl Settings {
    /// Environment variable naming the settings file
    pub const PATH_ENV: &'static str = "PADDLE_DUEL_SETTINGS";
    /// Environment variable overriding the game mode
    pub const MODE_ENV: &'static str = "PADDLE_DUEL_MODE";
    /// Settings file used when `PATH_ENV` is unset
    pub const DEFAULT_PATH: &'static str = "paddle_duel_settings.json";

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Write settings to a JSON file
    pub fn write(&self, path: &Path) -> Result<(), SettingsError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Settings file location from the environment
    pub fn path_from_env() -> PathBuf {
        std::env::var_os(Self::PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_PATH))
    }

    /// Load settings from disk and the environment, falling back to defaults
    pub fn load() -> Self {
        let path = Self::path_from_env();
        let mut settings = match Self::read(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("{}; using default settings", err);
                Self::default()
            }
        };

        if let Ok(mode) = std::env::var(Self::MODE_ENV) {
            settings.apply_mode_override(&mode);
        }
        settings
    }

    /// Apply a game mode named outside the settings file; unknown names are ignored
    pub fn apply_mode_override(&mut self, mode: &str) {
        match GameMode::parse(mode) {
            Ok(mode) => {
                log::info!("Game mode from environment: {}", mode.as_str());
                self.mode = mode;
            }
            Err(err) => log::warn!("{}; keeping {}", err, self.mode.as_str()),
        }
    }

    /// Parse a typed score-to-win; anything but a positive integer means the default
    pub fn parse_score_to_win(input: &str) -> u32 {
        match input.trim().parse::<u32>() {
            Ok(score) if score > 0 => score,
            _ => DEFAULT_SCORE_TO_WIN,
        }
    }

    /// Build a match from these settings
    pub fn new_game(&self, seed: u64) -> GameState {
        let (left, right) = self.mode.controllers(&self.sim);
        GameState::new(seed, self.sim.clone(), left, right)
    }
}
