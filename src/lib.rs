//! Paddle Duel - a two-paddle ball game simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, paddle controllers, match state)
//! - `settings`: Externally supplied configuration (game mode, colors, tuning)

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use settings::{GameMode, PaddleColor, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f64 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame time fed into the accumulator
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Arena dimensions (origin at center, +y up)
    pub const ARENA_HALF_WIDTH: f64 = 9.0;
    pub const ARENA_HALF_HEIGHT: f64 = 5.0;

    /// Paddle defaults
    pub const PADDLE_X: f64 = 8.0;
    pub const PADDLE_HALF_WIDTH: f64 = 0.2;
    pub const PADDLE_HALF_HEIGHT: f64 = 1.0;
    pub const PADDLE_SPEED: f64 = 10.0;
    /// Vertical travel limit for the paddle center
    pub const PADDLE_BOUND: f64 = 4.0;

    /// AI paddle defaults
    pub const AI_MOVE_SPEED: f64 = 7.0;
    pub const AI_REACTION_DELAY: f64 = 0.1;
    pub const AI_RANDOM_OFFSET: f64 = 0.5;

    /// Ball defaults
    pub const BALL_RADIUS: f64 = 0.2;
    pub const BALL_START_SPEED: f64 = 5.0;
    pub const BALL_MAX_SPEED: f64 = 15.0;
    /// Continuous speed ramp (units/s per second in play)
    pub const BALL_SPEED_INCREMENT: f64 = 0.25;
    /// Extra speed added on every paddle contact
    pub const PADDLE_HIT_BONUS: f64 = 0.25;
    /// Vertical bias added per unit of normalized paddle offset
    pub const SPIN_FACTOR: f64 = 0.75;
    /// Smallest vertical direction component allowed after a bounce
    pub const MIN_VERTICAL_COMPONENT: f64 = 0.1;
    /// Largest vertical component of a fresh launch (before normalizing)
    pub const LAUNCH_MAX_VERTICAL: f64 = 0.3;

    /// Delay before the first serve (seconds)
    pub const SERVE_DELAY: f64 = 1.5;
    /// Delay between a goal and the next serve (seconds)
    pub const RELAUNCH_DELAY: f64 = 1.5;

    /// Points needed to win a match
    pub const DEFAULT_SCORE_TO_WIN: u32 = 11;
}
