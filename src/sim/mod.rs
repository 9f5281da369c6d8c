//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod ball;
pub mod collision;
pub mod config;
pub mod events;
pub mod math;
pub mod paddle;
pub mod score;
pub mod state;
pub mod tick;

use serde::{Deserialize, Serialize};

pub use ball::{Ball, BallPhase, BallSnapshot};
pub use collision::{Arena, Contact, ContactKind};
pub use config::SimConfig;
pub use events::{EventBus, GameEvent};
pub use math::{enforce_min_vertical, move_towards, reflect};
pub use paddle::{AiController, ControlInput, Controller, HumanController, Paddle, PaddleSlot};
pub use score::{GoalOutcome, MatchPhase, MatchState};
pub use state::{GameState, Snapshot};
pub use tick::{FixedStep, PaddleKeys, TickInput, tick};

/// One half of the arena (and the player defending it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
