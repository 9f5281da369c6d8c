//! Simulation events for presentation consumers
//!
//! The simulation only ever appends to the bus. Sound cues, score displays and
//! goal flashes read the drained events; they never touch simulation state.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::Side;

/// Something observable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off a wall or a paddle
    Collision { with_paddle: bool, point: DVec2 },
    /// Ball crossed a goal line; `side` is the scorer
    Goal { side: Side },
    /// Match decided
    GameOver { winner: Side },
    /// Ball served from the center
    BallRelaunch,
}

/// Ordered queue of events raised since the last drain
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    pending: Vec<GameEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.pending.push(event);
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[GameEvent] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
