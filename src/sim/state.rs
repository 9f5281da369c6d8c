//! Game state and queries
//!
//! `GameState` is the single owner of every mutable piece of the simulation:
//! ball, paddles, match score, RNG and the event bus. Presentation reads it
//! through queries and snapshots only.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::Side;
use super::ball::{Ball, BallPhase, BallSnapshot};
use super::collision::Arena;
use super::config::SimConfig;
use super::events::{EventBus, GameEvent};
use super::paddle::{Controller, PaddleSlot};
use super::score::{MatchPhase, MatchState};

/// Immutable per-tick view for renderers and other threads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time: f64,
    pub ball: BallSnapshot,
    pub ball_phase: BallPhase,
    /// (left, right) paddle centers
    pub paddles: (f64, f64),
    /// (left, right)
    pub score: (u32, u32),
    pub phase: MatchPhase,
    pub winner: Option<Side>,
}

/// Complete simulation state for one match
#[derive(Debug, Clone)]
pub struct GameState {
    /// Match seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub config: SimConfig,
    pub arena: Arena,
    pub ball: Ball,
    /// Indexed by `Side::index`
    pub paddles: [PaddleSlot; 2],
    pub match_state: MatchState,
    pub events: EventBus,
    /// Simulation clock (seconds)
    pub now: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Externally requested pause (the match also halts on its own at game over)
    pub paused: bool,
}

impl GameState {
    /// Create a match with the given controllers; the first serve is armed.
    pub fn new(seed: u64, config: SimConfig, left: Controller, right: Controller) -> Self {
        let config = config.sanitized();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena: Arena::default(),
            ball: Ball::new(&config),
            paddles: [
                PaddleSlot::new(Side::Left, left, &config),
                PaddleSlot::new(Side::Right, right, &config),
            ],
            match_state: MatchState::new(config.score_to_win),
            events: EventBus::new(),
            now: 0.0,
            time_ticks: 0,
            paused: false,
            config,
        };
        let config = state.config.clone();
        state.tune_paddles(&config);
        state.ball.reset_to_center(Some(state.config.serve_delay));
        state
    }

    /// Apply new tuning. Takes effect immediately for paddles and AI, and
    /// from the next serve for ball speed.
    pub fn configure(&mut self, config: SimConfig) {
        let config = config.sanitized();

        if self.match_state.set_score_to_win(config.score_to_win) {
            // A lowered target can decide the match on the spot
            if let Some(winner) = self.winner() {
                let (left, right) = self.score();
                log::info!("{:?} wins {}-{} (target lowered)", winner, left, right);
                self.events.emit(GameEvent::GameOver { winner });
                self.ball.reset_to_center(None);
            }
        } else {
            log::warn!("Score to win not changed, match already over");
        }

        self.ball.base_speed = config.initial_ball_speed;
        self.ball.max_speed = config.max_speed;
        self.ball.speed_increment = config.speed_increment;
        self.ball.paddle_hit_bonus = config.paddle_hit_bonus;
        self.ball.spin_factor = config.spin_factor;
        self.ball.min_vertical = config.min_vertical_component;
        self.ball.radius = config.ball_radius;

        self.tune_paddles(&config);

        log::info!(
            "Configured: first to {}, ball {}..{} (+{}/s)",
            self.match_state.score_to_win(),
            config.initial_ball_speed,
            config.max_speed,
            config.speed_increment
        );
        self.config = config;
    }

    /// Push paddle and controller tuning from a sanitized config
    fn tune_paddles(&mut self, config: &SimConfig) {
        for slot in &mut self.paddles {
            let (bottom, top) = config.paddle_bounds;
            slot.paddle.bounds_bottom = bottom;
            slot.paddle.bounds_top = top;
            slot.paddle.half_height = config.paddle_half_height;
            let y = slot.paddle.y();
            slot.paddle.set_y(y);

            match &mut slot.controller {
                Controller::Human(human) => human.speed = config.paddle_speed,
                Controller::Ai(ai) => {
                    ai.move_speed = config.ai_move_speed;
                    ai.reaction_delay = config.ai_reaction_delay;
                    ai.random_offset = config.ai_random_offset;
                }
            }
        }
    }

    /// Start a fresh match with the same controllers.
    ///
    /// A pending relaunch from the previous match is discarded.
    pub fn restart(&mut self) {
        self.match_state.reset();
        for slot in &mut self.paddles {
            slot.reset(self.now);
        }
        self.ball
            .reset_to_center(Some(self.now + self.config.serve_delay));
        self.events.clear();
        self.paused = false;
        log::info!("Match restarted");
    }

    /// (left, right)
    pub fn score(&self) -> (u32, u32) {
        self.match_state.score()
    }

    pub fn ball_state(&self) -> BallSnapshot {
        self.ball.snapshot()
    }

    pub fn paddle(&self, side: Side) -> &PaddleSlot {
        &self.paddles[side.index()]
    }

    pub fn paddle_position(&self, side: Side) -> f64 {
        self.paddle(side).paddle.y()
    }

    pub fn phase(&self) -> MatchPhase {
        self.match_state.phase()
    }

    pub fn winner(&self) -> Option<Side> {
        if self.match_state.is_over() {
            self.match_state.winner()
        } else {
            None
        }
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time: self.now,
            ball: self.ball.snapshot(),
            ball_phase: self.ball.phase,
            paddles: (
                self.paddle_position(Side::Left),
                self.paddle_position(Side::Right),
            ),
            score: self.score(),
            phase: self.phase(),
            winner: self.winner(),
        }
    }
}
