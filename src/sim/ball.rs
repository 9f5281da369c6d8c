//! Ball simulation: serve timer, launch, integration and collision response
//!
//! Direction and speed are stored separately. Direction is always a unit
//! vector (or zero while the ball is idle), speed is a scalar, and velocity is
//! recombined from the two on every read, so `|velocity| == speed` holds by
//! construction whenever the ball is in play.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Side;
use super::collision::{
    Arena, Contact, ball_paddle_collision, ball_paddle_sweep, ball_wall_collision, goal_crossed,
};
use super::config::SimConfig;
use super::math::{enforce_min_vertical, reflect};
use super::paddle::Paddle;
use crate::consts::LAUNCH_MAX_VERTICAL;

/// Ball lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallPhase {
    /// Parked at the center, waiting for the serve timer
    Idle,
    /// Timer elapsed, direction about to be picked
    Launching,
    /// Moving and colliding
    InPlay,
}

/// Position and velocity as seen by consumers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub position: DVec2,
    pub velocity: DVec2,
}

/// What happened to the ball during one step
#[derive(Debug, Clone, Default)]
pub struct StepOutcome {
    pub contacts: Vec<Contact>,
    /// Scorer, if the ball crossed a goal line
    pub goal: Option<Side>,
}

/// The single ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: DVec2,
    dir: DVec2,
    current_speed: f64,
    pub base_speed: f64,
    pub max_speed: f64,
    /// Continuous ramp, applied per second in play
    pub speed_increment: f64,
    pub paddle_hit_bonus: f64,
    pub spin_factor: f64,
    pub min_vertical: f64,
    pub radius: f64,
    pub phase: BallPhase,
    /// Scheduled serve time; `None` means no serve pending
    pub relaunch_at: Option<f64>,
}

impl Ball {
    /// New idle ball at the center with no serve scheduled
    pub fn new(config: &SimConfig) -> Self {
        Self {
            pos: DVec2::ZERO,
            dir: DVec2::ZERO,
            current_speed: config.initial_ball_speed,
            base_speed: config.initial_ball_speed,
            max_speed: config.max_speed,
            speed_increment: config.speed_increment,
            paddle_hit_bonus: config.paddle_hit_bonus,
            spin_factor: config.spin_factor,
            min_vertical: config.min_vertical_component,
            radius: config.ball_radius,
            phase: BallPhase::Idle,
            relaunch_at: None,
        }
    }

    pub fn speed(&self) -> f64 {
        self.current_speed
    }

    pub fn direction(&self) -> DVec2 {
        self.dir
    }

    pub fn velocity(&self) -> DVec2 {
        match self.phase {
            BallPhase::InPlay => self.dir * self.current_speed,
            _ => DVec2::ZERO,
        }
    }

    pub fn is_in_play(&self) -> bool {
        self.phase == BallPhase::InPlay
    }

    pub fn snapshot(&self) -> BallSnapshot {
        BallSnapshot {
            position: self.pos,
            velocity: self.velocity(),
        }
    }

    /// Park the ball at the center and (optionally) schedule the next serve.
    ///
    /// Any previously scheduled serve is discarded.
    pub fn reset_to_center(&mut self, relaunch_at: Option<f64>) {
        self.pos = DVec2::ZERO;
        self.dir = DVec2::ZERO;
        self.current_speed = self.base_speed;
        self.phase = BallPhase::Idle;
        self.relaunch_at = relaunch_at;
    }

    /// Fire the serve timer if it is due. Returns true when the ball moved to
    /// `Launching`.
    pub fn poll_serve(&mut self, now: f64) -> bool {
        if self.phase != BallPhase::Idle {
            return false;
        }
        match self.relaunch_at {
            Some(at) if now >= at => {
                self.relaunch_at = None;
                self.phase = BallPhase::Launching;
                true
            }
            _ => false,
        }
    }

    /// Pick a random serve direction and put the ball in play
    pub fn launch<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let horizontal = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let vertical = rng.random_range(-LAUNCH_MAX_VERTICAL..=LAUNCH_MAX_VERTICAL);

        self.dir = DVec2::new(horizontal, vertical).normalize();
        self.current_speed = self.base_speed;
        self.phase = BallPhase::InPlay;
    }

    /// Advance an in-play ball by `dt`.
    ///
    /// Reflections start from the direction cached before integration, so a
    /// ball still overlapping a surface after moving is not turned twice. A
    /// paddle contact in the same step (corner) builds on the wall's result.
    pub fn step(&mut self, dt: f64, arena: &Arena, paddles: &[Paddle]) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if self.phase != BallPhase::InPlay {
            return outcome;
        }

        let pre_dir = self.dir;
        let pre_pos = self.pos;
        self.pos += pre_dir * self.current_speed * dt;
        self.current_speed = (self.current_speed + self.speed_increment * dt).min(self.max_speed);

        let mut dir = pre_dir;

        if let Some(contact) = ball_wall_collision(self.pos, dir, self.radius, arena) {
            dir = enforce_min_vertical(reflect(dir, contact.normal), self.min_vertical);
            self.pos += contact.normal * contact.penetration;
            outcome.contacts.push(contact);
        }

        for paddle in paddles {
            let contact = ball_paddle_collision(self.pos, dir, self.radius, paddle)
                .or_else(|| ball_paddle_sweep(pre_pos, self.pos, self.radius, paddle));
            let Some(contact) = contact else {
                continue;
            };

            dir = enforce_min_vertical(reflect(dir, contact.normal), self.min_vertical);

            // Spin: off-center hits steer the rebound
            let hit_factor = ((self.pos.y - paddle.y()) / paddle.half_height).clamp(-1.0, 1.0);
            dir.y += hit_factor * self.spin_factor;
            dir = enforce_min_vertical(dir.normalize_or(contact.normal), self.min_vertical);

            self.current_speed = (self.current_speed + self.paddle_hit_bonus).min(self.max_speed);
            self.pos += contact.normal * contact.penetration;
            outcome.contacts.push(contact);
            break;
        }

        self.dir = dir;
        outcome.goal = goal_crossed(self.pos, arena);
        outcome
    }

    /// Put the ball in play with a given direction and speed.
    ///
    /// Direction is normalized and speed capped at `max_speed`. Any pending
    /// serve is cancelled. Match phase is untouched, so callers serving by hand
    /// after a goal must also `resume` the match.
    pub fn set_motion(&mut self, dir: DVec2, speed: f64) {
        self.dir = dir.normalize_or_zero();
        self.current_speed = speed.min(self.max_speed);
        self.phase = BallPhase::InPlay;
        self.relaunch_at = None;
    }
}
