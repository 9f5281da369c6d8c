//! Paddles and the controllers that drive them
//!
//! A paddle only moves vertically. Each tick its controller produces a new
//! center position, which is always clamped to the paddle's travel bounds.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Side;
use super::config::SimConfig;
use super::math::move_towards;
use crate::consts::{PADDLE_HALF_WIDTH, PADDLE_X};

/// A vertical paddle at a fixed x on one side of the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Center y (always inside `[bounds_bottom, bounds_top]`)
    y: f64,
    pub bounds_bottom: f64,
    pub bounds_top: f64,
    pub half_height: f64,
    pub half_width: f64,
}

impl Paddle {
    pub fn new(side: Side, config: &SimConfig) -> Self {
        let (bounds_bottom, bounds_top) = config.paddle_bounds;
        let mut paddle = Self {
            side,
            y: 0.0,
            bounds_bottom,
            bounds_top,
            half_height: config.paddle_half_height,
            half_width: PADDLE_HALF_WIDTH,
        };
        paddle.set_y(0.0);
        paddle
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn x(&self) -> f64 {
        match self.side {
            Side::Left => -PADDLE_X,
            Side::Right => PADDLE_X,
        }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x(), self.y)
    }

    /// Move the paddle, clamped to its bounds. Returns the applied y.
    pub fn set_y(&mut self, y: f64) -> f64 {
        self.y = y.clamp(self.bounds_bottom, self.bounds_top);
        self.y
    }

    /// Unit normal of the face that looks toward the arena center
    pub fn face_normal(&self) -> DVec2 {
        match self.side {
            Side::Left => DVec2::X,
            Side::Right => DVec2::NEG_X,
        }
    }
}

/// Keyboard-style controller: discrete up/down at a fixed speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumanController {
    pub speed: f64,
}

impl HumanController {
    pub fn new(speed: f64) -> Self {
        Self { speed }
    }

    /// Up takes priority when both keys are held
    pub fn tick(&self, paddle: &mut Paddle, dt: f64, up: bool, down: bool) -> f64 {
        let dir = if up {
            1.0
        } else if down {
            -1.0
        } else {
            0.0
        };
        paddle.set_y(paddle.y() + dir * self.speed * dt)
    }
}

/// Reactive AI with simulated reaction latency.
///
/// The target is resampled from the ball only every `reaction_delay` seconds,
/// but the paddle glides toward the current target on every tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiController {
    pub move_speed: f64,
    pub reaction_delay: f64,
    pub random_offset: f64,
    target_y: f64,
    last_sample_time: f64,
}

impl AiController {
    pub fn new(move_speed: f64, reaction_delay: f64, random_offset: f64) -> Self {
        Self {
            move_speed,
            reaction_delay,
            random_offset: random_offset.abs(),
            target_y: 0.0,
            last_sample_time: 0.0,
        }
    }

    pub fn target_y(&self) -> f64 {
        self.target_y
    }

    pub fn last_sample_time(&self) -> f64 {
        self.last_sample_time
    }

    /// Forget the current target and restart the reaction clock at `now`
    pub fn reset(&mut self, now: f64, target_y: f64) {
        self.target_y = target_y;
        self.last_sample_time = now;
    }

    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        paddle: &mut Paddle,
        now: f64,
        dt: f64,
        ball_y: Option<f64>,
        rng: &mut R,
    ) -> f64 {
        // No ball yet: keep chasing the old target
        if let Some(ball_y) = ball_y {
            if now - self.last_sample_time >= self.reaction_delay {
                let offset = rng.random_range(-self.random_offset..=self.random_offset);
                self.target_y = ball_y + offset;
                self.last_sample_time = now;
            }
        }

        let y = move_towards(paddle.y(), self.target_y, self.move_speed * dt);
        paddle.set_y(y)
    }
}

/// Per-tick observations handed to whichever controller owns a paddle
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlInput {
    pub now: f64,
    pub dt: f64,
    pub up: bool,
    pub down: bool,
    /// Ball height, if a ball is on the field
    pub ball_y: Option<f64>,
}

/// Paddle controller variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Controller {
    Human(HumanController),
    Ai(AiController),
}

impl Controller {
    pub fn human(config: &SimConfig) -> Self {
        Controller::Human(HumanController::new(config.paddle_speed))
    }

    pub fn ai(config: &SimConfig) -> Self {
        Controller::Ai(AiController::new(
            config.ai_move_speed,
            config.ai_reaction_delay,
            config.ai_random_offset,
        ))
    }

    pub fn is_ai(&self) -> bool {
        matches!(self, Controller::Ai(_))
    }

    /// Advance the paddle one tick; returns its new y
    pub fn drive<R: Rng + ?Sized>(
        &mut self,
        paddle: &mut Paddle,
        input: &ControlInput,
        rng: &mut R,
    ) -> f64 {
        match self {
            Controller::Human(human) => human.tick(paddle, input.dt, input.up, input.down),
            Controller::Ai(ai) => ai.tick(paddle, input.now, input.dt, input.ball_y, rng),
        }
    }
}

/// A paddle together with the controller that exclusively moves it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaddleSlot {
    pub paddle: Paddle,
    pub controller: Controller,
}

impl PaddleSlot {
    pub fn new(side: Side, controller: Controller, config: &SimConfig) -> Self {
        Self {
            paddle: Paddle::new(side, config),
            controller,
        }
    }

    /// Re-center the paddle and clear controller memory
    pub fn reset(&mut self, now: f64) {
        self.paddle.set_y(0.0);
        if let Controller::Ai(ai) = &mut self.controller {
            ai.reset(now, 0.0);
        }
    }
}
