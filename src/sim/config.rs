//! Tunable simulation parameters
//!
//! Everything the presentation layer may configure before a match starts.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Simulation tuning, applied through `GameState::configure`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub score_to_win: u32,

    // === Ball ===
    pub initial_ball_speed: f64,
    pub max_speed: f64,
    /// Continuous ramp, units/s gained per second in play
    pub speed_increment: f64,
    /// Flat bonus added on every paddle contact
    pub paddle_hit_bonus: f64,
    pub spin_factor: f64,
    pub min_vertical_component: f64,
    pub ball_radius: f64,

    // === Paddles ===
    pub paddle_speed: f64,
    /// (bottom, top) limits for the paddle center
    pub paddle_bounds: (f64, f64),
    pub paddle_half_height: f64,

    // === AI ===
    pub ai_move_speed: f64,
    pub ai_reaction_delay: f64,
    pub ai_random_offset: f64,

    // === Timing ===
    pub serve_delay: f64,
    pub relaunch_delay: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            score_to_win: DEFAULT_SCORE_TO_WIN,

            initial_ball_speed: BALL_START_SPEED,
            max_speed: BALL_MAX_SPEED,
            speed_increment: BALL_SPEED_INCREMENT,
            paddle_hit_bonus: PADDLE_HIT_BONUS,
            spin_factor: SPIN_FACTOR,
            min_vertical_component: MIN_VERTICAL_COMPONENT,
            ball_radius: BALL_RADIUS,

            paddle_speed: PADDLE_SPEED,
            paddle_bounds: (-PADDLE_BOUND, PADDLE_BOUND),
            paddle_half_height: PADDLE_HALF_HEIGHT,

            ai_move_speed: AI_MOVE_SPEED,
            ai_reaction_delay: AI_REACTION_DELAY,
            ai_random_offset: AI_RANDOM_OFFSET,

            serve_delay: SERVE_DELAY,
            relaunch_delay: RELAUNCH_DELAY,
        }
    }
}

impl SimConfig {
    /// Repair values the simulation cannot run with.
    ///
    /// Nothing here is an error: bad input degrades to something playable.
    pub fn sanitized(mut self) -> Self {
        self.replace_non_finite();

        if self.score_to_win == 0 {
            log::warn!(
                "Invalid score to win (0), using {}",
                DEFAULT_SCORE_TO_WIN
            );
            self.score_to_win = DEFAULT_SCORE_TO_WIN;
        }
        if self.max_speed < self.initial_ball_speed {
            log::warn!(
                "Max speed {} below initial speed {}, raising it",
                self.max_speed,
                self.initial_ball_speed
            );
            self.max_speed = self.initial_ball_speed;
        }
        let (bottom, top) = self.paddle_bounds;
        if bottom > top {
            self.paddle_bounds = (top, bottom);
        }
        self.speed_increment = self.speed_increment.max(0.0);
        self.paddle_hit_bonus = self.paddle_hit_bonus.max(0.0);
        self.ai_reaction_delay = self.ai_reaction_delay.max(0.0);
        self.ai_random_offset = self.ai_random_offset.abs();
        self.min_vertical_component = self.min_vertical_component.clamp(0.0, 0.9);
        self
    }

    /// NaN or infinite tunables fall back to their defaults
    fn replace_non_finite(&mut self) {
        let defaults = Self::default();
        let (bottom, top) = self.paddle_bounds;
        let (default_bottom, default_top) = defaults.paddle_bounds;

        let fields = [
            ("initial_ball_speed", &mut self.initial_ball_speed, defaults.initial_ball_speed),
            ("max_speed", &mut self.max_speed, defaults.max_speed),
            ("speed_increment", &mut self.speed_increment, defaults.speed_increment),
            ("paddle_hit_bonus", &mut self.paddle_hit_bonus, defaults.paddle_hit_bonus),
            ("spin_factor", &mut self.spin_factor, defaults.spin_factor),
            (
                "min_vertical_component",
                &mut self.min_vertical_component,
                defaults.min_vertical_component,
            ),
            ("ball_radius", &mut self.ball_radius, defaults.ball_radius),
            ("paddle_speed", &mut self.paddle_speed, defaults.paddle_speed),
            ("paddle_half_height", &mut self.paddle_half_height, defaults.paddle_half_height),
            ("ai_move_speed", &mut self.ai_move_speed, defaults.ai_move_speed),
            ("ai_reaction_delay", &mut self.ai_reaction_delay, defaults.ai_reaction_delay),
            ("ai_random_offset", &mut self.ai_random_offset, defaults.ai_random_offset),
            ("serve_delay", &mut self.serve_delay, defaults.serve_delay),
            ("relaunch_delay", &mut self.relaunch_delay, defaults.relaunch_delay),
        ];
        for (name, value, fallback) in fields {
            if !value.is_finite() {
                log::warn!("Invalid {} ({}), using {}", name, value, fallback);
                *value = fallback;
            }
        }

        if !bottom.is_finite() || !top.is_finite() {
            log::warn!(
                "Invalid paddle bounds ({}, {}), using ({}, {})",
                bottom,
                top,
                default_bottom,
                default_top
            );
            self.paddle_bounds = defaults.paddle_bounds;
        }
    }
}
