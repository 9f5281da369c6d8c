//! Simulation tick
//!
//! Core loop that advances the match one step: controllers first, then the
//! ball, then goal bookkeeping.

use super::Side;
use super::collision::ContactKind;
use super::events::GameEvent;
use super::paddle::ControlInput;
use super::score::GoalOutcome;
use super::state::GameState;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Discrete keys for one paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleKeys {
    pub up: bool,
    pub down: bool,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: PaddleKeys,
    pub right: PaddleKeys,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    pub fn keys(&self, side: Side) -> PaddleKeys {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Advance the game state by one step of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f64) {
    if input.pause && !state.match_state.is_over() {
        state.paused = !state.paused;
        log::info!("{}", if state.paused { "Paused" } else { "Resumed" });
    }

    // Frozen until externally restarted
    if state.paused || state.match_state.is_over() {
        return;
    }

    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    state.time_ticks += 1;
    state.now += dt;
    let now = state.now;

    // Serve timer
    if state.ball.poll_serve(now) {
        state.ball.launch(&mut state.rng);
        state.match_state.resume();
        state.events.emit(GameEvent::BallRelaunch);
        log::info!(
            "Ball served at {:.2}s toward {}",
            now,
            if state.ball.direction().x < 0.0 { "left" } else { "right" }
        );
    }

    // Paddles: an idle ball is not something to react to
    let ball_y = state.ball.is_in_play().then_some(state.ball.pos.y);
    for slot in &mut state.paddles {
        let keys = input.keys(slot.paddle.side);
        let control = ControlInput {
            now,
            dt,
            up: keys.up,
            down: keys.down,
            ball_y,
        };
        slot.controller
            .drive(&mut slot.paddle, &control, &mut state.rng);
    }

    // Ball
    let paddles = [
        state.paddles[0].paddle.clone(),
        state.paddles[1].paddle.clone(),
    ];
    let outcome = state.ball.step(dt, &state.arena, &paddles);

    for contact in &outcome.contacts {
        let with_paddle = matches!(contact.kind, ContactKind::Paddle(_));
        log::debug!(
            "Collision with {:?} at ({:.2}, {:.2}), speed {:.2}",
            contact.kind,
            contact.point.x,
            contact.point.y,
            state.ball.speed()
        );
        state.events.emit(GameEvent::Collision {
            with_paddle,
            point: contact.point,
        });
    }

    // Goal
    if let Some(scorer) = outcome.goal {
        state.events.emit(GameEvent::Goal { side: scorer });
        match state.match_state.register_goal(scorer) {
            GoalOutcome::Scored => {
                let (left, right) = state.match_state.score();
                log::info!("Goal for {:?}: {}-{}", scorer, left, right);
                state
                    .ball
                    .reset_to_center(Some(now + state.config.relaunch_delay));
            }
            GoalOutcome::Won(winner) => {
                state.events.emit(GameEvent::GameOver { winner });
                state.ball.reset_to_center(None);
            }
            GoalOutcome::Ignored => state.ball.reset_to_center(None),
        }
    }
}

/// Fixed-timestep driver: turns variable frame times into whole simulation steps
#[derive(Debug, Clone)]
pub struct FixedStep {
    pub dt: f64,
    pub max_substeps: u32,
    accumulator: f64,
    /// Pause press waiting for a step to consume it
    pending_pause: bool,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(dt: f64, max_substeps: u32) -> Self {
        Self {
            dt,
            max_substeps,
            accumulator: 0.0,
            pending_pause: false,
        }
    }

    /// Run as many fixed steps as `frame_dt` allows. Returns the number of
    /// steps taken.
    ///
    /// One-shot inputs (pause) are held until a step runs and are only seen
    /// by that first step. Time left over after `max_substeps` is dropped.
    pub fn advance(&mut self, state: &mut GameState, input: &TickInput, frame_dt: f64) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.pending_pause |= input.pause;

        let mut input = input.clone();
        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            input.pause = self.pending_pause;
            tick(state, &input, self.dt);
            self.accumulator -= self.dt;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.pending_pause = false;
        }

        if self.accumulator >= self.dt {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ball::BallPhase;
    use crate::sim::config::SimConfig;
    use crate::sim::paddle::Controller;
    use crate::sim::score::MatchPhase;
    use glam::DVec2;

    fn state_with(config: SimConfig, left: Controller, right: Controller) -> GameState {
        GameState::new(12345, config, left, right)
    }

    fn two_humans() -> GameState {
        let config = SimConfig::default();
        state_with(config.clone(), Controller::human(&config), Controller::human(&config))
    }

    /// Put the ball just short of the given goal line, heading into it
    fn aim_at_goal(state: &mut GameState, scorer: Side) {
        let x = state.arena.half_width - 0.01;
        let (pos, dir) = match scorer {
            Side::Left => (DVec2::new(x, 4.5), DVec2::X),
            Side::Right => (DVec2::new(-x, 4.5), DVec2::NEG_X),
        };
        state.ball.pos = pos;
        state.ball.set_motion(dir, 5.0);
    }

    #[test]
    fn test_serve_after_delay() {
        let mut state = two_humans();
        let input = TickInput::default();

        // 1.5s serve delay at 100 Hz
        for _ in 0..140 {
            tick(&mut state, &input, 0.01);
        }
        assert_eq!(state.ball.phase, BallPhase::Idle);
        assert!(state.drain_events().is_empty());

        for _ in 0..20 {
            tick(&mut state, &input, 0.01);
        }
        assert_eq!(state.ball.phase, BallPhase::InPlay);
        assert!(state.drain_events().contains(&GameEvent::BallRelaunch));
    }

    #[test]
    fn test_goal_scores_and_schedules_relaunch() {
        let mut state = two_humans();
        aim_at_goal(&mut state, Side::Right);

        tick(&mut state, &TickInput::default(), 0.01);

        assert_eq!(state.score(), (0, 1));
        assert_eq!(state.phase(), MatchPhase::GoalScored);
        assert_eq!(state.ball.phase, BallPhase::Idle);
        assert_eq!(state.ball.pos, DVec2::ZERO);
        let relaunch_at = state.ball.relaunch_at.unwrap();
        assert!((relaunch_at - (state.now + state.config.relaunch_delay)).abs() < 1e-12);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Goal { side: Side::Right }]
        );

        // Relaunch brings the match back to Playing
        let steps = (state.config.relaunch_delay / 0.01) as usize + 2;
        for _ in 0..steps {
            tick(&mut state, &TickInput::default(), 0.01);
        }
        assert_eq!(state.phase(), MatchPhase::Playing);
        assert!(state.ball.is_in_play());
    }

    #[test]
    fn test_first_to_three_ends_match() {
        let config = SimConfig {
            score_to_win: 3,
            ..Default::default()
        };
        let mut state = state_with(config.clone(), Controller::human(&config), Controller::ai(&config));

        for _ in 0..3 {
            aim_at_goal(&mut state, Side::Left);
            tick(&mut state, &TickInput::default(), 0.01);
        }

        assert_eq!(state.phase(), MatchPhase::GameOver);
        assert_eq!(state.score(), (3, 0));
        assert_eq!(state.winner(), Some(Side::Left));
        let events = state.drain_events();
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver { winner: Side::Left })
        );

        // Frozen: ticks do nothing, goals cannot be added
        let ticks = state.time_ticks;
        aim_at_goal(&mut state, Side::Left);
        tick(&mut state, &TickInput::default(), 0.01);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.score(), (3, 0));
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_restart_mid_delay_discards_relaunch() {
        let mut state = two_humans();
        aim_at_goal(&mut state, Side::Left);
        tick(&mut state, &TickInput::default(), 0.01);
        let stale = state.ball.relaunch_at.unwrap();

        // Restart a little later: the serve is re-armed from the restart time
        for _ in 0..50 {
            tick(&mut state, &TickInput::default(), 0.01);
        }
        state.restart();

        assert_eq!(state.score(), (0, 0));
        assert_eq!(state.phase(), MatchPhase::Playing);
        let fresh = state.ball.relaunch_at.unwrap();
        assert!(fresh > stale);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_restart_after_game_over() {
        let config = SimConfig {
            score_to_win: 1,
            ..Default::default()
        };
        let mut state = state_with(config.clone(), Controller::human(&config), Controller::human(&config));
        aim_at_goal(&mut state, Side::Right);
        tick(&mut state, &TickInput::default(), 0.01);
        assert_eq!(state.winner(), Some(Side::Right));

        state.restart();
        assert_eq!(state.winner(), None);
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), 0.01);
        assert_eq!(state.time_ticks, ticks + 1);
    }

    #[test]
    fn test_wall_and_paddle_events() {
        let mut state = two_humans();
        let left = state.paddle(Side::Left).paddle.clone();
        state.ball.pos = DVec2::new(left.x() + left.half_width + state.ball.radius + 0.01, 0.0);
        state.ball.set_motion(DVec2::NEG_X, 5.0);

        tick(&mut state, &TickInput::default(), 0.01);
        let events = state.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            GameEvent::Collision {
                with_paddle: true,
                ..
            }
        ));

        state.ball.pos = DVec2::new(0.0, state.arena.half_height - state.ball.radius - 0.01);
        state.ball.set_motion(DVec2::new(0.6, 0.8), 5.0);
        tick(&mut state, &TickInput::default(), 0.01);
        let events = state.drain_events();
        assert!(matches!(
            events.as_slice(),
            [GameEvent::Collision {
                with_paddle: false,
                ..
            }]
        ));
    }

    #[test]
    fn test_human_keys_move_paddles() {
        let mut state = two_humans();
        let input = TickInput {
            left: PaddleKeys { up: true, down: false },
            right: PaddleKeys { up: false, down: true },
            ..Default::default()
        };
        tick(&mut state, &input, 0.1);
        assert!(state.paddle_position(Side::Left) > 0.0);
        assert!(state.paddle_position(Side::Right) < 0.0);
    }

    #[test]
    fn test_ai_holds_still_while_ball_idle() {
        let config = SimConfig::default();
        let mut state = state_with(config.clone(), Controller::human(&config), Controller::ai(&config));
        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), 0.01);
        }
        assert_eq!(state.paddle_position(Side::Right), 0.0);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = two_humans();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause, 0.01);
        assert!(state.paused);
        let now = state.now;
        tick(&mut state, &TickInput::default(), 0.01);
        assert_eq!(state.now, now);

        tick(&mut state, &pause, 0.01);
        assert!(!state.paused);
        assert!(state.now > now);
    }

    #[test]
    fn test_fixed_step_accumulates() {
        let mut state = two_humans();
        let mut stepper = FixedStep::new(0.01, 8);

        assert_eq!(stepper.advance(&mut state, &TickInput::default(), 0.005), 0);
        assert_eq!(stepper.advance(&mut state, &TickInput::default(), 0.016), 2);
        // Large frames are clamped and capped
        assert_eq!(stepper.advance(&mut state, &TickInput::default(), 5.0), 8);
        assert_eq!(state.time_ticks, 10);
    }

    #[test]
    fn test_pause_press_survives_short_frames() {
        let mut state = two_humans();
        let mut stepper = FixedStep::new(0.01, 8);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        // Too short for a step: the press waits for the next frame
        assert_eq!(stepper.advance(&mut state, &pause, 0.004), 0);
        assert!(!state.paused);
        assert_eq!(stepper.advance(&mut state, &TickInput::default(), 0.008), 1);
        assert!(state.paused);

        // Consumed once, not replayed on later steps
        stepper.advance(&mut state, &TickInput::default(), 0.05);
        assert!(state.paused);
    }

    #[test]
    fn test_fixed_step_backlog_does_not_grow() {
        let mut state = two_humans();
        let mut stepper = FixedStep::default();

        // Slow host: every frame at the clamp, more time than 8 steps cover
        for _ in 0..50 {
            assert_eq!(stepper.advance(&mut state, &TickInput::default(), 0.1), MAX_SUBSTEPS);
            assert!(stepper.accumulator < stepper.dt);
        }
    }

    #[test]
    fn test_fast_ball_at_30fps_bounces_off_paddle() {
        let mut state = two_humans();
        state.ball.pos = DVec2::new(-7.55, 0.0);
        state.ball.set_motion(DVec2::NEG_X, state.ball.max_speed);

        tick(&mut state, &TickInput::default(), 1.0 / 30.0);
        let events = state.drain_events();
        assert!(matches!(
            events.as_slice(),
            [GameEvent::Collision {
                with_paddle: true,
                ..
            }]
        ));
        assert!(state.ball.direction().x > 0.0);

        for _ in 0..20 {
            tick(&mut state, &TickInput::default(), 1.0 / 30.0);
        }
        assert_eq!(state.score(), (0, 0));
    }

    #[test]
    fn test_non_finite_config_does_not_panic() {
        let config = SimConfig {
            paddle_bounds: (f64::NAN, f64::INFINITY),
            ai_random_offset: f64::NAN,
            serve_delay: 0.05,
            ..Default::default()
        };
        let mut state = state_with(config.clone(), Controller::ai(&config), Controller::ai(&config));
        for _ in 0..200 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.ball.is_in_play());
        for slot in &state.paddles {
            assert!(slot.paddle.y().is_finite());
        }
    }

    #[test]
    fn test_determinism() {
        // Two demo matches with the same seed play out identically
        let config = SimConfig::default();
        let mut a = state_with(config.clone(), Controller::ai(&config), Controller::ai(&config));
        let mut b = state_with(config.clone(), Controller::ai(&config), Controller::ai(&config));

        for _ in 0..2000 {
            tick(&mut a, &TickInput::default(), SIM_DT);
            tick(&mut b, &TickInput::default(), SIM_DT);
        }

        assert_eq!(a.snapshot(), b.snapshot());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: velocity magnitude always equals the ball's speed while in play
            #[test]
            fn prop_speed_invariant(seed in any::<u64>(), keys in proptest::collection::vec(any::<(bool, bool)>(), 1..200)) {
                let config = SimConfig {
                    serve_delay: 0.05,
                    relaunch_delay: 0.05,
                    ..Default::default()
                };
                let mut state = GameState::new(seed, config.clone(), Controller::human(&config), Controller::ai(&config));

                for (up, down) in keys {
                    let input = TickInput {
                        left: PaddleKeys { up, down },
                        ..Default::default()
                    };
                    for _ in 0..5 {
                        tick(&mut state, &input, SIM_DT);
                        let ball = &state.ball;
                        if ball.is_in_play() {
                            prop_assert!((ball.velocity().length() - ball.speed()).abs() < 1e-9);
                            prop_assert!(ball.speed() <= ball.max_speed);
                        } else {
                            prop_assert_eq!(ball.velocity(), DVec2::ZERO);
                        }
                        for slot in &state.paddles {
                            let y = slot.paddle.y();
                            prop_assert!(y >= slot.paddle.bounds_bottom && y <= slot.paddle.bounds_top);
                        }
                    }
                }
            }
        }
    }
}
