//! Paddle Duel headless runner
//!
//! Plays one AI-vs-AI match on the fixed-step loop and prints the final
//! snapshot as JSON. Useful for soak-testing tuning and for replaying seeds.

use std::time::{SystemTime, UNIX_EPOCH};

use paddle_duel::consts::SIM_DT;
use paddle_duel::sim::{FixedStep, GameEvent, TickInput};
use paddle_duel::{GameMode, Settings};

/// Give up on matches that never finish (simulated seconds)
const MAX_MATCH_TIME: f64 = 3600.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Paddle Duel (headless) starting...");

    let mut settings = Settings::load();
    if settings.mode != GameMode::Demo {
        log::info!(
            "No input devices in headless mode, playing {} as demo",
            settings.mode.as_str()
        );
        settings.mode = GameMode::Demo;
    }

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Match seed: {}", seed);

    let mut state = settings.new_game(seed);
    let mut stepper = FixedStep::default();
    let input = TickInput::default();

    while state.winner().is_none() && state.now < MAX_MATCH_TIME {
        // Frames arrive at exactly the sim rate, so every advance is one step
        stepper.advance(&mut state, &input, SIM_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::Goal { side } => {
                    let (left, right) = state.score();
                    log::info!("{:?} scores ({}-{})", side, left, right);
                }
                GameEvent::GameOver { winner } => log::info!("{:?} wins", winner),
                GameEvent::BallRelaunch => log::debug!("Serve at {:.2}s", state.now),
                GameEvent::Collision { .. } => {}
            }
        }
    }

    if state.winner().is_none() {
        log::warn!("Match did not finish within {}s", MAX_MATCH_TIME);
    }

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(err) => log::error!("Failed to serialize snapshot: {}", err),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Headless runner is native only; embedders drive `sim::tick` themselves
}
