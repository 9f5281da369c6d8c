//! Match state machine: score, win condition, pause-on-win

use serde::{Deserialize, Serialize};

use super::Side;
use crate::consts::DEFAULT_SCORE_TO_WIN;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Ball in play or waiting for the first serve
    Playing,
    /// A goal was scored; waiting for the relaunch
    GoalScored,
    /// Match decided, scores frozen
    GameOver,
}

/// Result of reporting a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalOutcome {
    /// Match already over; nothing changed
    Ignored,
    /// Score updated, match continues
    Scored,
    /// Score updated and the match is now decided
    Won(Side),
}

/// Score counters and phase for one match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    score_left: u32,
    score_right: u32,
    score_to_win: u32,
    phase: MatchPhase,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_TO_WIN)
    }
}

impl MatchState {
    pub fn new(score_to_win: u32) -> Self {
        Self {
            score_left: 0,
            score_right: 0,
            score_to_win: sanitize_score_to_win(score_to_win),
            phase: MatchPhase::Playing,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn score_to_win(&self) -> u32 {
        self.score_to_win
    }

    /// (left, right)
    pub fn score(&self) -> (u32, u32) {
        (self.score_left, self.score_right)
    }

    pub fn is_over(&self) -> bool {
        self.phase == MatchPhase::GameOver
    }

    /// Leading side once either score has reached the target.
    ///
    /// Both sides can be at or past a lowered target; the higher score wins
    /// and a tie goes to the right.
    pub fn winner(&self) -> Option<Side> {
        if self.score_left < self.score_to_win && self.score_right < self.score_to_win {
            return None;
        }
        if self.score_left > self.score_right {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// The single entry point for score changes
    pub fn register_goal(&mut self, side: Side) -> GoalOutcome {
        if self.is_over() {
            log::debug!("Goal for {:?} ignored, match already over", side);
            return GoalOutcome::Ignored;
        }

        match side {
            Side::Left => self.score_left += 1,
            Side::Right => self.score_right += 1,
        }
        self.recompute_phase();

        match self.winner() {
            Some(winner) => {
                log::info!(
                    "{:?} wins {}-{}",
                    winner,
                    self.score_left,
                    self.score_right
                );
                GoalOutcome::Won(winner)
            }
            None => GoalOutcome::Scored,
        }
    }

    /// Return to `Playing` after a goal (called on relaunch)
    pub fn resume(&mut self) {
        if self.phase == MatchPhase::GoalScored {
            self.phase = MatchPhase::Playing;
        }
    }

    /// Zero both scores and start over
    pub fn reset(&mut self) {
        self.score_left = 0;
        self.score_right = 0;
        self.phase = MatchPhase::Playing;
    }

    /// Change the target score; rejected once the match is over.
    ///
    /// Returns whether the new target was applied.
    pub fn set_score_to_win(&mut self, score_to_win: u32) -> bool {
        if self.is_over() {
            return false;
        }
        self.score_to_win = sanitize_score_to_win(score_to_win);
        // A lowered target can decide the match immediately
        if self.winner().is_some() {
            self.phase = MatchPhase::GameOver;
        }
        true
    }

    fn recompute_phase(&mut self) {
        self.phase = if self.winner().is_some() {
            MatchPhase::GameOver
        } else {
            MatchPhase::GoalScored
        };
    }
}

fn sanitize_score_to_win(score_to_win: u32) -> u32 {
    if score_to_win == 0 {
        log::warn!(
            "Invalid score to win (0), using {}",
            DEFAULT_SCORE_TO_WIN
        );
        DEFAULT_SCORE_TO_WIN
    } else {
        score_to_win
    }
}
