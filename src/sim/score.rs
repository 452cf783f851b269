//! Score accounting
//!
//! Only net progress counts: the score grows by the improvement whenever
//! the player betters the run's best (lowest, since y grows downward)
//! position. Oscillating past an already-reached height adds nothing, so
//! the score is monotonically non-decreasing by construction.

use crate::config::Config;

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreAccountant {
    score: f32,
    /// Best (minimum) y reached this run; None until the first update
    best_y: Option<f32>,
}

impl ScoreAccountant {
    pub fn update(&mut self, player_y: f32) {
        match self.best_y {
            Some(best) if player_y < best => {
                self.score += best - player_y;
                self.best_y = Some(player_y);
            }
            None => self.best_y = Some(player_y),
            _ => {}
        }
    }

    pub fn value(&self) -> f32 {
        self.score
    }

    /// Capped-linear difficulty factor consumed by the spawn director.
    pub fn difficulty_factor(&self, config: &Config) -> f32 {
        (self.score / config.difficulty_divisor).min(config.difficulty_cap)
    }

    pub fn reset(&mut self) {
        self.score = 0.0;
        self.best_y = None;
    }
}
