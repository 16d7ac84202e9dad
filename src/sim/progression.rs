//! Score and altitude progression
//!
//! Altitude is not a physical quantity: it grows by exactly the same gain as
//! the score, so difficulty tracks how long the player has survived.

use serde::{Deserialize, Serialize};

use super::buffs::BuffKind;
use super::state::PlayerState;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    /// Monotonic proxy for distance travelled
    pub altitude: f32,
}

impl Progression {
    /// Advance one fixed simulation step. Returns the gain applied.
    ///
    /// The gain is per step, not scaled by wall-clock time.
    pub fn advance(&mut self, player: &mut PlayerState, tuning: &Tuning) -> f32 {
        let gain = if player.buffs.is_active(BuffKind::DoubleScore) {
            tuning.double_gain
        } else {
            tuning.base_gain
        };
        player.score += gain;
        self.altitude += gain;
        gain
    }

    pub fn reset(&mut self) {
        self.altitude = 0.0;
    }
}
