//! Bad-luck protection - creeping odds bonus after common streaks

use crate::config::BadLuckConfig;
use crate::rarity::Rarity;
use serde::{Deserialize, Serialize};

/// Consecutive Normal outcomes and the bonus they have built up
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BadLuckState {
    pub consecutive_normals: u32,
    /// Percentage fed into the next rarity roll
    pub bonus: f64,
}

impl BadLuckState {
    /// Update after a resolved tier
    pub fn record(&mut self, rarity: Rarity, config: &BadLuckConfig) {
        if rarity != Rarity::Normal {
            *self = BadLuckState::default();
            return;
        }

        self.consecutive_normals = self.consecutive_normals.saturating_add(1);
        if self.consecutive_normals > config.activation {
            self.bonus = (self.bonus + config.step).min(config.max_bonus);
        }
    }
}
