//! Drop fairness: pity counters and bad-luck protection
//!
//! One [`FairnessTracker`] belongs to one generator session. It is plain
//! mutable state; sharing it between threads needs external serialization.

mod bad_luck;
mod pity;

#[cfg(test)]
mod property_tests;

pub use bad_luck::*;
pub use pity::*;

use crate::config::GenerationConfig;
use crate::rarity::Rarity;
use serde::{Deserialize, Serialize};

/// Pity and bad-luck state of one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FairnessTracker {
    pub pity: PityState,
    pub bad_luck: BadLuckState,
}

impl FairnessTracker {
    pub fn new(pity: PityState, bad_luck: BadLuckState) -> Self {
        Self { pity, bad_luck }
    }

    /// Tier forced by pity for the next generation, if any
    #[inline]
    pub fn forced_tier(
        &self,
        config: &GenerationConfig,
        legendary_available: bool,
        set_available: bool,
    ) -> Option<Rarity> {
        self.pity
            .forced_tier(&config.pity, legendary_available, set_available)
    }

    /// Bad-luck percentage for the next roll
    #[inline]
    pub fn bonus(&self) -> f64 {
        self.bad_luck.bonus
    }

    /// Record a resolved tier, forced or rolled
    pub fn record(&mut self, rarity: Rarity, config: &GenerationConfig) {
        self.pity.record(rarity);
        self.bad_luck.record(rarity, &config.bad_luck);
    }
}
