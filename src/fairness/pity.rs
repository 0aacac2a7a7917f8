//! Pity counters - forced tiers after long dry streaks

use crate::config::PityConfig;
use crate::rarity::Rarity;
use serde::{Deserialize, Serialize};

/// Consecutive generations since each tier last dropped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PityState {
    pub since_legendary: u32,
    pub since_set: u32,
    pub since_rare: u32,
}

/// Streak counter: reset on a hit, otherwise one more miss
#[inline]
fn advance(counter: u32, hit: bool) -> u32 {
    if hit {
        0
    } else {
        counter.saturating_add(1)
    }
}

#[inline]
fn reached(counter: u32, threshold: Option<u32>) -> bool {
    threshold.is_some_and(|t| counter >= t)
}

impl PityState {
    /// Tier the next generation must take, if any
    ///
    /// Legendary and Set are only forced when a candidate exists at the
    /// drop level; otherwise their counters stay where they are.
    pub fn forced_tier(
        &self,
        config: &PityConfig,
        legendary_available: bool,
        set_available: bool,
    ) -> Option<Rarity> {
        if legendary_available && reached(self.since_legendary, config.legendary) {
            return Some(Rarity::Legendary);
        }
        if set_available && reached(self.since_set, config.set) {
            return Some(Rarity::Set);
        }
        if reached(self.since_rare, config.rare) {
            return Some(Rarity::Rare);
        }
        None
    }

    /// Update all counters after a resolved tier
    pub fn record(&mut self, rarity: Rarity) {
        self.since_legendary = advance(self.since_legendary, rarity == Rarity::Legendary);
        self.since_set = advance(self.since_set, rarity == Rarity::Set);
        self.since_rare = advance(self.since_rare, rarity.satisfies_rare());
    }
}
