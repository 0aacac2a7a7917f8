//! Rarity tiers and the weighted rarity roll

mod roller;


pub use roller::*;

use serde::{Deserialize, Serialize};

/// Rarity tier of a generated item
///
/// The ordering is for comparison and sorting only; Set and Legendary
/// compete independently in the roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Normal,
    Magic,
    Rare,
    Set,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Normal,
        Rarity::Magic,
        Rarity::Rare,
        Rarity::Set,
        Rarity::Legendary,
    ];

    /// Inclusive (min, max) number of rolled affixes for this tier
    #[inline]
    pub fn affix_count_range(self) -> (usize, usize) {
        match self {
            Rarity::Normal => (0, 0),
            Rarity::Magic => (1, 2),
            Rarity::Rare => (3, 6),
            // Fixed-roll tiers never take random affixes
            Rarity::Set | Rarity::Legendary => (0, 0),
        }
    }

    /// Tiers drawn from the legendary/set catalogs instead of base items
    #[inline]
    pub fn is_fixed_roll(self) -> bool {
        matches!(self, Rarity::Set | Rarity::Legendary)
    }

    /// Counts as "at least Rare" for rare pity purposes
    #[inline]
    pub fn satisfies_rare(self) -> bool {
        matches!(self, Rarity::Rare | Rarity::Set | Rarity::Legendary)
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of tiers a roll may land on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TierSet(u8);

impl TierSet {
    pub fn all() -> Self {
        Rarity::ALL.iter().fold(TierSet(0), |set, r| set.with(*r))
    }

    pub fn only(rarity: Rarity) -> Self {
        TierSet(rarity.bit())
    }

    #[must_use]
    pub fn with(self, rarity: Rarity) -> Self {
        TierSet(self.0 | rarity.bit())
    }

    #[must_use]
    pub fn without(self, rarity: Rarity) -> Self {
        TierSet(self.0 & !rarity.bit())
    }

    #[inline]
    pub fn contains(self, rarity: Rarity) -> bool {
        self.0 & rarity.bit() != 0
    }
}

impl Default for TierSet {
    fn default() -> Self {
        TierSet::all()
    }
}
