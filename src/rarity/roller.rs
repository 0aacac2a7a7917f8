//! Rarity roll with diminishing-returns magic find

use super::{Rarity, TierSet};
use crate::config::{RarityMultipliers, RarityTable, TierWeight};
use rand::Rng;

/// Non-Normal tiers in the order the roll checks them
const ROLL_ORDER: [Rarity; 4] = [Rarity::Legendary, Rarity::Set, Rarity::Rare, Rarity::Magic];

/// Diminishing-returns factor `(1 + mf/100) / (1 + mf/divisor)`
///
/// Strictly increasing in `magic_find` for `divisor > 100` and bounded
/// above by `divisor / 100`.
#[inline]
pub fn diminishing_factor(magic_find: f64, divisor: f64) -> f64 {
    let mf = magic_find.max(0.0);
    (1.0 + mf / 100.0) / (1.0 + mf / divisor)
}

/// Fold a table multiplier into magic find
///
/// The multiplier scales the `(1 + mf/100)` input term, so the boosted
/// tier still saturates at the same cap.
#[inline]
pub fn fold_multiplier(magic_find: f64, multiplier: f64) -> f64 {
    ((100.0 + magic_find.max(0.0)) * multiplier - 100.0).max(0.0)
}

impl RarityTable {
    #[inline]
    fn tier(&self, rarity: Rarity) -> Option<TierWeight> {
        match rarity {
            Rarity::Normal => None,
            Rarity::Magic => Some(self.magic),
            Rarity::Rare => Some(self.rare),
            Rarity::Set => Some(self.set),
            Rarity::Legendary => Some(self.legendary),
        }
    }

    /// Sum of all five base weights
    pub fn denominator(&self) -> f64 {
        self.normal
            + self.magic.weight
            + self.rare.weight
            + self.set.weight
            + self.legendary.weight
    }

    /// Weight of `rarity` after magic find scaling
    pub fn scaled_weight(&self, rarity: Rarity, magic_find: f64) -> f64 {
        match self.tier(rarity) {
            Some(tw) => tw.weight * diminishing_factor(magic_find, tw.divisor),
            None => self.normal,
        }
    }

    /// Probability of landing on `rarity` with no bad-luck bonus
    pub fn effective_chance(&self, rarity: Rarity, magic_find: f64) -> f64 {
        let denominator = self.denominator();
        if denominator <= 0.0 {
            return if rarity == Rarity::Normal { 1.0 } else { 0.0 };
        }
        match rarity {
            Rarity::Normal => {
                let taken: f64 = ROLL_ORDER
                    .iter()
                    .map(|r| self.scaled_weight(*r, magic_find))
                    .sum();
                ((denominator - taken) / denominator).max(0.0)
            }
            _ => self.scaled_weight(rarity, magic_find) / denominator,
        }
    }

    /// Summed non-Normal weight once magic find has fully saturated
    pub fn saturated_weight(&self) -> f64 {
        ROLL_ORDER
            .iter()
            .filter_map(|r| self.tier(*r))
            .map(|tw| tw.weight * tw.divisor / 100.0)
            .sum()
    }

    /// Upper bound `effective_chance` approaches as magic find grows
    pub fn chance_cap(&self, rarity: Rarity) -> f64 {
        let denominator = self.denominator();
        if denominator <= 0.0 {
            return 0.0;
        }
        match self.tier(rarity) {
            Some(tw) => tw.weight * tw.divisor / 100.0 / denominator,
            None => self.normal / denominator,
        }
    }
}

/// Inputs of a single rarity roll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RarityRoll {
    pub magic_find: f64,
    pub multipliers: RarityMultipliers,
    /// Bad-luck bonus in percent
    pub bad_luck_bonus: f64,
    pub permitted: TierSet,
}

impl RarityRoll {
    pub fn new(magic_find: f64) -> Self {
        Self {
            magic_find,
            multipliers: RarityMultipliers::default(),
            bad_luck_bonus: 0.0,
            permitted: TierSet::all(),
        }
    }

    pub fn with_multipliers(mut self, multipliers: RarityMultipliers) -> Self {
        self.multipliers = multipliers;
        self
    }

    pub fn with_bad_luck_bonus(mut self, bonus: f64) -> Self {
        self.bad_luck_bonus = bonus;
        self
    }

    pub fn with_permitted(mut self, permitted: TierSet) -> Self {
        self.permitted = permitted;
        self
    }

    /// Magic find seen by one tier after folding in the table multiplier
    #[inline]
    pub fn magic_find_for(&self, rarity: Rarity) -> f64 {
        let multiplier = match rarity {
            Rarity::Legendary => self.multipliers.legendary,
            Rarity::Set => self.multipliers.set,
            Rarity::Rare => self.multipliers.rare,
            Rarity::Magic | Rarity::Normal => 1.0,
        };
        fold_multiplier(self.magic_find, multiplier)
    }
}

/// Final weights of the non-Normal tiers, in roll order
///
/// A validated config keeps their sum within the table denominator, so no
/// tier is cut short by the ones checked before it.
pub fn effective_weights(table: &RarityTable, roll: &RarityRoll) -> [(Rarity, f64); 4] {
    let bonus = 1.0 + roll.bad_luck_bonus.max(0.0) / 100.0;
    ROLL_ORDER.map(|rarity| {
        let weight = if roll.permitted.contains(rarity) {
            table.scaled_weight(rarity, roll.magic_find_for(rarity)) * bonus
        } else {
            0.0
        };
        (rarity, weight)
    })
}

/// Roll one rarity tier; whatever the other tiers leave falls to Normal
pub fn roll_rarity<R: Rng + ?Sized>(table: &RarityTable, roll: &RarityRoll, rng: &mut R) -> Rarity {
    let denominator = table.denominator();
    if denominator <= 0.0 {
        return Rarity::Normal;
    }

    let mut random_value = rng.gen::<f64>() * denominator;
    for (rarity, weight) in effective_weights(table, roll) {
        if random_value < weight {
            return rarity;
        }
        random_value -= weight;
    }

    Rarity::Normal
}
