//! Per-session generation configuration

use crate::error::{LootError, Result};
use serde::{Deserialize, Serialize};

/// Difficulty tag of the content the drop comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Normal,
    Nightmare,
    Hell,
}

impl Difficulty {
    /// Scale applied to the currency base amount
    #[inline]
    pub fn currency_multiplier(self) -> f64 {
        match self {
            Difficulty::Normal => 1.0,
            Difficulty::Nightmare => 1.5,
            Difficulty::Hell => 2.0,
        }
    }
}

/// Streak lengths after which a tier is forced; `None` disables that tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PityConfig {
    pub legendary: Option<u32>,
    pub set: Option<u32>,
    pub rare: Option<u32>,
}

impl Default for PityConfig {
    fn default() -> Self {
        Self {
            legendary: Some(200),
            set: Some(150),
            rare: Some(30),
        }
    }
}

/// Bad-luck protection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BadLuckConfig {
    /// Consecutive Normal outcomes before the bonus starts growing
    pub activation: u32,
    /// Percentage added per Normal outcome past activation
    pub step: f64,
    /// Upper bound of the accumulated percentage
    pub max_bonus: f64,
}

impl Default for BadLuckConfig {
    fn default() -> Self {
        Self {
            activation: 10,
            step: 5.0,
            max_bonus: 90.0,
        }
    }
}

/// Base weight and saturation divisor for one non-Normal tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierWeight {
    pub weight: f64,
    /// Magic find saturates this tier at a multiplier of `divisor / 100`
    pub divisor: f64,
}

/// Base rarity distribution
///
/// The roll denominator is the sum of all five base weights; Normal keeps
/// whatever the other tiers leave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RarityTable {
    pub normal: f64,
    pub magic: TierWeight,
    pub rare: TierWeight,
    pub set: TierWeight,
    pub legendary: TierWeight,
}

impl Default for RarityTable {
    fn default() -> Self {
        Self {
            normal: 700.0,
            magic: TierWeight {
                weight: 220.0,
                divisor: 150.0,
            },
            rare: TierWeight {
                weight: 60.0,
                divisor: 200.0,
            },
            set: TierWeight {
                weight: 12.0,
                divisor: 300.0,
            },
            legendary: TierWeight {
                weight: 8.0,
                divisor: 400.0,
            },
        }
    }
}

/// Generation configuration supplied once per session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub magic_find: f64,
    pub owner_level: u32,
    pub group_size: u32,
    pub difficulty: Difficulty,
    pub pity: PityConfig,
    pub bad_luck: BadLuckConfig,
    pub rarity: RarityTable,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            magic_find: 0.0,
            owner_level: 1,
            group_size: 1,
            difficulty: Difficulty::Normal,
            pity: PityConfig::default(),
            bad_luck: BadLuckConfig::default(),
            rarity: RarityTable::default(),
        }
    }
}

impl GenerationConfig {
    /// Parse and validate a config from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GenerationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_magic_find(mut self, magic_find: f64) -> Self {
        self.magic_find = magic_find;
        self
    }

    /// Reject values the rolling math cannot handle
    pub fn validate(&self) -> Result<()> {
        if !self.magic_find.is_finite() || self.magic_find < 0.0 {
            return Err(invalid(format!(
                "magic_find must be a finite value >= 0, got {}",
                self.magic_find
            )));
        }
        if self.group_size == 0 {
            return Err(invalid("group_size must be at least 1".to_string()));
        }

        for (tier, threshold) in [
            ("legendary", self.pity.legendary),
            ("set", self.pity.set),
            ("rare", self.pity.rare),
        ] {
            if threshold == Some(0) {
                return Err(invalid(format!(
                    "{} pity threshold must be positive (use null to disable)",
                    tier
                )));
            }
        }

        let bad_luck = &self.bad_luck;
        if !bad_luck.step.is_finite() || bad_luck.step < 0.0 {
            return Err(invalid(format!("bad_luck.step invalid: {}", bad_luck.step)));
        }
        if !bad_luck.max_bonus.is_finite() || bad_luck.max_bonus < 0.0 {
            return Err(invalid(format!(
                "bad_luck.max_bonus invalid: {}",
                bad_luck.max_bonus
            )));
        }

        let rarity = &self.rarity;
        if !rarity.normal.is_finite() || rarity.normal < 0.0 {
            return Err(invalid(format!("rarity.normal invalid: {}", rarity.normal)));
        }
        for (tier, tw) in [
            ("magic", rarity.magic),
            ("rare", rarity.rare),
            ("set", rarity.set),
            ("legendary", rarity.legendary),
        ] {
            if !tw.weight.is_finite() || tw.weight < 0.0 {
                return Err(invalid(format!("rarity.{}.weight invalid: {}", tier, tw.weight)));
            }
            // divisor <= 100 would make magic find lower the odds
            if !tw.divisor.is_finite() || tw.divisor <= 100.0 {
                return Err(invalid(format!(
                    "rarity.{}.divisor must exceed 100, got {}",
                    tier, tw.divisor
                )));
            }
        }

        // Every tier fully saturated and boosted must still fit in the roll,
        // otherwise later tiers get cut off by earlier ones
        let ceiling = rarity.saturated_weight() * (1.0 + bad_luck.max_bonus / 100.0);
        if ceiling > rarity.denominator() {
            return Err(invalid(format!(
                "rarity weights at full magic find and bad-luck bonus reach {:.1}, above the roll total {:.1}",
                ceiling,
                rarity.denominator()
            )));
        }

        Ok(())
    }
}

fn invalid(msg: String) -> LootError {
    LootError::InvalidConfig(msg)
}
