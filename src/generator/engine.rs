//! Loot generator session

use super::assembler::{assemble_item, ItemRequest};
use super::result::{GeneratedItem, LootResult};
use crate::catalog::Catalog;
use crate::config::{GenerationConfig, RarityMultipliers};
use crate::error::{LootError, Result};
use crate::fairness::{BadLuckState, FairnessTracker, PityState};
use crate::treasure::{DropContext, Resolver};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// One logical generation session
///
/// Owns the fairness counters and random source of a single player. The
/// catalog is shared; everything else is exclusive to the session.
#[derive(Debug, Clone)]
pub struct LootGenerator {
    catalog: Arc<Catalog>,
    config: GenerationConfig,
    tracker: FairnessTracker,
    rng: StdRng,
}

impl LootGenerator {
    /// Create a session seeded from OS entropy
    pub fn new(catalog: Arc<Catalog>, config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(catalog, config, StdRng::from_entropy()))
    }

    /// Create a reproducible session
    pub fn with_seed(catalog: Arc<Catalog>, config: GenerationConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(
            catalog,
            config,
            StdRng::seed_from_u64(seed),
        ))
    }

    pub(crate) fn from_validated(
        catalog: Arc<Catalog>,
        config: GenerationConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            catalog,
            config,
            tracker: FairnessTracker::default(),
            rng,
        }
    }

    #[inline]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[inline]
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Replace the config; the old one stays when validation fails
    pub fn set_config(&mut self, config: GenerationConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn set_magic_find(&mut self, magic_find: f64) -> Result<()> {
        let config = self.config.clone().with_magic_find(magic_find);
        self.set_config(config)
    }

    /// Current fairness counters
    #[inline]
    pub fn fairness(&self) -> FairnessTracker {
        self.tracker
    }

    /// Continue from counters persisted by the host
    pub fn restore_fairness(&mut self, pity: PityState, bad_luck: BadLuckState) {
        self.tracker = FairnessTracker::new(pity, bad_luck);
    }

    /// Resolve a treasure table
    pub fn resolve(&mut self, table_id: &str, context: &DropContext) -> Result<LootResult> {
        Resolver::new(&self.catalog, &self.config, &mut self.tracker, &mut self.rng)
            .resolve(table_id, context)
    }

    /// Assemble one item from a base id without going through a table
    pub fn generate_item(
        &mut self,
        base_id: &str,
        context: &DropContext,
    ) -> Result<Option<GeneratedItem>> {
        let base = self
            .catalog
            .base_item(base_id)
            .ok_or_else(|| LootError::UnknownItem(base_id.to_string()))?;
        let request = ItemRequest {
            base,
            context,
            multipliers: RarityMultipliers::default(),
        };
        Ok(assemble_item(
            &self.catalog,
            &self.config,
            &mut self.tracker,
            &request,
            &mut self.rng,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PityConfig, RarityTable, TierWeight};
    use crate::rarity::Rarity;

    fn builtin() -> Arc<Catalog> {
        Catalog::builtin().unwrap()
    }

    fn no_pity() -> PityConfig {
        PityConfig {
            legendary: None,
            set: None,
            rare: None,
        }
    }

    #[test]
    fn test_legendary_pity_fires_on_next_generation() {
        let threshold = 5;
        let mut rarity = RarityTable::default();
        rarity.legendary = TierWeight {
            weight: 0.0,
            divisor: 400.0,
        };
        let config = GenerationConfig {
            pity: PityConfig {
                legendary: Some(threshold),
                ..no_pity()
            },
            rarity,
            ..Default::default()
        };
        let mut generator = LootGenerator::with_seed(builtin(), config, 42).unwrap();
        let context = DropContext::new(50);

        for _ in 0..threshold {
            let item = generator.generate_item("short_sword", &context).unwrap().unwrap();
            assert_ne!(item.rarity, Rarity::Legendary);
            assert!(!item.forced);
        }
        assert_eq!(generator.fairness().pity.since_legendary, threshold);

        let item = generator.generate_item("short_sword", &context).unwrap().unwrap();
        assert_eq!(item.rarity, Rarity::Legendary);
        assert!(item.forced);
        assert_eq!(generator.fairness().pity.since_legendary, 0);
        assert_eq!(generator.fairness().pity.since_rare, 0);
    }

    #[test]
    fn test_legendary_pity_waits_for_candidate() {
        let config = GenerationConfig {
            pity: PityConfig {
                legendary: Some(1),
                ..no_pity()
            },
            ..Default::default()
        };
        let mut generator = LootGenerator::with_seed(builtin(), config, 9).unwrap();
        // Nothing legendary can drop below level 12
        let context = DropContext::new(5);

        for _ in 0..20 {
            let item = generator.generate_item("short_sword", &context).unwrap().unwrap();
            assert_ne!(item.rarity, Rarity::Legendary);
        }
        assert_eq!(generator.fairness().pity.since_legendary, 20);
    }

    #[test]
    fn test_rare_pity_forces_rare() {
        let mut rarity = RarityTable::default();
        rarity.magic.weight = 0.0;
        rarity.rare.weight = 0.0;
        let config = GenerationConfig {
            pity: PityConfig {
                rare: Some(3),
                ..no_pity()
            },
            rarity,
            ..Default::default()
        };
        let mut generator = LootGenerator::with_seed(builtin(), config, 1).unwrap();
        let context = DropContext::new(5);

        let tiers: Vec<Rarity> = (0..8)
            .map(|_| {
                generator
                    .generate_item("leather_cap", &context)
                    .unwrap()
                    .unwrap()
                    .rarity
            })
            .collect();
        assert_eq!(
            tiers,
            vec![
                Rarity::Normal,
                Rarity::Normal,
                Rarity::Normal,
                Rarity::Rare,
                Rarity::Normal,
                Rarity::Normal,
                Rarity::Normal,
                Rarity::Rare,
            ]
        );
    }

    #[test]
    fn test_same_seed_same_loot() {
        let config = GenerationConfig::default().with_magic_find(300.0);
        let mut a = LootGenerator::with_seed(builtin(), config.clone(), 1234).unwrap();
        let mut b = LootGenerator::with_seed(builtin(), config, 1234).unwrap();
        let context = DropContext::new(40).boss();

        for _ in 0..25 {
            let left = a.resolve("boss_warlord", &context).unwrap();
            let right = b.resolve("boss_warlord", &context).unwrap();
            assert_eq!(
                serde_json::to_string(&left).unwrap(),
                serde_json::to_string(&right).unwrap()
            );
        }
    }

    #[test]
    fn test_result_carries_fairness_snapshot() {
        let mut generator =
            LootGenerator::with_seed(builtin(), GenerationConfig::default(), 5).unwrap();
        let result = generator
            .resolve("equipment_low", &DropContext::new(10))
            .unwrap();
        assert_eq!(result.pity, generator.fairness().pity);
        assert_eq!(result.bad_luck, generator.fairness().bad_luck);
    }

    #[test]
    fn test_unknown_base_item() {
        let mut generator =
            LootGenerator::with_seed(builtin(), GenerationConfig::default(), 5).unwrap();
        assert_eq!(
            generator
                .generate_item("excalibur", &DropContext::new(10))
                .unwrap_err(),
            LootError::UnknownItem("excalibur".to_string())
        );
    }

    #[test]
    fn test_set_config_validates() {
        let mut generator =
            LootGenerator::with_seed(builtin(), GenerationConfig::default(), 5).unwrap();
        assert!(generator.set_magic_find(-10.0).is_err());
        assert_eq!(generator.config().magic_find, 0.0);
        generator.set_magic_find(250.0).unwrap();
        assert_eq!(generator.config().magic_find, 250.0);
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let config = GenerationConfig {
            group_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            LootGenerator::with_seed(builtin(), config, 1),
            Err(LootError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_restore_fairness() {
        let mut generator =
            LootGenerator::with_seed(builtin(), GenerationConfig::default(), 5).unwrap();
        let pity = PityState {
            since_legendary: 7,
            since_set: 3,
            since_rare: 2,
        };
        let bad_luck = BadLuckState {
            consecutive_normals: 12,
            bonus: 10.0,
        };
        generator.restore_fairness(pity, bad_luck);
        assert_eq!(generator.fairness().pity, pity);
        assert_eq!(generator.fairness().bad_luck, bad_luck);
    }
}
