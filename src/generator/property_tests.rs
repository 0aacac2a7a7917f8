//! Property tests for generator module
//!
//! Item-level cap, affix bounds, pity guarantee and the long-run rarity mix.

use proptest::prelude::*;
use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::config::{BadLuckConfig, GenerationConfig, PityConfig, TierWeight};
use crate::generator::{LootGenerator, ITEM_LEVEL_CAP};
use crate::rarity::Rarity;
use crate::treasure::DropContext;

// ═══════════════════════════════════════════════════════════════════════════
// Strategy generators for property tests
// ═══════════════════════════════════════════════════════════════════════════

fn equipment_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("short_sword"),
        Just("war_axe"),
        Just("leather_cap"),
        Just("chain_mail"),
        Just("copper_ring"),
    ]
}

fn no_fairness() -> GenerationConfig {
    GenerationConfig {
        pity: PityConfig {
            legendary: None,
            set: None,
            rare: None,
        },
        bad_luck: BadLuckConfig {
            activation: 0,
            step: 0.0,
            max_bonus: 0.0,
        },
        ..Default::default()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Property Tests
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Items respect the level cap, affix bounds and group exclusivity
    #[test]
    fn prop_item_shape(
        base in equipment_strategy(),
        level in 1..=150u32,
        magic_find in 0.0..1000.0f64,
        seed in any::<u64>(),
    ) {
        let config = GenerationConfig::default().with_magic_find(magic_find);
        let mut generator = LootGenerator::with_seed(Catalog::builtin().unwrap(), config, seed).unwrap();
        let context = DropContext::new(level);

        for _ in 0..20 {
            let item = generator.generate_item(base, &context).unwrap().unwrap();
            prop_assert!(item.item_level <= ITEM_LEVEL_CAP);
            prop_assert_eq!(item.item_level, level.min(ITEM_LEVEL_CAP));

            let (_, max) = item.rarity.affix_count_range();
            prop_assert!(item.affixes.len() <= max);

            let groups: HashSet<&str> = item.affixes.iter().map(|a| a.group.as_str()).collect();
            prop_assert_eq!(groups.len(), item.affixes.len());

            if item.rarity.is_fixed_roll() {
                prop_assert!(item.affixes.is_empty());
                prop_assert!(!item.fixed_stats.is_empty());
            }
        }
    }

    /// With a qualifying legendary, generation N+1 is always Legendary
    #[test]
    fn prop_legendary_pity_guarantee(
        threshold in 1..=25u32,
        seed in any::<u64>(),
    ) {
        let mut config = no_fairness();
        config.pity.legendary = Some(threshold);
        config.rarity.legendary = TierWeight { weight: 0.0, divisor: 400.0 };
        let mut generator = LootGenerator::with_seed(Catalog::builtin().unwrap(), config, seed).unwrap();
        let context = DropContext::new(60);

        for _ in 0..threshold {
            let item = generator.generate_item("war_axe", &context).unwrap().unwrap();
            prop_assert_ne!(item.rarity, Rarity::Legendary);
        }
        let item = generator.generate_item("war_axe", &context).unwrap().unwrap();
        prop_assert_eq!(item.rarity, Rarity::Legendary);
        prop_assert!(item.forced);
    }

    /// The bad-luck bonus never leaves [0, max_bonus]
    #[test]
    fn prop_bad_luck_bonus_bounded(
        seed in any::<u64>(),
        level in 1..=60u32,
    ) {
        let config = GenerationConfig::default();
        let cap = config.bad_luck.max_bonus;
        let mut generator = LootGenerator::with_seed(Catalog::builtin().unwrap(), config, seed).unwrap();
        let context = DropContext::new(level);

        for _ in 0..100 {
            generator.generate_item("leather_cap", &context).unwrap();
            let bonus = generator.fairness().bad_luck.bonus;
            prop_assert!((0.0..=cap).contains(&bonus));
        }
    }
}

#[test]
fn test_long_run_rarity_mix() {
    // Level 1 has no legendary or set candidates, so their share falls to Normal
    let mut generator =
        LootGenerator::with_seed(Catalog::builtin().unwrap(), no_fairness(), 20_240_601).unwrap();
    let context = DropContext::new(1);

    let n = 100_000;
    let mut counts = [0usize; 5];
    for _ in 0..n {
        let item = generator.generate_item("short_sword", &context).unwrap().unwrap();
        counts[item.rarity as usize] += 1;
    }

    let share = |rarity: Rarity| counts[rarity as usize] as f64 / n as f64;
    assert!((share(Rarity::Normal) - 0.72).abs() < 0.02, "normal {}", share(Rarity::Normal));
    assert!((share(Rarity::Magic) - 0.22).abs() < 0.02, "magic {}", share(Rarity::Magic));
    assert!((share(Rarity::Rare) - 0.06).abs() < 0.02, "rare {}", share(Rarity::Rare));
    assert_eq!(counts[Rarity::Set as usize], 0);
    assert_eq!(counts[Rarity::Legendary as usize], 0);
}
