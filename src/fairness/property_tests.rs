//! Property tests for fairness module
//!
//! Bad-luck bonus follows `min(step * k, max)` past activation, and pity
//! counters only ever grow by one or reset to zero.

use proptest::prelude::*;

use crate::config::{BadLuckConfig, GenerationConfig, PityConfig};
use crate::fairness::{BadLuckState, FairnessTracker, PityState};
use crate::rarity::Rarity;

// ═══════════════════════════════════════════════════════════════════════════
// Strategy generators for property tests
// ═══════════════════════════════════════════════════════════════════════════

fn rarity_strategy() -> impl Strategy<Value = Rarity> {
    prop_oneof![
        4 => Just(Rarity::Normal),
        2 => Just(Rarity::Magic),
        1 => Just(Rarity::Rare),
        1 => Just(Rarity::Set),
        1 => Just(Rarity::Legendary),
    ]
}

fn bad_luck_config_strategy() -> impl Strategy<Value = BadLuckConfig> {
    (0..=20u32, 0..=40u32, 0..=400u32).prop_map(|(activation, step, max)| BadLuckConfig {
        activation,
        // quarter-percent steps keep the float sums exact
        step: step as f64 * 0.25,
        max_bonus: max as f64 * 0.25,
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Property Tests
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// After activation + k Normals the bonus is min(step * k, max)
    #[test]
    fn prop_bad_luck_formula(
        config in bad_luck_config_strategy(),
        k in 0..=60u32,
    ) {
        let mut state = BadLuckState::default();
        for _ in 0..(config.activation + k) {
            state.record(Rarity::Normal, &config);
        }
        let expected = (config.step * k as f64).min(config.max_bonus);
        prop_assert!((state.bonus - expected).abs() < 1e-9, "{} vs {}", state.bonus, expected);
        prop_assert_eq!(state.consecutive_normals, config.activation + k);
    }

    /// Any non-Normal outcome zeroes the bad-luck state
    #[test]
    fn prop_bad_luck_resets(
        config in bad_luck_config_strategy(),
        streak in 0..=80u32,
        tier in prop_oneof![
            Just(Rarity::Magic),
            Just(Rarity::Rare),
            Just(Rarity::Set),
            Just(Rarity::Legendary),
        ],
    ) {
        let mut state = BadLuckState::default();
        for _ in 0..streak {
            state.record(Rarity::Normal, &config);
        }
        state.record(tier, &config);
        prop_assert_eq!(state.consecutive_normals, 0);
        prop_assert_eq!(state.bonus, 0.0);
    }

    /// Pity counters step by one or reset, never decrement
    #[test]
    fn prop_pity_counters_step_or_reset(
        outcomes in prop::collection::vec(rarity_strategy(), 1..200),
    ) {
        let mut state = PityState::default();
        for rarity in outcomes {
            let before = state;
            state.record(rarity);
            for (old, new) in [
                (before.since_legendary, state.since_legendary),
                (before.since_set, state.since_set),
                (before.since_rare, state.since_rare),
            ] {
                prop_assert!(new == 0 || new == old + 1);
            }
            prop_assert_eq!(state.since_legendary == 0, rarity == Rarity::Legendary);
            prop_assert_eq!(state.since_set == 0, rarity == Rarity::Set);
            prop_assert_eq!(state.since_rare == 0, rarity.satisfies_rare());
        }
    }

    /// The tracker forces a tier exactly when its streak reaches the threshold
    #[test]
    fn prop_forced_tier_matches_threshold(
        threshold in 1..=50u32,
        misses in 0..=60u32,
    ) {
        let config = GenerationConfig {
            pity: PityConfig { legendary: Some(threshold), set: None, rare: None },
            ..GenerationConfig::default()
        };
        let mut tracker = FairnessTracker::default();
        for _ in 0..misses {
            tracker.record(Rarity::Magic, &config);
        }
        let forced = tracker.forced_tier(&config, true, true);
        if misses >= threshold {
            prop_assert_eq!(forced, Some(Rarity::Legendary));
        } else {
            prop_assert_eq!(forced, None);
        }
        // Without a qualifying legendary nothing is forced and nothing resets
        prop_assert_eq!(tracker.forced_tier(&config, false, true), None);
        prop_assert_eq!(tracker.pity.since_legendary, misses);
    }
}
