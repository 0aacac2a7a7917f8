//! Affix selection - weighted draws without replacement

use crate::config::{Affix, AffixSlot, ItemType, RolledStat, StatModifier};
use crate::rarity::Rarity;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// An affix instance on a generated item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolledAffix {
    pub affix_id: String,
    pub name: String,
    pub slot: AffixSlot,
    pub group: String,
    pub values: SmallVec<[RolledStat; 2]>,
}

/// Affixes of one item, prefixes first
pub type AffixList = SmallVec<[RolledAffix; 6]>;

/// Roll a concrete value uniformly in `[min, max]`
#[inline]
pub fn roll_modifier<R: Rng + ?Sized>(modifier: &StatModifier, rng: &mut R) -> RolledStat {
    let (low, high) = if modifier.min <= modifier.max {
        (modifier.min, modifier.max)
    } else {
        (modifier.max, modifier.min)
    };
    RolledStat {
        stat: modifier.stat,
        value: rng.gen_range(low..=high),
        percent: modifier.percent,
    }
}

/// Decide how many prefixes and suffixes an item of `rarity` wants
pub fn split_affix_count<R: Rng + ?Sized>(rarity: Rarity, rng: &mut R) -> (usize, usize) {
    let (min, max) = rarity.affix_count_range();
    if max == 0 {
        return (0, 0);
    }
    let total = rng.gen_range(min..=max);

    match rarity {
        Rarity::Magic => {
            let prefixes = usize::from(rng.gen_bool(0.5)).min(total);
            (prefixes, total - prefixes)
        }
        Rarity::Rare => {
            let prefixes = rng.gen_range(1..=3usize).min(total);
            (prefixes, (total - prefixes).min(3))
        }
        _ => (0, 0),
    }
}

/// Affixes of `slot` that may roll on this item, in catalog order
pub fn eligible_affixes<'a>(
    affixes: &'a [Affix],
    slot: AffixSlot,
    item_type: ItemType,
    item_level: u32,
) -> Vec<&'a Affix> {
    affixes
        .iter()
        .filter(|a| a.slot == slot && a.is_eligible(item_type, item_level))
        .collect()
}

/// Draw up to `count` affixes by weight, never repeating a group
///
/// Groups already in `used_groups` are skipped, and each pick adds its group.
fn draw_without_replacement<'a, R: Rng + ?Sized>(
    mut candidates: Vec<&'a Affix>,
    count: usize,
    used_groups: &mut Vec<&'a str>,
    rng: &mut R,
) -> Vec<&'a Affix> {
    candidates.retain(|a| !used_groups.contains(&a.group.as_str()));

    let mut chosen = Vec::with_capacity(count);
    while chosen.len() < count {
        let total_weight: u64 = candidates.iter().map(|a| a.weight as u64).sum();
        if total_weight == 0 {
            break;
        }

        let mut random_value = rng.gen_range(0..total_weight);
        let mut picked = candidates.len() - 1;
        for (index, affix) in candidates.iter().enumerate() {
            let weight = affix.weight as u64;
            if random_value < weight {
                picked = index;
                break;
            }
            random_value -= weight;
        }

        let affix = candidates.swap_remove(picked);
        used_groups.push(affix.group.as_str());
        candidates.retain(|a| a.group != affix.group);
        chosen.push(affix);
    }

    chosen
}

/// Select and roll affixes for an item
///
/// Returns fewer affixes than the rarity asks for when the eligible pool runs
/// dry; never errors.
pub fn select_affixes<R: Rng + ?Sized>(
    affixes: &[Affix],
    item_type: ItemType,
    item_level: u32,
    rarity: Rarity,
    rng: &mut R,
) -> AffixList {
    let (prefix_count, suffix_count) = split_affix_count(rarity, rng);
    if prefix_count + suffix_count == 0 {
        return AffixList::new();
    }

    let mut used_groups: Vec<&str> = Vec::with_capacity(prefix_count + suffix_count);
    let prefixes = draw_without_replacement(
        eligible_affixes(affixes, AffixSlot::Prefix, item_type, item_level),
        prefix_count,
        &mut used_groups,
        rng,
    );
    let suffixes = draw_without_replacement(
        eligible_affixes(affixes, AffixSlot::Suffix, item_type, item_level),
        suffix_count,
        &mut used_groups,
        rng,
    );

    prefixes
        .into_iter()
        .chain(suffixes)
        .map(|affix| RolledAffix {
            affix_id: affix.id.clone(),
            name: affix.name.clone(),
            slot: affix.slot,
            group: affix.group.clone(),
            values: affix
                .modifiers
                .iter()
                .map(|m| roll_modifier(m, rng))
                .collect(),
        })
        .collect()
}
