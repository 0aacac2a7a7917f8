//! Item assembly: rarity, affixes or fixed rolls, naming

use super::result::{GeneratedItem, ItemSource};
use crate::affix::{roll_modifier, select_affixes, AffixList};
use crate::catalog::Catalog;
use crate::config::{
    AffixSlot, BaseItem, GenerationConfig, ItemType, LegendaryItem, RarityMultipliers, RolledStat,
    SetItem, StatModifier,
};
use crate::fairness::FairnessTracker;
use crate::rarity::{roll_rarity, Rarity, RarityRoll, TierSet};
use crate::treasure::DropContext;
use rand::seq::SliceRandom;
use rand::Rng;

/// Highest item level any drop can have
pub const ITEM_LEVEL_CAP: u32 = 99;

/// Largest stack a single drop can produce
pub const MAX_DROP_STACK: u32 = 5;

/// One item slot to fill
#[derive(Debug, Clone, Copy)]
pub struct ItemRequest<'a> {
    pub base: &'a BaseItem,
    pub context: &'a DropContext,
    /// Boosts of the table the item came from
    pub multipliers: RarityMultipliers,
}

/// Build one item for `request`, updating the session's fairness state
///
/// Returns `None` when a Legendary or Set tier was decided but no candidate
/// qualifies; fairness is left untouched in that case.
pub fn assemble_item<R: Rng + ?Sized>(
    catalog: &Catalog,
    config: &GenerationConfig,
    tracker: &mut FairnessTracker,
    request: &ItemRequest<'_>,
    rng: &mut R,
) -> Option<GeneratedItem> {
    let base = request.base;
    let context = request.context;
    let item_level = context.source_level.min(ITEM_LEVEL_CAP);

    if !base.item_type.is_equipment() {
        return Some(plain_item(base, item_level, rng));
    }

    let legendaries = catalog.legendary_candidates(context.source_level, context.item_type);
    let set_pieces = catalog.set_candidates(context.source_level, context.item_type);

    let forced = tracker.forced_tier(config, !legendaries.is_empty(), !set_pieces.is_empty());
    let rarity = match forced {
        Some(tier) => {
            tracing::info!(
                rarity = ?tier,
                base = %base.id,
                pity = ?tracker.pity,
                "pity forced rarity"
            );
            tier
        }
        None => {
            let mut permitted = TierSet::all();
            if legendaries.is_empty() {
                permitted = permitted.without(Rarity::Legendary);
            }
            if set_pieces.is_empty() {
                permitted = permitted.without(Rarity::Set);
            }
            let roll = RarityRoll::new(config.magic_find)
                .with_multipliers(request.multipliers)
                .with_bad_luck_bonus(tracker.bonus())
                .with_permitted(permitted);
            roll_rarity(&config.rarity, &roll, rng)
        }
    };

    let item = match rarity {
        Rarity::Legendary => {
            let Some(legendary) = legendaries.choose(rng) else {
                tracing::warn!(level = context.source_level, "no legendary candidate, nothing produced");
                return None;
            };
            legendary_item(legendary, item_level, rng)
        }
        Rarity::Set => {
            let Some(piece) = set_pieces.choose(rng) else {
                tracing::warn!(level = context.source_level, "no set candidate, nothing produced");
                return None;
            };
            let set_name = catalog.set(&piece.set_id).map(|s| s.name.as_str());
            set_piece_item(piece, set_name, item_level, rng)
        }
        Rarity::Normal | Rarity::Magic | Rarity::Rare => {
            base_item(catalog, base, rarity, item_level, rng)
        }
    };

    tracker.record(rarity, config);

    tracing::debug!(
        name = %item.name,
        rarity = ?item.rarity,
        item_level,
        forced = forced.is_some(),
        "assembled item"
    );

    Some(GeneratedItem {
        forced: forced.is_some(),
        ..item
    })
}

/// Display name: first prefix, base name, first suffix
pub fn compose_name(base_name: &str, affixes: &AffixList) -> String {
    let prefix = affixes.iter().find(|a| a.slot == AffixSlot::Prefix);
    let suffix = affixes.iter().find(|a| a.slot == AffixSlot::Suffix);

    let mut name = String::with_capacity(base_name.len() + 32);
    if let Some(prefix) = prefix {
        name.push_str(&prefix.name);
        name.push(' ');
    }
    name.push_str(base_name);
    if let Some(suffix) = suffix {
        name.push(' ');
        name.push_str(&suffix.name);
    }
    name
}

fn roll_all<R: Rng + ?Sized>(modifiers: &[StatModifier], rng: &mut R) -> Vec<RolledStat> {
    modifiers.iter().map(|m| roll_modifier(m, rng)).collect()
}

fn roll_stack<R: Rng + ?Sized>(base: &BaseItem, rng: &mut R) -> Option<u32> {
    if !base.stackable || base.item_type == ItemType::Currency {
        return None;
    }
    let cap = base.stack_cap.clamp(1, MAX_DROP_STACK);
    Some(rng.gen_range(1..=cap))
}

fn plain_item<R: Rng + ?Sized>(base: &BaseItem, item_level: u32, rng: &mut R) -> GeneratedItem {
    GeneratedItem {
        source: ItemSource::Base {
            id: base.id.clone(),
        },
        item_type: base.item_type,
        rarity: Rarity::Normal,
        item_level,
        name: base.name.clone(),
        base_stats: roll_all(&base.base_stats, rng),
        affixes: AffixList::new(),
        fixed_stats: Vec::new(),
        stack: roll_stack(base, rng),
        forced: false,
    }
}

fn base_item<R: Rng + ?Sized>(
    catalog: &Catalog,
    base: &BaseItem,
    rarity: Rarity,
    item_level: u32,
    rng: &mut R,
) -> GeneratedItem {
    let base_stats = roll_all(&base.base_stats, rng);
    let affixes = select_affixes(catalog.affixes(), base.item_type, item_level, rarity, rng);
    GeneratedItem {
        source: ItemSource::Base {
            id: base.id.clone(),
        },
        item_type: base.item_type,
        rarity,
        item_level,
        name: compose_name(&base.name, &affixes),
        base_stats,
        affixes,
        fixed_stats: Vec::new(),
        stack: roll_stack(base, rng),
        forced: false,
    }
}

fn legendary_item<R: Rng + ?Sized>(
    legendary: &LegendaryItem,
    item_level: u32,
    rng: &mut R,
) -> GeneratedItem {
    GeneratedItem {
        source: ItemSource::Legendary {
            id: legendary.id.clone(),
        },
        item_type: legendary.item_type,
        rarity: Rarity::Legendary,
        item_level,
        name: legendary.name.clone(),
        base_stats: Vec::new(),
        affixes: AffixList::new(),
        fixed_stats: roll_all(&legendary.modifiers, rng),
        stack: None,
        forced: false,
    }
}

fn set_piece_item<R: Rng + ?Sized>(
    piece: &SetItem,
    set_name: Option<&str>,
    item_level: u32,
    rng: &mut R,
) -> GeneratedItem {
    let name = match set_name {
        Some(set_name) => format!("{} [{}]", piece.name, set_name),
        None => piece.name.clone(),
    };
    GeneratedItem {
        source: ItemSource::SetPiece {
            id: piece.id.clone(),
            set_id: piece.set_id.clone(),
        },
        item_type: piece.item_type,
        rarity: Rarity::Set,
        item_level,
        name,
        base_stats: Vec::new(),
        affixes: AffixList::new(),
        fixed_stats: roll_all(&piece.modifiers, rng),
        stack: None,
        forced: false,
    }
}
