//! Weighted table picks and currency rolls

use crate::config::{Difficulty, TableEntry};
use rand::Rng;

/// Currency granted per source level before variance
pub const CURRENCY_PER_LEVEL: u64 = 15;

/// No-drop weight after scaling for party size
///
/// Larger groups shrink the no-drop band:
/// `floor(W / (((no_drop + W) / no_drop)^n - 1))` with `n = (group + 1) / 2`.
pub fn effective_no_drop(no_drop: u32, entry_weight: u64, group_size: u32) -> u64 {
    let n = ((group_size.saturating_add(1)) / 2).max(1);
    if no_drop == 0 || entry_weight == 0 || n == 1 {
        return no_drop as u64;
    }

    let no_drop_f = no_drop as f64;
    let ratio = (no_drop_f + entry_weight as f64) / no_drop_f;
    let denominator = ratio.powi(n as i32) - 1.0;
    if denominator <= 0.0 {
        return no_drop as u64;
    }
    (entry_weight as f64 / denominator).floor() as u64
}

/// Draw one pick against `entries` plus a leading no-drop band
///
/// Returns `None` when the draw lands in the no-drop band, or when nothing
/// carries weight at all.
pub fn pick_entry<'a, R: Rng + ?Sized>(
    entries: &[&'a TableEntry],
    no_drop: u64,
    rng: &mut R,
) -> Option<&'a TableEntry> {
    let entry_weight: u64 = entries.iter().map(|e| e.weight as u64).sum();
    let total_weight = entry_weight + no_drop;
    if entry_weight == 0 {
        return None;
    }

    let mut random_value = rng.gen_range(0..total_weight);
    if random_value < no_drop {
        return None;
    }
    random_value -= no_drop;

    for entry in entries {
        let weight = entry.weight as u64;
        if random_value < weight {
            return Some(*entry);
        }
        random_value -= weight;
    }

    // Unreachable with consistent weights; fall back to the last entry
    entries.last().copied()
}

/// Exact probability of the no-drop band and of each entry for one pick
pub fn pick_probabilities(entries: &[&TableEntry], no_drop: u64) -> (f64, Vec<f64>) {
    let entry_weight: u64 = entries.iter().map(|e| e.weight as u64).sum();
    if entry_weight == 0 {
        return (1.0, vec![0.0; entries.len()]);
    }
    let total = (entry_weight + no_drop) as f64;
    (
        no_drop as f64 / total,
        entries.iter().map(|e| e.weight as f64 / total).collect(),
    )
}

/// Roll a currency amount: `level * 15 * difficulty` plus up to 50% more
pub fn roll_currency<R: Rng + ?Sized>(source_level: u32, difficulty: Difficulty, rng: &mut R) -> u64 {
    let base = (source_level as u64 * CURRENCY_PER_LEVEL) as f64 * difficulty.currency_multiplier();
    let base = base.round() as u64;
    base + rng.gen_range(0..=base / 2)
}
