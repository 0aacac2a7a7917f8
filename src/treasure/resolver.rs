//! Recursive treasure table resolution

use super::selector::{effective_no_drop, pick_entry, roll_currency};
use super::DropContext;
use crate::catalog::Catalog;
use crate::config::{DropKind, GenerationConfig, RarityMultipliers, TableEntry, TreasureTable};
use crate::error::{LootError, Result};
use crate::fairness::FairnessTracker;
use crate::generator::{assemble_item, ItemRequest, LootResult};
use rand::Rng;

/// Deepest chain of nested table references a resolution may follow
pub const MAX_TABLE_DEPTH: usize = 16;

/// One resolution pass over the catalog
///
/// Borrows the session's fairness tracker and random source for the duration
/// of a single `resolve` call.
pub struct Resolver<'a, R: Rng + ?Sized> {
    catalog: &'a Catalog,
    config: &'a GenerationConfig,
    tracker: &'a mut FairnessTracker,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> Resolver<'a, R> {
    pub fn new(
        catalog: &'a Catalog,
        config: &'a GenerationConfig,
        tracker: &'a mut FairnessTracker,
        rng: &'a mut R,
    ) -> Self {
        Self {
            catalog,
            config,
            tracker,
            rng,
        }
    }

    /// Resolve `table_id` and everything it references
    pub fn resolve(mut self, table_id: &str, context: &DropContext) -> Result<LootResult> {
        let table = self
            .catalog
            .table(table_id)
            .ok_or_else(|| LootError::UnknownTable(table_id.to_string()))?;

        let mut result = LootResult::default();
        self.resolve_table(table, context, RarityMultipliers::default(), 0, &mut result)?;

        result.pity = self.tracker.pity;
        result.bad_luck = self.tracker.bad_luck;

        tracing::debug!(
            table = table_id,
            items = result.items.len(),
            currency = result.currency.unwrap_or(0),
            "resolved treasure table"
        );
        Ok(result)
    }

    fn resolve_table(
        &mut self,
        table: &'a TreasureTable,
        context: &DropContext,
        inherited: RarityMultipliers,
        depth: usize,
        out: &mut LootResult,
    ) -> Result<()> {
        if depth >= MAX_TABLE_DEPTH {
            return Err(LootError::TableDepthExceeded {
                table: table.id.clone(),
                depth,
            });
        }

        let multipliers = table.multipliers.strongest(inherited);
        let eligible: Vec<&'a TableEntry> = table
            .entries
            .iter()
            .filter(|e| self.entry_eligible(e, context.source_level))
            .collect();
        let entry_weight: u64 = eligible.iter().map(|e| e.weight as u64).sum();
        let no_drop = effective_no_drop(table.no_drop, entry_weight, self.config.group_size);

        for pick in 0..table.picks {
            // A boss always yields something on its first top-level pick
            let band = if depth == 0 && pick == 0 && context.is_boss {
                0
            } else {
                no_drop
            };

            let Some(entry) = pick_entry(&eligible, band, &mut *self.rng) else {
                tracing::trace!(table = %table.id, pick, "no drop");
                continue;
            };
            tracing::debug!(table = %table.id, pick, depth, drop = ?entry.drop, "table pick");

            match entry.drop {
                DropKind::Currency => {
                    let amount =
                        roll_currency(context.source_level, self.config.difficulty, &mut *self.rng);
                    out.add_currency(amount);
                }
                DropKind::Item { ref item } => {
                    let base = self
                        .catalog
                        .base_item(item)
                        .ok_or_else(|| LootError::UnknownItem(item.clone()))?;
                    let request = ItemRequest {
                        base,
                        context,
                        multipliers,
                    };
                    if let Some(generated) = assemble_item(
                        self.catalog,
                        self.config,
                        &mut *self.tracker,
                        &request,
                        &mut *self.rng,
                    ) {
                        out.items.push(generated);
                    }
                }
                DropKind::Table { table: ref reference } => {
                    let next = self.catalog.table(reference).ok_or_else(|| {
                        LootError::UnknownSubTable {
                            table: table.id.clone(),
                            reference: reference.clone(),
                        }
                    })?;
                    self.resolve_table(next, context, multipliers, depth + 1, out)?;
                }
            }
        }

        Ok(())
    }

    /// Entries whose target requires a higher level drop out of the draw
    fn entry_eligible(&self, entry: &TableEntry, source_level: u32) -> bool {
        match entry.drop {
            DropKind::Currency => true,
            DropKind::Item { ref item } => self
                .catalog
                .base_item(item)
                .map_or(true, |b| b.min_level <= source_level),
            DropKind::Table { ref table } => self
                .catalog
                .table(table)
                .map_or(true, |t| t.min_level <= source_level),
        }
    }
}
