//! Immutable loot catalog
//!
//! A [`Catalog`] is built once from [`CatalogData`], validated, and then only
//! read. Lists that generation iterates keep their authoring order so seeded
//! runs are reproducible; hash maps are used for id lookups only.

mod builtin;

use crate::config::{
    Affix, BaseItem, DropKind, ItemType, LegendaryItem, SetDefinition, SetItem, StatModifier,
    TreasureTable,
};
use crate::error::{LootError, Result};
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

/// Raw catalog content as authored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogData {
    pub base_items: Vec<BaseItem>,
    pub affix_groups: Vec<String>,
    pub affixes: Vec<Affix>,
    pub legendaries: Vec<LegendaryItem>,
    pub sets: Vec<SetDefinition>,
    pub set_items: Vec<SetItem>,
    pub tables: Vec<TreasureTable>,
}

/// Validated, indexed catalog shared read-only between sessions
#[derive(Debug, Clone)]
pub struct Catalog {
    base_items: AHashMap<String, BaseItem>,
    affixes: Vec<Affix>,
    legendaries: Vec<LegendaryItem>,
    sets: AHashMap<String, SetDefinition>,
    set_items: Vec<SetItem>,
    set_sizes: AHashMap<String, u32>,
    tables: AHashMap<String, TreasureTable>,
}

impl Catalog {
    /// Validate and index catalog data
    pub fn new(data: CatalogData) -> Result<Self> {
        validate(&data)?;

        let mut set_sizes: AHashMap<String, u32> = AHashMap::with_capacity(data.sets.len());
        for piece in &data.set_items {
            *set_sizes.entry(piece.set_id.clone()).or_insert(0) += 1;
        }

        let catalog = Self {
            base_items: data
                .base_items
                .into_iter()
                .map(|b| (b.id.clone(), b))
                .collect(),
            affixes: data.affixes,
            legendaries: data.legendaries,
            sets: data.sets.into_iter().map(|s| (s.id.clone(), s)).collect(),
            set_items: data.set_items,
            set_sizes,
            tables: data.tables.into_iter().map(|t| (t.id.clone(), t)).collect(),
        };

        tracing::debug!(
            base_items = catalog.base_items.len(),
            affixes = catalog.affixes.len(),
            legendaries = catalog.legendaries.len(),
            set_items = catalog.set_items.len(),
            tables = catalog.tables.len(),
            "catalog loaded"
        );

        Ok(catalog)
    }

    /// Parse catalog data from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::new(data)
    }

    #[inline]
    pub fn base_item(&self, id: &str) -> Option<&BaseItem> {
        self.base_items.get(id)
    }

    #[inline]
    pub fn table(&self, id: &str) -> Option<&TreasureTable> {
        self.tables.get(id)
    }

    #[inline]
    pub fn set(&self, id: &str) -> Option<&SetDefinition> {
        self.sets.get(id)
    }

    pub fn affixes(&self) -> &[Affix] {
        &self.affixes
    }

    /// Legendaries that may drop at `level`, optionally of one item type
    pub fn legendary_candidates(
        &self,
        level: u32,
        item_type: Option<ItemType>,
    ) -> Vec<&LegendaryItem> {
        self.legendaries
            .iter()
            .filter(|l| l.min_drop_level <= level && item_type.map_or(true, |t| t == l.item_type))
            .collect()
    }

    /// Set pieces that may drop at `level`, optionally of one item type
    pub fn set_candidates(&self, level: u32, item_type: Option<ItemType>) -> Vec<&SetItem> {
        self.set_items
            .iter()
            .filter(|s| s.min_drop_level <= level && item_type.map_or(true, |t| t == s.item_type))
            .collect()
    }

    /// Number of pieces belonging to a set
    pub fn set_size(&self, set_id: &str) -> u32 {
        self.set_sizes.get(set_id).copied().unwrap_or(0)
    }

    /// Bonuses active when `owned` distinct pieces of a set are held
    ///
    /// Partial bonuses whose piece requirement is met, followed by the full
    /// bonus once every piece is owned. `None` for an unknown set.
    pub fn active_set_bonuses(&self, set_id: &str, owned: u32) -> Option<Vec<&StatModifier>> {
        let set = self.sets.get(set_id)?;
        let mut active: Vec<&StatModifier> = set
            .partial_bonuses
            .iter()
            .filter(|b| b.pieces <= owned)
            .flat_map(|b| b.modifiers.iter())
            .collect();

        let size = self.set_size(set_id);
        if size > 0 && owned >= size {
            active.extend(set.full_bonus.iter());
        }
        Some(active)
    }
}

// ============================================================================
// Validation
// ============================================================================

fn validate(data: &CatalogData) -> Result<()> {
    check_unique("base item", data.base_items.iter().map(|b| b.id.as_str()))?;
    check_unique("affix group", data.affix_groups.iter().map(|g| g.as_str()))?;
    check_unique("affix", data.affixes.iter().map(|a| a.id.as_str()))?;
    check_unique("legendary", data.legendaries.iter().map(|l| l.id.as_str()))?;
    check_unique("set", data.sets.iter().map(|s| s.id.as_str()))?;
    check_unique("set item", data.set_items.iter().map(|s| s.id.as_str()))?;
    check_unique("table", data.tables.iter().map(|t| t.id.as_str()))?;

    for base in &data.base_items {
        check_ranges(&base.id, &base.base_stats)?;
    }
    for legendary in &data.legendaries {
        check_ranges(&legendary.id, &legendary.modifiers)?;
    }
    for set in &data.sets {
        for bonus in &set.partial_bonuses {
            check_ranges(&set.id, &bonus.modifiers)?;
        }
        check_ranges(&set.id, &set.full_bonus)?;
    }

    check_affix_groups(data)?;

    let set_ids: AHashSet<&str> = data.sets.iter().map(|s| s.id.as_str()).collect();
    for piece in &data.set_items {
        if !set_ids.contains(piece.set_id.as_str()) {
            return Err(LootError::UnknownSet {
                item: piece.id.clone(),
                set: piece.set_id.clone(),
            });
        }
        check_ranges(&piece.id, &piece.modifiers)?;
    }

    check_tables(data)
}

fn check_unique<'a>(kind: &'static str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = AHashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(LootError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn check_ranges(id: &str, modifiers: &[StatModifier]) -> Result<()> {
    for m in modifiers {
        if m.min > m.max {
            return Err(LootError::InvalidRange {
                id: id.to_string(),
                min: m.min as i64,
                max: m.max as i64,
            });
        }
    }
    Ok(())
}

/// Every affix names a declared group and every declared group has members
fn check_affix_groups(data: &CatalogData) -> Result<()> {
    let mut members: AHashMap<&str, usize> = data
        .affix_groups
        .iter()
        .map(|g| (g.as_str(), 0))
        .collect();

    for affix in &data.affixes {
        check_ranges(&affix.id, &affix.modifiers)?;
        match members.get_mut(affix.group.as_str()) {
            Some(count) => *count += 1,
            None => {
                return Err(LootError::UndeclaredAffixGroup {
                    affix: affix.id.clone(),
                    group: affix.group.clone(),
                })
            }
        }
    }

    for group in &data.affix_groups {
        if members.get(group.as_str()).copied().unwrap_or(0) == 0 {
            return Err(LootError::EmptyAffixGroup(group.clone()));
        }
    }

    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Entries point at existing items/tables and table references are acyclic
fn check_tables(data: &CatalogData) -> Result<()> {
    let items: AHashSet<&str> = data.base_items.iter().map(|b| b.id.as_str()).collect();
    let tables: AHashMap<&str, &TreasureTable> =
        data.tables.iter().map(|t| (t.id.as_str(), t)).collect();

    for table in &data.tables {
        for entry in &table.entries {
            match entry.drop {
                DropKind::Item { ref item } if !items.contains(item.as_str()) => {
                    return Err(LootError::UnknownItem(item.clone()));
                }
                DropKind::Table { table: ref reference } if !tables.contains_key(reference.as_str()) => {
                    return Err(LootError::UnknownSubTable {
                        table: table.id.clone(),
                        reference: reference.clone(),
                    });
                }
                _ => {}
            }
        }
    }

    let mut marks: AHashMap<&str, Mark> = AHashMap::with_capacity(tables.len());
    for table in &data.tables {
        visit_table(table, &tables, &mut marks)?;
    }
    Ok(())
}

fn visit_table<'a>(
    table: &'a TreasureTable,
    tables: &AHashMap<&'a str, &'a TreasureTable>,
    marks: &mut AHashMap<&'a str, Mark>,
) -> Result<()> {
    match marks.get(table.id.as_str()) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::Visiting) => return Err(LootError::TableCycle(table.id.clone())),
        None => {}
    }

    marks.insert(table.id.as_str(), Mark::Visiting);
    for entry in &table.entries {
        if let DropKind::Table { table: ref reference } = entry.drop {
            if let Some(next) = tables.get(reference.as_str()) {
                visit_table(*next, tables, marks)?;
            }
        }
    }
    marks.insert(table.id.as_str(), Mark::Done);
    Ok(())
}
