//! Treasure table configuration structures

use serde::{Deserialize, Serialize};

/// What a table entry yields when it is picked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DropKind {
    /// A base item, assembled with a rolled rarity
    Item { item: String },
    /// Currency scaled by source level
    Currency,
    /// Another treasure table, resolved with its own pick count
    Table { table: String },
}

/// Weighted row of a treasure table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    #[serde(flatten)]
    pub drop: DropKind,
    pub weight: u32,
}

impl TableEntry {
    pub fn item(id: &str, weight: u32) -> Self {
        Self {
            drop: DropKind::Item {
                item: id.to_string(),
            },
            weight,
        }
    }

    pub fn currency(weight: u32) -> Self {
        Self {
            drop: DropKind::Currency,
            weight,
        }
    }

    pub fn table(id: &str, weight: u32) -> Self {
        Self {
            drop: DropKind::Table {
                table: id.to_string(),
            },
            weight,
        }
    }
}

/// Per-table boosts folded into magic find for the boosted tiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RarityMultipliers {
    #[serde(default = "unit")]
    pub legendary: f64,
    #[serde(default = "unit")]
    pub set: f64,
    #[serde(default = "unit")]
    pub rare: f64,
}

fn unit() -> f64 {
    1.0
}

impl RarityMultipliers {
    /// Per-tier maximum of two boosts
    ///
    /// A boost set on a table reaches items drawn from its sub-tables.
    #[must_use]
    pub fn strongest(self, other: RarityMultipliers) -> Self {
        Self {
            legendary: self.legendary.max(other.legendary),
            set: self.set.max(other.set),
            rare: self.rare.max(other.rare),
        }
    }
}

impl Default for RarityMultipliers {
    fn default() -> Self {
        Self {
            legendary: 1.0,
            set: 1.0,
            rare: 1.0,
        }
    }
}

/// Treasure table configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasureTable {
    pub id: String,
    #[serde(default)]
    pub min_level: u32,
    #[serde(default = "default_picks")]
    pub picks: u32,
    #[serde(default)]
    pub no_drop: u32,
    pub entries: Vec<TableEntry>,
    #[serde(default)]
    pub multipliers: RarityMultipliers,
}

fn default_picks() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_json_shape() {
        let json = r#"[
            {"kind": "item", "item": "short_sword", "weight": 5},
            {"kind": "currency", "weight": 3},
            {"kind": "table", "table": "potions", "weight": 2}
        ]"#;
        let entries: Vec<TableEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0], TableEntry::item("short_sword", 5));
        assert_eq!(entries[1], TableEntry::currency(3));
        assert_eq!(entries[2], TableEntry::table("potions", 2));
    }

    #[test]
    fn test_table_defaults() {
        let json = r#"{"id": "t", "entries": []}"#;
        let table: TreasureTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.picks, 1);
        assert_eq!(table.no_drop, 0);
        assert_eq!(table.multipliers, RarityMultipliers::default());
    }

    #[test]
    fn test_strongest_multipliers() {
        let parent = RarityMultipliers {
            legendary: 2.0,
            set: 1.5,
            rare: 1.0,
        };
        let child = RarityMultipliers {
            legendary: 1.0,
            set: 1.0,
            rare: 3.0,
        };
        let combined = parent.strongest(child);
        assert_eq!(combined.legendary, 2.0);
        assert_eq!(combined.set, 1.5);
        assert_eq!(combined.rare, 3.0);
        assert_eq!(
            RarityMultipliers::default().strongest(RarityMultipliers::default()),
            RarityMultipliers::default()
        );
    }
}
