//! Generated items and resolution results

use crate::affix::AffixList;
use crate::config::{ItemType, RolledStat};
use crate::fairness::{BadLuckState, PityState};
use crate::rarity::Rarity;
use serde::{Deserialize, Serialize};

/// Catalog definition a generated item was built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemSource {
    Base { id: String },
    Legendary { id: String },
    SetPiece { id: String, set_id: String },
}

impl ItemSource {
    pub fn id(&self) -> &str {
        match self {
            ItemSource::Base { id } | ItemSource::Legendary { id } | ItemSource::SetPiece { id, .. } => id,
        }
    }
}

/// A finished item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedItem {
    pub source: ItemSource,
    pub item_type: ItemType,
    pub rarity: Rarity,
    pub item_level: u32,
    pub name: String,
    /// Rolled base ranges of the base item
    pub base_stats: Vec<RolledStat>,
    /// Prefixes first, then suffixes
    pub affixes: AffixList,
    /// Rolled fixed modifiers of a legendary or set piece
    pub fixed_stats: Vec<RolledStat>,
    pub stack: Option<u32>,
    /// Tier came from a pity guarantee instead of the roll
    pub forced: bool,
}

/// Everything one `resolve` call produced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LootResult {
    pub items: Vec<GeneratedItem>,
    pub currency: Option<u64>,
    /// Fairness counters after the call
    pub pity: PityState,
    pub bad_luck: BadLuckState,
}

impl LootResult {
    #[inline]
    pub fn add_currency(&mut self, amount: u64) {
        let total = self.currency.unwrap_or(0).saturating_add(amount);
        self.currency = Some(total);
    }

    /// Nothing dropped
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.currency.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_accumulates() {
        let mut result = LootResult::default();
        assert!(result.is_empty());
        result.add_currency(150);
        result.add_currency(75);
        assert_eq!(result.currency, Some(225));
        assert!(!result.is_empty());
    }

    #[test]
    fn test_source_json_shape() {
        let source = ItemSource::SetPiece {
            id: "wolf_helm".to_string(),
            set_id: "wolf_garb".to_string(),
        };
        let json = serde_json::to_value(&source).unwrap();
        assert_eq!(json["kind"], "set_piece");
        assert_eq!(json["set_id"], "wolf_garb");
        assert_eq!(source.id(), "wolf_helm");
    }
}
