//! Affix configuration structures

use super::{ItemType, StatModifier};
use serde::{Deserialize, Serialize};

/// Where an affix sits relative to the base name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffixSlot {
    Prefix,
    Suffix,
}

/// Affix configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Affix {
    pub id: String,
    /// Display fragment, e.g. "Cruel" or "of the Bear"
    pub name: String,
    pub slot: AffixSlot,
    #[serde(default)]
    pub min_level: u32,
    #[serde(default = "default_weight")]
    pub weight: u32,
    pub modifiers: Vec<StatModifier>,
    /// When present, only these item types may roll the affix
    pub allowed_types: Option<Vec<ItemType>>,
    #[serde(default)]
    pub excluded_types: Vec<ItemType>,
    /// Mutual-exclusion group; at most one affix per group on an item
    pub group: String,
}

fn default_weight() -> u32 {
    100
}

impl Affix {
    /// Whether this affix may roll on an item of `item_type` at `item_level`
    #[inline]
    pub fn is_eligible(&self, item_type: ItemType, item_level: u32) -> bool {
        if self.min_level > item_level || self.weight == 0 {
            return false;
        }
        if self.excluded_types.contains(&item_type) {
            return false;
        }
        match self.allowed_types {
            Some(ref allowed) => allowed.contains(&item_type),
            None => true,
        }
    }
}
