//! Legendary and set item configuration structures

use super::{ItemType, StatModifier};
use serde::{Deserialize, Serialize};

/// Fixed-roll unique item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendaryItem {
    pub id: String,
    pub name: String,
    pub item_type: ItemType,
    #[serde(default)]
    pub min_drop_level: u32,
    pub modifiers: Vec<StatModifier>,
}

/// One piece of an item set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetItem {
    pub id: String,
    pub name: String,
    pub item_type: ItemType,
    pub set_id: String,
    #[serde(default)]
    pub min_drop_level: u32,
    pub modifiers: Vec<StatModifier>,
}

/// Bonus granted once `pieces` members of a set are owned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetBonus {
    pub pieces: u32,
    pub modifiers: Vec<StatModifier>,
}

/// Set definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub partial_bonuses: Vec<SetBonus>,
    #[serde(default)]
    pub full_bonus: Vec<StatModifier>,
}
