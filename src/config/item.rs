//! Base item configuration structures

use serde::{Deserialize, Serialize};

/// Broad item category used for affix eligibility and legendary filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Weapon,
    Armor,
    Jewelry,
    Consumable,
    Currency,
}

impl ItemType {
    /// Equipment rolls rarity and affixes; everything else drops plain
    #[inline]
    pub fn is_equipment(self) -> bool {
        matches!(self, ItemType::Weapon | ItemType::Armor | ItemType::Jewelry)
    }
}

/// Stat kinds that base ranges, affixes and fixed rolls can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    MinDamage,
    MaxDamage,
    Defense,
    AttackSpeed,
    CriticalChance,
    Strength,
    Dexterity,
    Vitality,
    Energy,
    AllAttributes,
    Life,
    Mana,
    LifeSteal,
    FireResist,
    ColdResist,
    LightningResist,
    PoisonResist,
    MagicFind,
    GoldFind,
    Healing,
    Durability,
}

/// An inclusive (min, max) range for one stat
///
/// Shared by base item ranges, affix modifiers, legendary/set fixed rolls
/// and set bonuses. `percent` only affects how the host displays the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatModifier {
    pub stat: StatKind,
    pub min: i32,
    pub max: i32,
    #[serde(default)]
    pub percent: bool,
}

impl StatModifier {
    pub fn new(stat: StatKind, min: i32, max: i32) -> Self {
        Self {
            stat,
            min,
            max,
            percent: false,
        }
    }

    pub fn percent(stat: StatKind, min: i32, max: i32) -> Self {
        Self {
            stat,
            min,
            max,
            percent: true,
        }
    }
}

/// A concrete value rolled from a [`StatModifier`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolledStat {
    pub stat: StatKind,
    pub value: i32,
    pub percent: bool,
}

/// Base item definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseItem {
    pub id: String,
    pub name: String,
    pub item_type: ItemType,
    #[serde(default = "default_tier")]
    pub tier: u32,
    #[serde(default)]
    pub min_level: u32,
    #[serde(default)]
    pub base_stats: Vec<StatModifier>,
    #[serde(default)]
    pub stackable: bool,
    #[serde(default = "default_stack_cap")]
    pub stack_cap: u32,
}

fn default_tier() -> u32 {
    1
}

fn default_stack_cap() -> u32 {
    1
}
