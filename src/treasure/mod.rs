//! Treasure table resolution module

pub mod resolver;
pub mod selector;


pub use resolver::*;
pub use selector::*;

use crate::config::ItemType;
use serde::{Deserialize, Serialize};

/// Where a drop comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropContext {
    pub source_level: u32,
    #[serde(default)]
    pub is_boss: bool,
    /// Restricts legendary/set candidates to one item type
    #[serde(default)]
    pub item_type: Option<ItemType>,
}

impl DropContext {
    pub fn new(source_level: u32) -> Self {
        Self {
            source_level,
            is_boss: false,
            item_type: None,
        }
    }

    pub fn boss(mut self) -> Self {
        self.is_boss = true;
        self
    }

    pub fn with_item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = Some(item_type);
        self
    }
}
