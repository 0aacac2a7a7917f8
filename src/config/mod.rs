//! Configuration module for loot data structures
//!
//! Catalog definitions (items, affixes, uniques, tables) and the per-session
//! generation config. Everything here is plain serde data; lookups and
//! consistency checks live in [`crate::catalog`].

mod affix;
mod generation;
mod item;
mod table;
mod unique;

pub use affix::*;
pub use generation::*;
pub use item::*;
pub use table::*;
pub use unique::*;
