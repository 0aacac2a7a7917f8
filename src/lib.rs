//! Loot Forge - Itemization engine for loot drops
//!
//! Resolves named treasure tables into generated items and currency:
//! weighted picks with a no-drop band, recursive sub-tables, rarity rolls
//! with diminishing-returns magic find, prefix/suffix affixes, legendary and
//! set uniques, and per-session pity and bad-luck protection.
//!
//! With the `python` feature the crate also builds a Python extension module
//! via PyO3.
//!
//! ```no_run
//! use loot_forge::{Catalog, DropContext, GenerationConfig, LootGenerator};
//!
//! let catalog = Catalog::builtin()?;
//! let mut generator = LootGenerator::new(catalog, GenerationConfig::default())?;
//! let loot = generator.resolve("camp_tier_1", &DropContext::new(12))?;
//! println!("{} items, {:?} gold", loot.items.len(), loot.currency);
//! # Ok::<(), loot_forge::LootError>(())
//! ```

pub mod affix;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fairness;
pub mod generator;
pub mod rarity;
pub mod treasure;

#[cfg(feature = "python")]
mod python;

pub use catalog::{Catalog, CatalogData};
pub use config::GenerationConfig;
pub use error::{LootError, Result};
pub use fairness::FairnessTracker;
pub use generator::{GeneratedItem, LootGenerator, LootResult, SessionRegistry};
pub use rarity::Rarity;
pub use treasure::DropContext;
