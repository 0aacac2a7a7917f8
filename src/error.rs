//! Error types for the loot generation engine
//!
//! Only authoring mistakes are errors. An empty drop, an item without
//! affixes or a roll that falls back to Normal are ordinary outcomes.

use thiserror::Error;

/// Main error type for the loot generation engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LootError {
    #[error("Treasure table not found: {0}")]
    UnknownTable(String),

    #[error("Base item not found: {0}")]
    UnknownItem(String),

    #[error("Treasure table {table} references unknown table {reference}")]
    UnknownSubTable { table: String, reference: String },

    #[error("Set item {item} references unknown set {set}")]
    UnknownSet { item: String, set: String },

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Affix {affix} uses undeclared group {group}")]
    UndeclaredAffixGroup { affix: String, group: String },

    #[error("Affix group has no members: {0}")]
    EmptyAffixGroup(String),

    #[error("Invalid range on {id}: min {min} > max {max}")]
    InvalidRange { id: String, min: i64, max: i64 },

    #[error("Treasure table cycle through: {0}")]
    TableCycle(String),

    #[error("Treasure table {table} exceeded recursion depth {depth}")]
    TableDepthExceeded { table: String, depth: usize },

    #[error("Invalid generation config: {0}")]
    InvalidConfig(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

impl From<serde_json::Error> for LootError {
    fn from(err: serde_json::Error) -> Self {
        LootError::DeserializationError(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<LootError> for pyo3::PyErr {
    fn from(err: LootError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};

        match err {
            LootError::UnknownTable(_) | LootError::UnknownItem(_) => {
                PyKeyError::new_err(err.to_string())
            }
            LootError::TableDepthExceeded { .. } => PyRuntimeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Result type alias for the loot generation engine
pub type Result<T> = std::result::Result<T, LootError>;
