//! Python bindings
//!
//! A `LootGenerator` pyclass holding one session in Rust memory. Results
//! cross the boundary as plain dicts and lists.

use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyList, PyString};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::GenerationConfig;
use crate::error::LootError;
use crate::fairness::{BadLuckState, FairnessTracker, PityState};
use crate::generator::LootGenerator;
use crate::treasure::DropContext;

// ============================================================================
// Helper Functions
// ============================================================================

fn json_to_py<'py>(py: Python<'py>, value: &Value) -> PyResult<Bound<'py, PyAny>> {
    let object = match value {
        Value::Null => py.None().into_bound(py),
        Value::Bool(b) => PyBool::new(py, *b).to_owned().into_any(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.into_pyobject(py)?.into_any()
            } else if let Some(u) = n.as_u64() {
                u.into_pyobject(py)?.into_any()
            } else {
                n.as_f64().unwrap_or(0.0).into_pyobject(py)?.into_any()
            }
        }
        Value::String(s) => PyString::new(py, s).into_any(),
        Value::Array(items) => {
            let list = PyList::empty(py);
            for item in items {
                list.append(json_to_py(py, item)?)?;
            }
            list.into_any()
        }
        Value::Object(map) => {
            let dict = PyDict::new(py);
            for (key, item) in map {
                dict.set_item(key, json_to_py(py, item)?)?;
            }
            dict.into_any()
        }
    };
    Ok(object)
}

/// Serialize any result type into Python objects
fn to_py<'py, T: Serialize>(py: Python<'py>, value: &T) -> PyResult<Bound<'py, PyAny>> {
    let json = serde_json::to_value(value).map_err(LootError::from)?;
    json_to_py(py, &json)
}

fn fairness_to_dict<'py>(py: Python<'py>, tracker: &FairnessTracker) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("since_legendary", tracker.pity.since_legendary)?;
    dict.set_item("since_set", tracker.pity.since_set)?;
    dict.set_item("since_rare", tracker.pity.since_rare)?;
    dict.set_item("consecutive_normals", tracker.bad_luck.consecutive_normals)?;
    dict.set_item("bad_luck_bonus", tracker.bad_luck.bonus)?;
    Ok(dict)
}

// ============================================================================
// LootGenerator PyClass
// ============================================================================

/// One generation session: catalog, config, fairness counters and RNG
#[pyclass(name = "LootGenerator")]
pub struct PyLootGenerator {
    inner: LootGenerator,
}

#[pymethods]
impl PyLootGenerator {
    /// Create a session
    ///
    /// # Arguments
    /// * `catalog_json` - Catalog as JSON (default: builtin catalog)
    /// * `config_json` - Generation config as JSON (default: all defaults)
    /// * `seed` - Fixed seed for reproducible drops (default: OS entropy)
    #[new]
    #[pyo3(signature = (catalog_json=None, config_json=None, seed=None))]
    fn new(catalog_json: Option<&str>, config_json: Option<&str>, seed: Option<u64>) -> PyResult<Self> {
        let catalog = match catalog_json {
            Some(json) => Arc::new(Catalog::from_json(json)?),
            None => Catalog::builtin()?,
        };
        let config = match config_json {
            Some(json) => GenerationConfig::from_json(json)?,
            None => GenerationConfig::default(),
        };
        let inner = match seed {
            Some(seed) => LootGenerator::with_seed(catalog, config, seed)?,
            None => LootGenerator::new(catalog, config)?,
        };
        Ok(Self { inner })
    }

    /// Resolve a treasure table
    ///
    /// # Returns
    /// Dict with `items`, `currency`, `pity` and `bad_luck`
    ///
    /// # Raises
    /// KeyError for an unknown table
    #[pyo3(signature = (table_id, source_level, is_boss=false))]
    fn resolve<'py>(
        &mut self,
        py: Python<'py>,
        table_id: &str,
        source_level: u32,
        is_boss: bool,
    ) -> PyResult<Bound<'py, PyAny>> {
        let context = DropContext {
            source_level,
            is_boss,
            item_type: None,
        };
        let result = self.inner.resolve(table_id, &context)?;
        to_py(py, &result)
    }

    /// Assemble a single item from a base item id, or None
    fn generate_item<'py>(
        &mut self,
        py: Python<'py>,
        base_id: &str,
        source_level: u32,
    ) -> PyResult<Bound<'py, PyAny>> {
        let item = self
            .inner
            .generate_item(base_id, &DropContext::new(source_level))?;
        to_py(py, &item)
    }

    fn set_magic_find(&mut self, magic_find: f64) -> PyResult<()> {
        self.inner.set_magic_find(magic_find)?;
        Ok(())
    }

    /// Current pity and bad-luck counters
    fn fairness<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        fairness_to_dict(py, &self.inner.fairness())
    }

    /// Continue from counters persisted by the host
    #[pyo3(signature = (since_legendary=0, since_set=0, since_rare=0, consecutive_normals=0, bad_luck_bonus=0.0))]
    fn restore_fairness(
        &mut self,
        since_legendary: u32,
        since_set: u32,
        since_rare: u32,
        consecutive_normals: u32,
        bad_luck_bonus: f64,
    ) {
        self.inner.restore_fairness(
            PityState {
                since_legendary,
                since_set,
                since_rare,
            },
            BadLuckState {
                consecutive_normals,
                bonus: bad_luck_bonus,
            },
        );
    }
}

// ============================================================================
// Python Module Definition
// ============================================================================

/// Python module definition
#[pymodule]
fn loot_forge(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyLootGenerator>()?;
    Ok(())
}
