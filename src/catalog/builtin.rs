//! Compiled-in default catalog

use super::Catalog;
use crate::error::Result;
use once_cell::sync::OnceCell;
use std::sync::Arc;

const BUILTIN_JSON: &str = include_str!("builtin.json");

/// Parsed once on first use, then shared
static BUILTIN_CATALOG: OnceCell<Arc<Catalog>> = OnceCell::new();

impl Catalog {
    /// The default catalog shipped with the crate
    ///
    /// Independent catalogs can still be built with [`Catalog::new`] or
    /// [`Catalog::from_json`].
    pub fn builtin() -> Result<Arc<Catalog>> {
        BUILTIN_CATALOG
            .get_or_try_init(|| Catalog::from_json(BUILTIN_JSON).map(Arc::new))
            .cloned()
    }
}
