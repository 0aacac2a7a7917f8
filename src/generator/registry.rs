//! Per-player generator sessions over one shared catalog

use super::engine::LootGenerator;
use super::result::LootResult;
use crate::catalog::Catalog;
use crate::config::GenerationConfig;
use crate::error::Result;
use crate::treasure::DropContext;
use ahash::AHashMap;
use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Exclusive generator per player
///
/// Sessions are created on first use with the registry's default config.
/// Calls for different players run in parallel; calls for the same player
/// serialize on that player's mutex.
pub struct SessionRegistry {
    catalog: Arc<Catalog>,
    default_config: GenerationConfig,
    sessions: RwLock<AHashMap<String, Arc<Mutex<LootGenerator>>>>,
}

impl SessionRegistry {
    pub fn new(catalog: Arc<Catalog>, default_config: GenerationConfig) -> Result<Self> {
        default_config.validate()?;
        Ok(Self {
            catalog,
            default_config,
            sessions: RwLock::new(AHashMap::new()),
        })
    }

    /// Session of `player_id`, created if missing
    pub fn session(&self, player_id: &str) -> Arc<Mutex<LootGenerator>> {
        if let Some(session) = self.sessions.read().get(player_id) {
            return Arc::clone(session);
        }

        let mut sessions = self.sessions.write();
        let session = sessions.entry(player_id.to_string()).or_insert_with(|| {
            tracing::debug!(player = player_id, "new generator session");
            Arc::new(Mutex::new(LootGenerator::from_validated(
                Arc::clone(&self.catalog),
                self.default_config.clone(),
                StdRng::from_entropy(),
            )))
        });
        Arc::clone(session)
    }

    /// Resolve a table on the player's session
    pub fn resolve_for(
        &self,
        player_id: &str,
        table_id: &str,
        context: &DropContext,
    ) -> Result<LootResult> {
        let session = self.session(player_id);
        let mut generator = session.lock();
        generator.resolve(table_id, context)
    }

    /// Drop a player's session, returning it so the host can persist its counters
    pub fn remove(&self, player_id: &str) -> Option<Arc<Mutex<LootGenerator>>> {
        self.sessions.write().remove(player_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
