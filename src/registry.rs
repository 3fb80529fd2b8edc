//! Refresher registry.
//!
//! Maps each stable [`RefresherId`] to its registered strategy. The hosting
//! application registers every strategy during startup, before the registry
//! is handed to the dispatcher; after that the registry is only ever read,
//! so lookups need no locking.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::DistributedCacheError;
use crate::refresher::{CacheRefresher, RefresherId};

pub struct RefresherRegistry {
    refreshers: HashMap<RefresherId, Arc<dyn CacheRefresher>>,
}

impl RefresherRegistry {
    pub fn new() -> Self {
        Self {
            refreshers: HashMap::new(),
        }
    }

    /// A registry pre-populated with the seven built-in strategies.
    pub fn with_defaults() -> Self {
        use crate::refresher::{
            ContentTypeCacheRefresher, MacroCacheRefresher, MediaCacheRefresher,
            MemberCacheRefresher, PageCacheRefresher, TemplateCacheRefresher, UserCacheRefresher,
        };

        let mut registry = Self::new();
        for refresher in [
            Arc::new(PageCacheRefresher) as Arc<dyn CacheRefresher>,
            Arc::new(MediaCacheRefresher),
            Arc::new(MemberCacheRefresher),
            Arc::new(TemplateCacheRefresher),
            Arc::new(MacroCacheRefresher),
            Arc::new(ContentTypeCacheRefresher),
            Arc::new(UserCacheRefresher),
        ] {
            // Built-in ids never collide; see refresher module tests.
            registry
                .register(refresher)
                .unwrap_or_else(|err| unreachable!("built-in registration failed: {err}"));
        }
        registry
    }

    /// Bind a strategy under its id. Fails if the id is already bound.
    pub fn register(
        &mut self,
        refresher: Arc<dyn CacheRefresher>,
    ) -> Result<(), DistributedCacheError> {
        let id = refresher.id();
        if let Some(existing) = self.refreshers.get(&id) {
            return Err(DistributedCacheError::DuplicateRefresher {
                id,
                existing: existing.name(),
            });
        }
        self.refreshers.insert(id, refresher);
        Ok(())
    }

    /// Look up the strategy bound to `id`.
    pub fn resolve(&self, id: RefresherId) -> Result<&Arc<dyn CacheRefresher>, DistributedCacheError> {
        self.refreshers
            .get(&id)
            .ok_or(DistributedCacheError::UnknownRefresher(id))
    }

    pub fn len(&self) -> usize {
        self.refreshers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refreshers.is_empty()
    }
}

impl Default for RefresherRegistry {
    fn default() -> Self {
        Self::new()
    }
}
