//! Macro cache refresher.
//!
//! A rendered macro may wrap an underlying model that carries the cacheable
//! identity; the wrapper's own identity is irrelevant to the cache key.

use crate::error::DistributedCacheError;
use crate::store::{CacheClass, CacheKey, CacheStore};

use super::{CacheRefresher, MACRO_REFRESHER, RefresherId};

/// The macro definition the cache is keyed by.
#[derive(Debug, Clone)]
pub struct MacroModel {
    pub id: i32,
    pub alias: String,
}

/// A rendering-time macro wrapper. The model is absent when the macro was
/// never resolved, in which case there is nothing to invalidate.
#[derive(Debug, Clone, Default)]
pub struct MacroRendering {
    pub model: Option<MacroModel>,
}

impl MacroRendering {
    pub fn model_id(&self) -> Option<i32> {
        self.model.as_ref().map(|model| model.id)
    }
}

pub struct MacroCacheRefresher;

impl CacheRefresher for MacroCacheRefresher {
    fn id(&self) -> RefresherId {
        MACRO_REFRESHER
    }

    fn name(&self) -> &'static str {
        "macro"
    }

    fn apply_ids(&self, store: &dyn CacheStore, ids: &[i32]) -> Result<(), DistributedCacheError> {
        for id in ids {
            store.evict(&CacheKey::new(CacheClass::Macro, *id));
        }
        Ok(())
    }

    fn apply_all(&self, store: &dyn CacheStore) -> Result<(), DistributedCacheError> {
        store.evict_class(CacheClass::Macro);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CacheEntry, InMemoryStore};

    #[test]
    fn apply_ids_evicts_macro_keys() {
        let store = InMemoryStore::new();
        store.put(CacheKey::new(CacheClass::Macro, 4), CacheEntry::new("m"));

        MacroCacheRefresher.apply_ids(&store, &[4]).expect("apply");

        assert!(store.get(&CacheKey::new(CacheClass::Macro, 4)).is_none());
    }

    #[test]
    fn rendering_without_model_has_no_id() {
        let rendering = MacroRendering::default();
        assert!(rendering.model_id().is_none());
    }

    #[test]
    fn rendering_exposes_the_model_id_not_its_own() {
        let rendering = MacroRendering {
            model: Some(MacroModel {
                id: 77,
                alias: "gallery".to_string(),
            }),
        };
        assert_eq!(rendering.model_id(), Some(77));
    }
}
