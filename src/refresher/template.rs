//! Template cache refresher.

use crate::error::DistributedCacheError;
use crate::store::{CacheClass, CacheKey, CacheStore};

use super::{CacheRefresher, RefresherId, TEMPLATE_REFRESHER};

pub struct TemplateCacheRefresher;

impl CacheRefresher for TemplateCacheRefresher {
    fn id(&self) -> RefresherId {
        TEMPLATE_REFRESHER
    }

    fn name(&self) -> &'static str {
        "template"
    }

    fn apply_ids(&self, store: &dyn CacheStore, ids: &[i32]) -> Result<(), DistributedCacheError> {
        for id in ids {
            store.evict(&CacheKey::new(CacheClass::Template, *id));
        }
        Ok(())
    }
}
