//! Media cache refresher.

use crate::error::DistributedCacheError;
use crate::store::{CacheClass, CacheKey, CacheStore};

use super::{CacheRefresher, MEDIA_REFRESHER, RefresherId};

pub struct MediaCacheRefresher;

impl CacheRefresher for MediaCacheRefresher {
    fn id(&self) -> RefresherId {
        MEDIA_REFRESHER
    }

    fn name(&self) -> &'static str {
        "media"
    }

    fn apply_ids(&self, store: &dyn CacheStore, ids: &[i32]) -> Result<(), DistributedCacheError> {
        for id in ids {
            store.evict(&CacheKey::new(CacheClass::Media, *id));
        }
        Ok(())
    }
}
