//! Member cache refresher.

use crate::error::DistributedCacheError;
use crate::store::{CacheClass, CacheKey, CacheStore};

use super::{CacheRefresher, MEMBER_REFRESHER, RefresherId};

pub struct MemberCacheRefresher;

impl CacheRefresher for MemberCacheRefresher {
    fn id(&self) -> RefresherId {
        MEMBER_REFRESHER
    }

    fn name(&self) -> &'static str {
        "member"
    }

    fn apply_ids(&self, store: &dyn CacheStore, ids: &[i32]) -> Result<(), DistributedCacheError> {
        for id in ids {
            store.evict(&CacheKey::new(CacheClass::Member, *id));
        }
        Ok(())
    }
}
