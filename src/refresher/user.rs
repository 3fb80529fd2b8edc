//! Back-office user cache refresher.

use crate::error::DistributedCacheError;
use crate::store::{CacheClass, CacheKey, CacheStore};

use super::{CacheRefresher, RefresherId, USER_REFRESHER};

pub struct UserCacheRefresher;

impl CacheRefresher for UserCacheRefresher {
    fn id(&self) -> RefresherId {
        USER_REFRESHER
    }

    fn name(&self) -> &'static str {
        "user"
    }

    fn apply_ids(&self, store: &dyn CacheStore, ids: &[i32]) -> Result<(), DistributedCacheError> {
        for id in ids {
            store.evict(&CacheKey::new(CacheClass::User, *id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CacheEntry, InMemoryStore};

    #[test]
    fn apply_ids_evicts_user_keys() {
        let store = InMemoryStore::new();
        store.put(CacheKey::new(CacheClass::User, 4), CacheEntry::new("u"));
        store.put(CacheKey::new(CacheClass::Member, 4), CacheEntry::new("m"));

        UserCacheRefresher.apply_ids(&store, &[4]).expect("apply");

        assert!(store.get(&CacheKey::new(CacheClass::User, 4)).is_none());
        assert!(store.get(&CacheKey::new(CacheClass::Member, 4)).is_some());
    }
}
