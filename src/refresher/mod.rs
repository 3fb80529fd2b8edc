//! Cache refresher strategies.
//!
//! A refresher knows how to turn an invalidation instruction for one entity
//! kind into evictions against the local [`CacheStore`]. Each strategy is
//! bound to exactly one [`RefresherId`]; the ids are hard-coded and must be
//! identical on every server in the cluster, since they are the only thing
//! that names a strategy on the wire. Changing one breaks rolling-upgrade
//! compatibility.

mod content_type;
mod macros;
mod media;
mod member;
mod page;
mod template;
mod user;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use content_type::{ContentTypeCacheRefresher, ContentTypeChange};
pub use macros::{MacroCacheRefresher, MacroModel, MacroRendering};
pub use media::MediaCacheRefresher;
pub use member::MemberCacheRefresher;
pub use page::PageCacheRefresher;
pub use template::TemplateCacheRefresher;
pub use user::UserCacheRefresher;

use crate::error::DistributedCacheError;
use crate::store::CacheStore;

/// Stable identifier of one invalidation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefresherId(Uuid);

impl RefresherId {
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for RefresherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Rendered page (content) cache.
pub const PAGE_REFRESHER: RefresherId =
    RefresherId::from_u128(0x27ab3022_3dfa_47b6_9119_5945bc765a07);
/// Media item cache.
pub const MEDIA_REFRESHER: RefresherId =
    RefresherId::from_u128(0xb29968b3_9e88_4579_a3a5_2ea1dc4b6b73);
/// Member cache.
pub const MEMBER_REFRESHER: RefresherId =
    RefresherId::from_u128(0xe285df34_ae67_4f53_b01e_2c673f424ab9);
/// Template cache.
pub const TEMPLATE_REFRESHER: RefresherId =
    RefresherId::from_u128(0xdd12b6a0_14b9_46e8_8800_c154f74047c8);
/// Macro cache.
pub const MACRO_REFRESHER: RefresherId =
    RefresherId::from_u128(0x7b1e683b_5f77_4b8e_875d_9d4fd5dd6263);
/// Content-type and media-type cache (structured JSON payload).
pub const CONTENT_TYPE_REFRESHER: RefresherId =
    RefresherId::from_u128(0x6902e22c_9c10_483c_91f3_66b7cae9e2f5);
/// Back-office user cache.
pub const USER_REFRESHER: RefresherId =
    RefresherId::from_u128(0x41b3c1a0_8c6d_4f29_9d55_3c1e6f0d7a42);

/// One invalidation strategy.
///
/// Strategies hold no mutable state; they are pure behavior over the store.
/// Each implements the subset of operations that makes sense for its entity
/// kind and leaves the rest on the unsupported defaults. Every supported
/// operation is idempotent: applying it twice leaves the store exactly as
/// applying it once.
pub trait CacheRefresher: Send + Sync {
    fn id(&self) -> RefresherId;

    fn name(&self) -> &'static str;

    /// Evict the cached items keyed by `ids`.
    fn apply_ids(
        &self,
        _store: &dyn CacheStore,
        _ids: &[i32],
    ) -> Result<(), DistributedCacheError> {
        Err(DistributedCacheError::unsupported(self.name(), "apply_ids"))
    }

    /// Apply a structured payload. `remove` distinguishes a remove operation
    /// from any other change, for strategies that care.
    fn apply_payload(
        &self,
        _store: &dyn CacheStore,
        _payload: &str,
        _remove: bool,
    ) -> Result<(), DistributedCacheError> {
        Err(DistributedCacheError::unsupported(
            self.name(),
            "apply_payload",
        ))
    }

    /// Evict the strategy's entire cache class.
    fn apply_all(&self, _store: &dyn CacheStore) -> Result<(), DistributedCacheError> {
        Err(DistributedCacheError::unsupported(self.name(), "apply_all"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    struct Inert;

    impl CacheRefresher for Inert {
        fn id(&self) -> RefresherId {
            RefresherId::from_u128(1)
        }

        fn name(&self) -> &'static str {
            "inert"
        }
    }

    #[test]
    fn defaults_are_unsupported() {
        let store = InMemoryStore::new();
        let refresher = Inert;

        assert!(matches!(
            refresher.apply_ids(&store, &[1]),
            Err(DistributedCacheError::Unsupported { .. })
        ));
        assert!(matches!(
            refresher.apply_payload(&store, "[]", false),
            Err(DistributedCacheError::Unsupported { .. })
        ));
        assert!(matches!(
            refresher.apply_all(&store),
            Err(DistributedCacheError::Unsupported { .. })
        ));
    }

    #[test]
    fn well_known_ids_are_distinct() {
        let ids = [
            PAGE_REFRESHER,
            MEDIA_REFRESHER,
            MEMBER_REFRESHER,
            TEMPLATE_REFRESHER,
            MACRO_REFRESHER,
            CONTENT_TYPE_REFRESHER,
            USER_REFRESHER,
        ];

        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
