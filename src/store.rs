//! Process-wide object cache collaborator.
//!
//! The dispatcher and its strategies only ever evict; populating the cache
//! is the hosting application's business. `InMemoryStore` is the reference
//! implementation used by embedded deployments and by the crate's tests.

use bytes::Bytes;
use dashmap::DashMap;

/// Cache class, one per cached entity kind.
///
/// Bulk eviction ("blow away the whole rendered-page cache") operates on a
/// class, never on individual keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheClass {
    Page,
    Media,
    Member,
    Template,
    Macro,
    ContentType,
    User,
}

/// Key of one cached item: its class plus the entity's integer id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub class: CacheClass,
    pub id: i32,
}

impl CacheKey {
    pub fn new(class: CacheClass, id: i32) -> Self {
        Self { class, id }
    }
}

/// One cached value.
///
/// Content items carry the id of their content type so a type-level change
/// can evict them without knowing their individual ids.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub body: Bytes,
    pub content_type_id: Option<i32>,
}

impl CacheEntry {
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            content_type_id: None,
        }
    }

    pub fn of_type(body: impl Into<Bytes>, content_type_id: i32) -> Self {
        Self {
            body: body.into(),
            content_type_id: Some(content_type_id),
        }
    }
}

/// The shared object cache the strategies mutate.
///
/// Eviction of a missing key is a no-op, which is what makes every strategy
/// apply idempotent. Implementations must allow concurrent eviction of
/// distinct keys without serializing behind a single lock.
pub trait CacheStore: Send + Sync {
    fn put(&self, key: CacheKey, entry: CacheEntry);

    fn get(&self, key: &CacheKey) -> Option<CacheEntry>;

    fn evict(&self, key: &CacheKey);

    /// Evict every entry of one class.
    fn evict_class(&self, class: CacheClass);

    /// Evict every content item whose content type matches `content_type_id`,
    /// regardless of the item's own id.
    fn evict_content_of_type(&self, content_type_id: i32);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sharded in-memory store.
pub struct InMemoryStore {
    entries: DashMap<CacheKey, CacheEntry>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore for InMemoryStore {
    fn put(&self, key: CacheKey, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn evict(&self, key: &CacheKey) {
        self.entries.remove(key);
    }

    fn evict_class(&self, class: CacheClass) {
        self.entries.retain(|key, _| key.class != class);
    }

    fn evict_content_of_type(&self, content_type_id: i32) {
        self.entries
            .retain(|_, entry| entry.content_type_id != Some(content_type_id));
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
