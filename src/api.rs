//! Convenience surface over the dispatcher.
//!
//! One thin method per entity kind; each maps 1:1 to a well-known
//! [`RefresherId`](crate::refresher::RefresherId) and delegates straight to
//! the core operations. This is the API content-mutation code calls after a
//! successful write.

use tracing::debug;

use crate::dispatcher::DistributedCache;
use crate::error::DistributedCacheError;
use crate::refresher::{
    CONTENT_TYPE_REFRESHER, ContentTypeCacheRefresher, ContentTypeChange, MACRO_REFRESHER,
    MEDIA_REFRESHER, MEMBER_REFRESHER, MacroRendering, PAGE_REFRESHER, TEMPLATE_REFRESHER,
    USER_REFRESHER,
};

/// Implemented by domain entities that expose their integer cache id, so
/// callers can pass objects without extracting ids by hand.
pub trait CacheIdentified {
    fn cache_id(&self) -> i32;
}

impl DistributedCache {
    // ------------------------------------------------------------------
    // Page cache
    // ------------------------------------------------------------------

    /// Refreshes the cache amongst servers for all pages.
    pub fn refresh_all_page_cache(&self) -> Result<(), DistributedCacheError> {
        self.refresh_all(PAGE_REFRESHER, true)
    }

    /// Refreshes the cache amongst servers for a page.
    pub fn refresh_page_cache(&self, document_id: i32) -> Result<(), DistributedCacheError> {
        self.refresh(PAGE_REFRESHER, &[document_id])
    }

    /// Refreshes the page cache for all instances passed in.
    pub fn refresh_page_cache_for<T: CacheIdentified>(
        &self,
        content: &[T],
    ) -> Result<(), DistributedCacheError> {
        self.refresh_by_object(PAGE_REFRESHER, content, T::cache_id)
    }

    /// Removes the cache amongst servers for a page.
    pub fn remove_page_cache(&self, document_id: i32) -> Result<(), DistributedCacheError> {
        self.remove(PAGE_REFRESHER, &[document_id])
    }

    /// Removes the page cache for all instances passed in.
    pub fn remove_page_cache_for<T: CacheIdentified>(
        &self,
        content: &[T],
    ) -> Result<(), DistributedCacheError> {
        self.remove_by_object(PAGE_REFRESHER, content, T::cache_id)
    }

    // ------------------------------------------------------------------
    // Media cache
    // ------------------------------------------------------------------

    pub fn refresh_media_cache(&self, media_id: i32) -> Result<(), DistributedCacheError> {
        self.refresh(MEDIA_REFRESHER, &[media_id])
    }

    pub fn refresh_media_cache_for<T: CacheIdentified>(
        &self,
        media: &[T],
    ) -> Result<(), DistributedCacheError> {
        self.refresh_by_object(MEDIA_REFRESHER, media, T::cache_id)
    }

    pub fn remove_media_cache(&self, media_id: i32) -> Result<(), DistributedCacheError> {
        self.remove(MEDIA_REFRESHER, &[media_id])
    }

    pub fn remove_media_cache_for<T: CacheIdentified>(
        &self,
        media: &[T],
    ) -> Result<(), DistributedCacheError> {
        self.remove_by_object(MEDIA_REFRESHER, media, T::cache_id)
    }

    // ------------------------------------------------------------------
    // Member cache
    // ------------------------------------------------------------------

    pub fn refresh_member_cache(&self, member_id: i32) -> Result<(), DistributedCacheError> {
        self.refresh(MEMBER_REFRESHER, &[member_id])
    }

    pub fn remove_member_cache(&self, member_id: i32) -> Result<(), DistributedCacheError> {
        self.remove(MEMBER_REFRESHER, &[member_id])
    }

    // ------------------------------------------------------------------
    // Template cache
    // ------------------------------------------------------------------

    pub fn refresh_template_cache(&self, template_id: i32) -> Result<(), DistributedCacheError> {
        self.refresh(TEMPLATE_REFRESHER, &[template_id])
    }

    pub fn remove_template_cache(&self, template_id: i32) -> Result<(), DistributedCacheError> {
        self.remove(TEMPLATE_REFRESHER, &[template_id])
    }

    // ------------------------------------------------------------------
    // User cache
    // ------------------------------------------------------------------

    pub fn refresh_user_cache(&self, user_id: i32) -> Result<(), DistributedCacheError> {
        self.refresh(USER_REFRESHER, &[user_id])
    }

    pub fn remove_user_cache(&self, user_id: i32) -> Result<(), DistributedCacheError> {
        self.remove(USER_REFRESHER, &[user_id])
    }

    // ------------------------------------------------------------------
    // Macro cache
    // ------------------------------------------------------------------

    /// Clears the cache for all macros on the current server only.
    pub fn clear_macro_cache_local(&self) -> Result<(), DistributedCacheError> {
        self.refresh_all(MACRO_REFRESHER, false)
    }

    pub fn refresh_macro_cache(&self, macro_id: i32) -> Result<(), DistributedCacheError> {
        self.refresh(MACRO_REFRESHER, &[macro_id])
    }

    pub fn remove_macro_cache(&self, macro_id: i32) -> Result<(), DistributedCacheError> {
        self.remove(MACRO_REFRESHER, &[macro_id])
    }

    /// Refreshes the macro cache from a rendering wrapper. The cache is
    /// keyed by the underlying model's id; a wrapper without a model means
    /// nothing changed, so nothing is dispatched.
    pub fn refresh_macro_rendering(
        &self,
        rendering: &MacroRendering,
    ) -> Result<(), DistributedCacheError> {
        match rendering.model_id() {
            Some(id) => self.refresh_macro_cache(id),
            None => {
                debug!("Macro refresh skipped: rendering has no model");
                Ok(())
            }
        }
    }

    /// Removes the macro cache from a rendering wrapper; see
    /// [`Self::refresh_macro_rendering`].
    pub fn remove_macro_rendering(
        &self,
        rendering: &MacroRendering,
    ) -> Result<(), DistributedCacheError> {
        match rendering.model_id() {
            Some(id) => self.remove_macro_cache(id),
            None => {
                debug!("Macro removal skipped: rendering has no model");
                Ok(())
            }
        }
    }

    // ------------------------------------------------------------------
    // Content type and media type cache
    // ------------------------------------------------------------------

    /// Refreshes all cache for the given content type.
    pub fn refresh_content_type_cache(
        &self,
        type_id: i32,
        alias: &str,
    ) -> Result<(), DistributedCacheError> {
        let payload = ContentTypeCacheRefresher::encode_changes(&[ContentTypeChange::changed(
            type_id, alias,
        )])?;
        self.refresh_by_payload(CONTENT_TYPE_REFRESHER, &payload)
    }

    /// Removes all cache for the given content type.
    pub fn remove_content_type_cache(
        &self,
        type_id: i32,
        alias: &str,
    ) -> Result<(), DistributedCacheError> {
        let payload = ContentTypeCacheRefresher::encode_changes(&[ContentTypeChange::removed(
            type_id, alias,
        )])?;
        self.remove_by_payload(CONTENT_TYPE_REFRESHER, &payload)
    }

    /// Refreshes all cache for the given media type. Media types share the
    /// content-type refresher and wire payload.
    pub fn refresh_media_type_cache(
        &self,
        type_id: i32,
        alias: &str,
    ) -> Result<(), DistributedCacheError> {
        self.refresh_content_type_cache(type_id, alias)
    }

    /// Removes all cache for the given media type.
    pub fn remove_media_type_cache(
        &self,
        type_id: i32,
        alias: &str,
    ) -> Result<(), DistributedCacheError> {
        self.remove_content_type_cache(type_id, alias)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::refresher::MacroModel;
    use crate::registry::RefresherRegistry;
    use crate::store::{CacheClass, CacheEntry, CacheKey, CacheStore, InMemoryStore};

    struct Doc {
        id: i32,
    }

    impl CacheIdentified for Doc {
        fn cache_id(&self) -> i32 {
            self.id
        }
    }

    fn local_cache(store: Arc<InMemoryStore>) -> DistributedCache {
        DistributedCache::local_only(RefresherRegistry::with_defaults(), store)
    }

    #[tokio::test]
    async fn page_convenience_methods_evict_page_keys() {
        let store = Arc::new(InMemoryStore::new());
        store.put(CacheKey::new(CacheClass::Page, 1), CacheEntry::new("a"));
        store.put(CacheKey::new(CacheClass::Page, 2), CacheEntry::new("b"));

        let cache = local_cache(Arc::clone(&store));

        cache.refresh_page_cache(1).expect("refresh");
        cache.remove_page_cache_for(&[Doc { id: 2 }]).expect("remove");

        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn refresh_all_page_cache_clears_the_class() {
        let store = Arc::new(InMemoryStore::new());
        store.put(CacheKey::new(CacheClass::Page, 1), CacheEntry::new("a"));
        store.put(CacheKey::new(CacheClass::Member, 1), CacheEntry::new("m"));

        let cache = local_cache(Arc::clone(&store));
        cache.refresh_all_page_cache().expect("refresh_all");

        assert!(store.get(&CacheKey::new(CacheClass::Page, 1)).is_none());
        assert!(store.get(&CacheKey::new(CacheClass::Member, 1)).is_some());
    }

    #[tokio::test]
    async fn member_media_template_methods_evict_their_classes() {
        let store = Arc::new(InMemoryStore::new());
        store.put(CacheKey::new(CacheClass::Member, 10), CacheEntry::new("m"));
        store.put(CacheKey::new(CacheClass::Media, 11), CacheEntry::new("i"));
        store.put(CacheKey::new(CacheClass::Template, 12), CacheEntry::new("t"));

        let cache = local_cache(Arc::clone(&store));

        cache.remove_member_cache(10).expect("member");
        cache.refresh_media_cache(11).expect("media");
        cache.remove_template_cache(12).expect("template");

        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn user_methods_evict_only_user_keys() {
        let store = Arc::new(InMemoryStore::new());
        store.put(CacheKey::new(CacheClass::User, 3), CacheEntry::new("u"));
        store.put(CacheKey::new(CacheClass::User, 4), CacheEntry::new("v"));
        store.put(CacheKey::new(CacheClass::Member, 3), CacheEntry::new("m"));

        let cache = local_cache(Arc::clone(&store));

        cache.refresh_user_cache(3).expect("refresh");
        cache.remove_user_cache(4).expect("remove");

        assert!(store.get(&CacheKey::new(CacheClass::User, 3)).is_none());
        assert!(store.get(&CacheKey::new(CacheClass::User, 4)).is_none());
        assert!(store.get(&CacheKey::new(CacheClass::Member, 3)).is_some());
    }

    #[tokio::test]
    async fn macro_rendering_without_model_mutates_nothing() {
        let store = Arc::new(InMemoryStore::new());
        store.put(CacheKey::new(CacheClass::Macro, 1), CacheEntry::new("m"));

        let cache = local_cache(Arc::clone(&store));

        cache
            .remove_macro_rendering(&MacroRendering::default())
            .expect("noop");

        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn macro_rendering_uses_the_model_id() {
        let store = Arc::new(InMemoryStore::new());
        store.put(CacheKey::new(CacheClass::Macro, 77), CacheEntry::new("m"));

        let cache = local_cache(Arc::clone(&store));

        let rendering = MacroRendering {
            model: Some(MacroModel {
                id: 77,
                alias: "gallery".to_string(),
            }),
        };
        cache.remove_macro_rendering(&rendering).expect("remove");

        assert!(store.get(&CacheKey::new(CacheClass::Macro, 77)).is_none());
    }

    #[tokio::test]
    async fn clear_macro_cache_local_evicts_all_macros() {
        let store = Arc::new(InMemoryStore::new());
        store.put(CacheKey::new(CacheClass::Macro, 1), CacheEntry::new("a"));
        store.put(CacheKey::new(CacheClass::Macro, 2), CacheEntry::new("b"));

        let cache = local_cache(Arc::clone(&store));
        cache.clear_macro_cache_local().expect("clear");

        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn content_type_removal_evicts_typed_content() {
        let store = Arc::new(InMemoryStore::new());
        store.put(CacheKey::new(CacheClass::Page, 1), CacheEntry::of_type("a", 7));
        store.put(CacheKey::new(CacheClass::Page, 2), CacheEntry::of_type("b", 7));

        let cache = local_cache(Arc::clone(&store));
        cache.remove_content_type_cache(7, "blogPost").expect("remove");

        assert_eq!(store.len(), 0);
    }
}
