//! Content-type and media-type cache refresher.
//!
//! A content-type change can cascade to every content item of that type, so
//! this strategy works from a structured JSON payload instead of bare ids:
//! an array of `{"id": int, "alias": string, "removed": bool}` envelopes.
//! The field names are wire-stable; old and new cluster members may run
//! different versions during a rolling upgrade, so unknown extra fields are
//! ignored on decode.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DistributedCacheError;
use crate::store::{CacheClass, CacheKey, CacheStore};

use super::{CONTENT_TYPE_REFRESHER, CacheRefresher, RefresherId};

/// One changed or removed content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeChange {
    pub id: i32,
    pub alias: String,
    pub removed: bool,
}

impl ContentTypeChange {
    pub fn changed(id: i32, alias: impl Into<String>) -> Self {
        Self {
            id,
            alias: alias.into(),
            removed: false,
        }
    }

    pub fn removed(id: i32, alias: impl Into<String>) -> Self {
        Self {
            id,
            alias: alias.into(),
            removed: true,
        }
    }
}

pub struct ContentTypeCacheRefresher;

impl ContentTypeCacheRefresher {
    /// Encode a batch of changes into the wire payload.
    pub fn encode_changes(changes: &[ContentTypeChange]) -> Result<String, DistributedCacheError> {
        Ok(serde_json::to_string(changes)?)
    }

    /// Decode a wire payload back into envelopes.
    pub fn decode_changes(payload: &str) -> Result<Vec<ContentTypeChange>, DistributedCacheError> {
        Ok(serde_json::from_str(payload)?)
    }
}

impl CacheRefresher for ContentTypeCacheRefresher {
    fn id(&self) -> RefresherId {
        CONTENT_TYPE_REFRESHER
    }

    fn name(&self) -> &'static str {
        "content-type"
    }

    fn apply_payload(
        &self,
        store: &dyn CacheStore,
        payload: &str,
        _remove: bool,
    ) -> Result<(), DistributedCacheError> {
        let changes = Self::decode_changes(payload)?;

        for change in &changes {
            debug!(
                content_type_id = change.id,
                alias = %change.alias,
                removed = change.removed,
                "Applying content type invalidation"
            );

            store.evict(&CacheKey::new(CacheClass::ContentType, change.id));
            store.evict_content_of_type(change.id);

            if change.removed {
                // The type no longer exists; any rendered page may have
                // depended on its structure.
                store.evict_class(CacheClass::Page);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CacheEntry, InMemoryStore};

    #[test]
    fn payload_roundtrip_preserves_removed_flag() {
        let changes = vec![ContentTypeChange::removed(7, "blogPost")];
        let payload = ContentTypeCacheRefresher::encode_changes(&changes).expect("encode");
        let decoded = ContentTypeCacheRefresher::decode_changes(&payload).expect("decode");

        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].id, 7);
        assert_eq!(decoded[0].alias, "blogPost");
        assert!(decoded[0].removed);
    }

    #[test]
    fn wire_field_names_are_stable() {
        let payload =
            ContentTypeCacheRefresher::encode_changes(&[ContentTypeChange::changed(3, "news")])
                .expect("encode");

        assert_eq!(payload, r#"[{"id":3,"alias":"news","removed":false}]"#);
    }

    #[test]
    fn decode_ignores_unknown_fields() {
        let payload = r#"[{"id":7,"alias":"blogPost","removed":true,"variants":["en"]}]"#;
        let decoded = ContentTypeCacheRefresher::decode_changes(payload).expect("decode");

        assert_eq!(decoded, vec![ContentTypeChange::removed(7, "blogPost")]);
    }

    #[test]
    fn removed_type_evicts_all_its_content() {
        let store = InMemoryStore::new();
        store.put(CacheKey::new(CacheClass::Page, 1), CacheEntry::of_type("a", 7));
        store.put(CacheKey::new(CacheClass::Page, 2), CacheEntry::of_type("b", 7));
        store.put(
            CacheKey::new(CacheClass::ContentType, 7),
            CacheEntry::new("type"),
        );

        let payload =
            ContentTypeCacheRefresher::encode_changes(&[ContentTypeChange::removed(7, "blogPost")])
                .expect("encode");
        ContentTypeCacheRefresher
            .apply_payload(&store, &payload, true)
            .expect("apply");

        assert_eq!(store.len(), 0);
    }

    #[test]
    fn changed_type_keeps_other_types_content() {
        let store = InMemoryStore::new();
        store.put(CacheKey::new(CacheClass::Page, 1), CacheEntry::of_type("a", 7));
        store.put(CacheKey::new(CacheClass::Page, 2), CacheEntry::of_type("b", 8));

        let payload =
            ContentTypeCacheRefresher::encode_changes(&[ContentTypeChange::changed(7, "blogPost")])
                .expect("encode");
        ContentTypeCacheRefresher
            .apply_payload(&store, &payload, false)
            .expect("apply");

        assert!(store.get(&CacheKey::new(CacheClass::Page, 1)).is_none());
        assert!(store.get(&CacheKey::new(CacheClass::Page, 2)).is_some());
    }

    #[test]
    fn bad_payload_is_an_error() {
        let store = InMemoryStore::new();
        let result = ContentTypeCacheRefresher.apply_payload(&store, "not json", false);
        assert!(matches!(result, Err(DistributedCacheError::Payload(_))));
    }

    #[test]
    fn apply_ids_is_unsupported() {
        let store = InMemoryStore::new();
        assert!(matches!(
            ContentTypeCacheRefresher.apply_ids(&store, &[7]),
            Err(DistributedCacheError::Unsupported { .. })
        ));
    }
}
