//! Two-tier read-through cache for entity and list lookups.
//!
//! Built on moka's TTL-based future cache. Each cached entity type gets an
//! entity tier for single-record lookups and a shorter-lived list tier for
//! paginated envelopes, which go stale faster because any mutation changes
//! list contents.

use moka::future::Cache;
use std::time::Duration;

use domain::models::Page;

/// Default capacity per tier (number of entries).
const DEFAULT_CAPACITY: u64 = 10_000;

/// Cache configuration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CacheConfig {
    /// TTL for single-entity entries, in seconds.
    #[serde(default = "default_entity_ttl")]
    pub entity_ttl_secs: u64,

    /// TTL for paginated list entries, in seconds.
    #[serde(default = "default_list_ttl")]
    pub list_ttl_secs: u64,
}

fn default_entity_ttl() -> u64 {
    60
}
fn default_list_ttl() -> u64 {
    30
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            entity_ttl_secs: default_entity_ttl(),
            list_ttl_secs: default_list_ttl(),
        }
    }
}

/// A per-entity-type cache with separate entity and list tiers.
///
/// Keys are namespaced strings owned by the calling service, e.g.
/// `customer:{id}` and `customers:page:{p}:limit:{l}`. Absence is a normal
/// outcome; expiry is moka's best-effort wall-clock TTL.
pub struct TieredCache<T: Clone + Send + Sync + 'static> {
    entity: Cache<String, T>,
    list: Cache<String, Page<T>>,
}

impl<T: Clone + Send + Sync + 'static> TieredCache<T> {
    /// Creates a cache with the configured TTL per tier.
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_ttls(
            Duration::from_secs(config.entity_ttl_secs),
            Duration::from_secs(config.list_ttl_secs),
        )
    }

    /// Creates a cache with explicit TTL durations.
    pub fn with_ttls(entity_ttl: Duration, list_ttl: Duration) -> Self {
        Self {
            entity: Cache::builder()
                .max_capacity(DEFAULT_CAPACITY)
                .time_to_live(entity_ttl)
                .build(),
            list: Cache::builder()
                .max_capacity(DEFAULT_CAPACITY)
                .time_to_live(list_ttl)
                .build(),
        }
    }

    /// Looks up a single-entity entry. Missing or expired keys return None.
    pub async fn get(&self, key: &str) -> Option<T> {
        self.entity.get(key).await
    }

    /// Stores a single-entity entry, replacing any existing value.
    pub async fn insert(&self, key: String, value: T) {
        self.entity.insert(key, value).await;
    }

    /// Removes a single-entity entry. Absent keys are a no-op.
    pub async fn invalidate(&self, key: &str) {
        self.entity.invalidate(key).await;
    }

    /// Looks up a paginated list entry.
    pub async fn get_list(&self, key: &str) -> Option<Page<T>> {
        self.list.get(key).await
    }

    /// Stores a paginated list entry, replacing any existing value.
    pub async fn insert_list(&self, key: String, value: Page<T>) {
        self.list.insert(key, value).await;
    }

    /// Removes a paginated list entry. Absent keys are a no-op.
    pub async fn invalidate_list(&self, key: &str) {
        self.list.invalidate(key).await;
    }
}
