//! Time-bounded in-memory caching of database query results.
//!
//! Every dashboard interaction re-runs the same handful of queries, so query
//! results are cached in an LRU keyed by the query parameters, with a fixed
//! expiry. Values are returned as clones: a cached table is a snapshot that
//! downstream pipeline stages never mutate in place, so one entry can serve
//! concurrent readers of the same key.

use lru::LruCache;
use std::{
    hash::Hash,
    num::NonZeroUsize,
    sync::Mutex,
    time::{Duration, Instant},
};

use crate::cli::types::StatFilters;
use crate::pipeline::table::StatTable;
use crate::Season;

/// How long a cached query result stays valid.
pub const CACHE_TTL: Duration = Duration::from_secs(300);

struct Entry<V> {
    stored_at: Instant,
    value: V,
}

/// LRU cache whose entries expire after a fixed time-to-live.
pub struct TtlCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    entries: Mutex<LruCache<K, Entry<V>>>,
    ttl: Duration,
    capacity: usize,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a cache holding up to `capacity` entries for [`CACHE_TTL`].
    pub fn new(capacity: usize) -> Self {
        Self::with_ttl(capacity, CACHE_TTL)
    }

    pub fn with_ttl(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(NonZeroUsize::new(capacity).unwrap())),
            ttl,
            capacity,
        }
    }

    /// Get a snapshot of the cached value, dropping it if expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().unwrap();
        let expired = match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                return Some(entry.value.clone())
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        None
    }

    pub fn put(&self, key: K, value: V) {
        self.entries.lock().unwrap().put(
            key,
            Entry {
                stored_at: Instant::now(),
                value,
            },
        );
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    /// (entries used, capacity).
    pub fn stats(&self) -> (usize, usize) {
        (self.entries.lock().unwrap().len(), self.capacity)
    }
}

/// Global cache manager for the whole application.
pub struct CacheManager {
    /// Filtered player-season tables, keyed by the full filter set.
    pub player_stats: TtlCache<StatFilters, StatTable>,
    /// Distinct season labels.
    pub seasons: TtlCache<(), Vec<String>>,
    /// League names per season.
    pub leagues: TtlCache<Season, Vec<String>>,
    /// Team names per (season, league set).
    pub teams: TtlCache<(Season, Option<Vec<String>>), Vec<String>>,
    /// Position labels per season.
    pub positions: TtlCache<Season, Vec<String>>,
}

impl CacheManager {
    pub fn new() -> Self {
        Self {
            player_stats: TtlCache::new(50),
            seasons: TtlCache::new(4),
            leagues: TtlCache::new(16),
            teams: TtlCache::new(32),
            positions: TtlCache::new(16),
        }
    }

    pub fn clear_all(&self) {
        self.player_stats.clear();
        self.seasons.clear();
        self.leagues.clear();
        self.teams.clear();
        self.positions.clear();
    }
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new()
    }
}

use std::sync::LazyLock;

/// Global cache instance for use across the application.
pub static GLOBAL_CACHE: LazyLock<CacheManager> = LazyLock::new(CacheManager::new);
