//! Time-to-live cache persisted as a JSON file between runs.
//!
//! Each CLI invocation loads the file, serves fresh entries from it and
//! writes it back after a miss. A `headlines` listing followed by
//! `quiz --index N` within the TTL therefore reads the same list. Expired
//! entries are dropped on load and when they are read.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cache file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// One cached value as it is written to disk.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<V> {
    key: String,
    stored_at: DateTime<Utc>,
    value: V,
}

#[derive(Debug)]
pub struct TtlCache<V> {
    ttl: Duration,
    entries: HashMap<String, (DateTime<Utc>, V)>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn get(&mut self, key: &str) -> Option<V> {
        self.get_at(key, Utc::now())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        self.insert_at(key, value, Utc::now());
    }

    fn get_at(&mut self, key: &str, now: DateTime<Utc>) -> Option<V> {
        let (stored_at, value) = self.entries.get(key)?;
        if self.is_fresh(*stored_at, now) {
            return Some(value.clone());
        }
        debug!(key, "Cache entry expired");
        self.entries.remove(key);
        None
    }

    fn insert_at(&mut self, key: impl Into<String>, value: V, now: DateTime<Utc>) {
        self.entries.insert(key.into(), (now, value));
    }

    /// A timestamp in the future (clock moved back) counts as fresh.
    fn is_fresh(&self, stored_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        (now - stored_at).to_std().unwrap_or(Duration::ZERO) < self.ttl
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<V> TtlCache<V>
where
    V: Clone + Serialize + DeserializeOwned,
{
    /// Read a cache file. A missing file is an empty cache.
    pub fn load(path: &Path, ttl: Duration) -> Result<Self, CacheError> {
        Self::load_at(path, ttl, Utc::now())
    }

    fn load_at(path: &Path, ttl: Duration, now: DateTime<Utc>) -> Result<Self, CacheError> {
        let mut cache = Self::new(ttl);
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(cache),
            Err(source) => {
                return Err(CacheError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let entries: Vec<CacheEntry<V>> = serde_json::from_str(&raw).map_err(|source| CacheError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        let total = entries.len();
        for entry in entries {
            if cache.is_fresh(entry.stored_at, now) {
                cache.entries.insert(entry.key, (entry.stored_at, entry.value));
            }
        }
        debug!(path = %path.display(), total, fresh = cache.len(), "Loaded cache file");
        Ok(cache)
    }

    /// Write every entry to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), CacheError> {
        let io_err = |source| CacheError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let entries: Vec<CacheEntry<&V>> = self
            .entries
            .iter()
            .map(|(key, (stored_at, value))| CacheEntry {
                key: key.clone(),
                stored_at: *stored_at,
                value,
            })
            .collect();
        let json = serde_json::to_string(&entries).map_err(|source| CacheError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("news_quiz_cache_{}_{name}", std::process::id()))
            .join("headlines.json")
    }

    #[test]
    fn test_hit_within_ttl() {
        let mut cache = TtlCache::new(Duration::from_secs(300));
        let t0 = Utc::now();
        cache.insert_at("news_us_general", vec![1, 2, 3], t0);

        let hit = cache.get_at("news_us_general", t0 + TimeDelta::seconds(299));
        assert_eq!(hit, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_miss_after_ttl_evicts() {
        let mut cache = TtlCache::new(Duration::from_secs(300));
        let t0 = Utc::now();
        cache.insert_at("news_us_general", "cached", t0);

        assert_eq!(cache.get_at("news_us_general", t0 + TimeDelta::seconds(300)), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_unknown_key() {
        let mut cache: TtlCache<String> = TtlCache::new(Duration::from_secs(1));
        assert!(cache.get("missing").is_none());
    }

    #[test]
    fn test_insert_replaces_and_refreshes() {
        let mut cache = TtlCache::new(Duration::from_secs(10));
        let t0 = Utc::now();
        cache.insert_at("k", 1, t0);
        cache.insert_at("k", 2, t0 + TimeDelta::seconds(8));

        assert_eq!(cache.get_at("k", t0 + TimeDelta::seconds(15)), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_public_insert_then_get() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("k", "v".to_string());
        assert_eq!(cache.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_save_then_load_serves_entries() {
        let path = temp_path("roundtrip");
        let mut cache = TtlCache::new(Duration::from_secs(300));
        cache.insert("news_us_general", vec!["first".to_string(), "second".to_string()]);
        cache.save(&path).unwrap();

        let mut reloaded: TtlCache<Vec<String>> = TtlCache::load(&path, Duration::from_secs(300)).unwrap();
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();

        assert_eq!(
            reloaded.get("news_us_general"),
            Some(vec!["first".to_string(), "second".to_string()])
        );
    }

    #[test]
    fn test_load_drops_expired_entries() {
        let path = temp_path("expired");
        let t0 = Utc::now();
        let mut cache = TtlCache::new(Duration::from_secs(300));
        cache.insert_at("old", 1, t0 - TimeDelta::seconds(301));
        cache.insert_at("new", 2, t0 - TimeDelta::seconds(10));
        cache.save(&path).unwrap();

        let mut reloaded: TtlCache<i32> = TtlCache::load_at(&path, Duration::from_secs(300), t0).unwrap();
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();

        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.get_at("new", t0), Some(2));
    }

    #[test]
    fn test_missing_file_is_empty_cache() {
        let cache: TtlCache<i32> = TtlCache::load(Path::new("/definitely/not/here.json"), Duration::from_secs(1)).unwrap();
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        let result: Result<TtlCache<i32>, _> = TtlCache::load(&path, Duration::from_secs(1));
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();

        assert!(matches!(result, Err(CacheError::Json { .. })));
    }
}
