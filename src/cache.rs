//! File-based cache for processed catalogs
//!
//! Processing is a pure function of the records and engine options, so
//! results are stored as JSON files keyed by a SHA-256 digest of exactly
//! those inputs. Any read problem counts as a miss.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use toolgraph_core::error::{Result, ToolgraphError};
use toolgraph_core::pipeline::{OutputEntity, ProcessOptions};
use toolgraph_core::record::Record;

/// Subdirectory of the user cache directory
const CACHE_SUBDIR: &str = "toolgraph";

/// Digest of the inputs that determine a `process` result
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Hash the canonical JSON of `(records, threshold, weights, relevance)`
    pub fn compute(records: &[Record], options: &ProcessOptions) -> Result<Self> {
        #[derive(Serialize)]
        struct KeyInput<'a> {
            records: &'a [Record],
            options: &'a ProcessOptions,
        }

        // Record fields are a BTreeMap, so this is stable across runs
        let canonical = serde_json::to_vec(&KeyInput { records, options })?;

        let mut hasher = Sha256::new();
        hasher.update(env!("CARGO_PKG_VERSION").as_bytes());
        hasher.update(&canonical);
        Ok(CacheKey(hex::encode(hasher.finalize())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A stored `process` result
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheEntry {
    pub created_at: DateTime<Utc>,
    pub entities: Vec<OutputEntity>,
}

/// JSON files under a cache directory, one per key
pub struct ResultCache {
    cache_dir: PathBuf,
}

impl ResultCache {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Cache under the user cache directory
    pub fn default_location() -> Result<Self> {
        let base = dirs::cache_dir()
            .ok_or_else(|| ToolgraphError::Other("no user cache directory".to_string()))?;
        Ok(Self::new(base.join(CACHE_SUBDIR)))
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key.as_str()))
    }

    /// Look up a stored result
    pub fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        let path = self.entry_path(key);
        if !path.exists() {
            return None;
        }

        let entry = fs::read_to_string(&path)
            .map_err(ToolgraphError::from)
            .and_then(|content| serde_json::from_str::<CacheEntry>(&content).map_err(Into::into));

        match entry {
            Ok(entry) => {
                debug!(key = key.as_str(), created_at = %entry.created_at, "cache hit");
                Some(entry)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable cache entry");
                None
            }
        }
    }

    /// Store a result, creating the cache directory if needed
    pub fn put(&self, key: &CacheKey, entities: &[OutputEntity]) -> Result<()> {
        fs::create_dir_all(&self.cache_dir)?;

        let entry = CacheEntry {
            created_at: Utc::now(),
            entities: entities.to_vec(),
        };
        let content = serde_json::to_string_pretty(&entry)?;
        fs::write(self.entry_path(key), content)?;

        debug!(key = key.as_str(), "cache store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use toolgraph_core::record::columns;

    fn records() -> Vec<Record> {
        vec![Record::new().with(columns::TOOL_NAME, "ENCORE")]
    }

    fn entity() -> OutputEntity {
        OutputEntity {
            id: "encore".to_string(),
            name: "ENCORE".to_string(),
            category: "Other".to_string(),
            relevance: 0.75,
            connections: vec![],
            primary_function: None,
            data_sources: None,
            target_user: None,
            environment_type: None,
            description: None,
        }
    }

    #[test]
    fn test_key_depends_on_options() {
        let options = ProcessOptions::default();
        let a = CacheKey::compute(&records(), &options).unwrap();
        let b = CacheKey::compute(&records(), &options).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);

        let other = ProcessOptions {
            threshold: 0.5,
            ..options
        };
        assert_ne!(a, CacheKey::compute(&records(), &other).unwrap());
    }

    #[test]
    fn test_put_then_get() {
        let dir = tempdir().unwrap();
        let cache = ResultCache::new(dir.path().join("nested"));
        let key = CacheKey::compute(&records(), &ProcessOptions::default()).unwrap();

        assert!(cache.get(&key).is_none());
        cache.put(&key, &[entity()]).unwrap();

        let entry = cache.get(&key).unwrap();
        assert_eq!(entry.entities, vec![entity()]);
    }

    #[test]
    fn test_corrupt_entry_is_miss() {
        let dir = tempdir().unwrap();
        let cache = ResultCache::new(dir.path());
        let key = CacheKey::compute(&records(), &ProcessOptions::default()).unwrap();

        fs::write(cache.entry_path(&key), "not json").unwrap();
        assert!(cache.get(&key).is_none());
    }
}
