//! Per-week event cache
//!
//! The cache is a keyed store addressed by [`WeekKey`]. It offers no
//! transactional guarantees: concurrent writers to the same key race and
//! the last one wins. A missing key reads as an empty set.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::RwLock;
use tracing::debug;

use crate::app::models::{CanonicalEvent, WeekKey};
use crate::{Error, Result};

/// Storage for canonical events keyed by (year, week)
#[async_trait]
pub trait EventCache: Send + Sync {
    /// Events stored for `key`, empty when nothing is stored
    async fn get(&self, key: &WeekKey) -> Result<Vec<CanonicalEvent>>;

    /// Replace the events stored for `key`
    async fn put(&self, key: &WeekKey, events: &[CanonicalEvent]) -> Result<()>;

    /// Remove the entry for `key`; removing a missing entry succeeds
    async fn clear(&self, key: &WeekKey) -> Result<()>;
}

/// Cache storing one JSON file per week under a directory
#[derive(Debug, Clone)]
pub struct JsonFileCache {
    directory: PathBuf,
}

impl JsonFileCache {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File backing `key`
    pub fn entry_path(&self, key: &WeekKey) -> PathBuf {
        self.directory.join(format!("{}.json", key.cache_key()))
    }
}

#[async_trait]
impl EventCache for JsonFileCache {
    async fn get(&self, key: &WeekKey) -> Result<Vec<CanonicalEvent>> {
        let path = self.entry_path(key);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No cache entry at {}", path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(Error::io(
                    format!("Failed to read cache entry {}", path.display()),
                    e,
                ));
            }
        };

        serde_json::from_str(&content)
            .map_err(|e| Error::cache(key.cache_key(), format!("corrupt entry: {}", e)))
    }

    async fn put(&self, key: &WeekKey, events: &[CanonicalEvent]) -> Result<()> {
        tokio::fs::create_dir_all(&self.directory).await.map_err(|e| {
            Error::io(
                format!("Failed to create cache directory {}", self.directory.display()),
                e,
            )
        })?;

        let json = serde_json::to_string_pretty(events)
            .map_err(|e| Error::serialization(format!("Failed to encode {}", key.cache_key()), e))?;

        // Each write stages into its own file, then renames over the entry
        let path = self.entry_path(key);
        let directory = self.directory.clone();
        let target = path.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut staging = NamedTempFile::new_in(&directory).map_err(|e| {
                Error::io(format!("Failed to stage entry in {}", directory.display()), e)
            })?;
            staging
                .write_all(json.as_bytes())
                .map_err(|e| Error::io(format!("Failed to write {}", staging.path().display()), e))?;
            staging
                .persist(&target)
                .map_err(|e| Error::io(format!("Failed to replace {}", target.display()), e.error))?;
            Ok(())
        })
        .await
        .map_err(|e| Error::cache(key.cache_key(), format!("write task failed: {}", e)))??;

        debug!("Stored {} events at {}", events.len(), path.display());
        Ok(())
    }

    async fn clear(&self, key: &WeekKey) -> Result<()> {
        let path = self.entry_path(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io(format!("Failed to remove {}", path.display()), e)),
        }
    }
}

/// Process-local cache, used when persistence is disabled
#[derive(Debug, Default)]
pub struct MemoryEventCache {
    entries: RwLock<HashMap<WeekKey, Vec<CanonicalEvent>>>,
}

impl MemoryEventCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventCache for MemoryEventCache {
    async fn get(&self, key: &WeekKey) -> Result<Vec<CanonicalEvent>> {
        Ok(self.entries.read().await.get(key).cloned().unwrap_or_default())
    }

    async fn put(&self, key: &WeekKey, events: &[CanonicalEvent]) -> Result<()> {
        self.entries.write().await.insert(*key, events.to_vec());
        Ok(())
    }

    async fn clear(&self, key: &WeekKey) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
