// Local cache using the sled embedded database. Holds two JSON snapshots,
// the full session list and the template list, each rewritten wholesale.

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::Db;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::Config;
use crate::models::{ExerciseSession, ExerciseTemplate};

const SNAPSHOT_TREE: &str = "snapshots";
const SESSIONS_KEY: &str = "exerciseSessions";
const TEMPLATES_KEY: &str = "exerciseTemplates";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Cache database error: {0}")]
    Database(#[from] sled::Error),

    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Snapshot cache mirroring the in-memory session and template lists
pub struct LocalCache {
    db: Db,
}

impl LocalCache {
    /// Get database directory path (~/.workout-log/cache)
    pub fn db_path(config: &Config) -> Result<PathBuf> {
        // Check for test environment variable first
        if let Ok(test_path) = std::env::var("WORKOUT_LOG_DB_PATH") {
            return Ok(PathBuf::from(test_path));
        }

        if let Some(path) = &config.storage.cache_path {
            return Ok(PathBuf::from(path));
        }

        Ok(Config::config_dir()?.join("cache"))
    }

    /// Open the cache at the configured location
    pub fn init(config: &Config) -> Result<Self> {
        let db_path = Self::db_path(config)?;
        Ok(Self::open(&db_path)?)
    }

    /// Open the cache at an explicit path
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        tracing::info!("Opening sled cache at {:?}", path);

        let db = sled::open(path)?;
        Ok(Self { db })
    }

    pub fn load_sessions(&self) -> Result<Vec<ExerciseSession>, StorageError> {
        self.load_snapshot(SESSIONS_KEY)
    }

    pub fn save_sessions(&self, sessions: &[ExerciseSession]) -> Result<(), StorageError> {
        self.save_snapshot(SESSIONS_KEY, sessions)
    }

    pub fn load_templates(&self) -> Result<Vec<ExerciseTemplate>, StorageError> {
        self.load_snapshot(TEMPLATES_KEY)
    }

    pub fn save_templates(&self, templates: &[ExerciseTemplate]) -> Result<(), StorageError> {
        self.save_snapshot(TEMPLATES_KEY, templates)
    }

    fn load_snapshot<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        let tree = self.db.open_tree(SNAPSHOT_TREE)?;

        match tree.get(key)? {
            Some(value) => Ok(serde_json::from_slice(&value)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_snapshot<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StorageError> {
        let tree = self.db.open_tree(SNAPSHOT_TREE)?;
        let value = serde_json::to_vec(items)?;

        tree.insert(key, value)?;
        self.db.flush()?;

        tracing::debug!("Saved {} {} to cache", items.len(), key);
        Ok(())
    }

    /// Write a raw JSON snapshot, bypassing the canonical serializer
    #[cfg(test)]
    fn put_raw(&self, key: &str, json: &str) -> Result<(), StorageError> {
        let tree = self.db.open_tree(SNAPSHOT_TREE)?;
        tree.insert(key, json.as_bytes())?;
        Ok(())
    }
}
