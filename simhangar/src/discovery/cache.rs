//! Persisted search-path cache.
//!
//! Discovery results are written to a small JSON file so later runs can
//! skip the UserCfg.opt probe. The on-disk layout is a compatibility
//! contract with previous runs: a `communityPaths` array of path strings
//! and a `lastUpdated` epoch-seconds string. The cache is advisory only;
//! every path is re-verified against the filesystem on load.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur reading or writing the path cache.
///
/// These never escape the discovery layer; callers log them and fall back
/// to a fresh probe.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache file could not be read or written.
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cache file exists but does not parse as the expected layout.
    #[error("cache parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk layout of the path cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathCache {
    /// Discovered search paths. Backslashes are escaped by JSON encoding.
    #[serde(rename = "communityPaths")]
    pub community_paths: Vec<String>,

    /// Seconds since the Unix epoch at the time of the last save.
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
}

impl PathCache {
    /// Snapshot a path list with the current timestamp.
    pub fn now(paths: &[PathBuf]) -> Self {
        Self {
            community_paths: paths
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
            last_updated: chrono::Utc::now().timestamp().to_string(),
        }
    }

    /// Load the cache file.
    pub fn load(path: &Path) -> Result<Self, CacheError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write the cache file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), CacheError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// The cached paths that still exist on disk.
    ///
    /// Stale entries are dropped with a log line, never surfaced as an
    /// error.
    pub fn existing_paths(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        for raw in &self.community_paths {
            let path = PathBuf::from(raw);
            if path.exists() {
                debug!(path = %path.display(), "loaded search path from cache");
                paths.push(path);
            } else {
                debug!(path = %path.display(), "cached search path no longer exists");
            }
        }
        paths
    }
}
