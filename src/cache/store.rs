//! Persisted catalog cache on disk.
//!
//! One JSON file per cache directory. Writes go through a temp file in the
//! same directory followed by an atomic rename, so a crash mid-write leaves
//! the previous file intact. The directory is probed for writability when the
//! store is opened so permission problems surface at startup rather than in
//! the middle of a refresh.

use super::CacheRecord;
use crate::catalog::{validate_fonts, Font};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

pub const CACHE_FILE_NAME: &str = "font_catalog.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Cache io error: {0}")]
    Io(#[from] std::io::Error),

    /// The file exists but cannot be trusted: unparseable, failing integrity
    /// checks or carrying an impossible timestamp.
    #[error("Cache file corrupt: {0}")]
    Corrupt(String),

    #[error("Cache encode error: {0}")]
    Encode(String),
}

/// On-disk schema. Timestamps are stored as unix seconds; the in-memory
/// monotonic age anchor is rebuilt on load.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedCatalog {
    fetched_at_unix: i64,
    fonts: Vec<Font>,
}

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
    dir: PathBuf,
    size_cap: usize,
    min_font_count: usize,
}

impl SnapshotStore {
    /// Open (and create if needed) the cache directory.
    pub fn open(
        cache_dir: &Path,
        size_cap: usize,
        min_font_count: usize,
    ) -> Result<Self, StoreError> {
        fs::create_dir_all(cache_dir)?;
        // Writability probe: creating a temp file fails now if it would fail later.
        let probe = NamedTempFile::new_in(cache_dir)?;
        drop(probe);
        Ok(Self {
            path: cache_dir.join(CACHE_FILE_NAME),
            dir: cache_dir.to_path_buf(),
            size_cap,
            min_font_count,
        })
    }

    /// Load the persisted catalog, if any.
    ///
    /// A missing file is `Ok(None)`. Anything unreadable or failing integrity
    /// checks is [`StoreError::Corrupt`]; the caller decides whether to
    /// discard it.
    pub fn load(&self) -> Result<Option<CacheRecord>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };

        let persisted: PersistedCatalog =
            serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt(e.to_string()))?;

        validate_fonts(&persisted.fonts, self.min_font_count)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let fetched_at = DateTime::<Utc>::from_timestamp(persisted.fetched_at_unix, 0)
            .ok_or_else(|| {
                StoreError::Corrupt(format!(
                    "invalid fetched_at timestamp {}",
                    persisted.fetched_at_unix
                ))
            })?;

        debug!(
            path = ?self.path,
            fonts = persisted.fonts.len(),
            "Loaded persisted catalog"
        );
        Ok(Some(CacheRecord::loaded(persisted.fonts, fetched_at)))
    }

    /// Persist a record atomically, truncating to the configured size cap.
    pub fn save(&self, record: &CacheRecord) -> Result<(), StoreError> {
        let fonts: Vec<Font> = record
            .fonts()
            .iter()
            .take(self.size_cap)
            .cloned()
            .collect();
        let font_count = fonts.len();
        let persisted = PersistedCatalog {
            fetched_at_unix: record.fetched_at().timestamp(),
            fonts,
        };
        let body =
            serde_json::to_vec_pretty(&persisted).map_err(|e| StoreError::Encode(e.to_string()))?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&body)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        debug!(path = ?self.path, fonts = font_count, "Persisted catalog cache");
        Ok(())
    }

    /// Remove the cache file. Used after a corrupt load; a missing file is
    /// not an error.
    pub fn discard(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = ?self.path, error = %e, "Failed to remove cache file");
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
