//! Persisted preferred-address record.
//!
//! The operator can mark the candidate that proved reachable from their phone
//! as preferred; the next session then advertises it first. The record is a
//! small JSON file whose layout matches what earlier PocketDrop builds wrote,
//! so existing preference files keep working.
//!
//! Persistence is strictly best-effort: a missing, unreadable or corrupt
//! record is the same as "no preference", and a failed write is reported as
//! `false`, never an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default record location, relative to the working directory.
pub const DEFAULT_FILE_NAME: &str = "ip_preferences.json";

/// On-disk record layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub preferred_ip: String,
    /// ISO-8601 timestamp of the last `save`.
    pub last_updated: String,
}

/// Store for the single persisted preferred address.
///
/// The file path is injected so tests and embedders never touch a shared
/// location.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the well-known default location.
    pub fn at_default_path() -> Self {
        Self::new(DEFAULT_FILE_NAME)
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persists `ip` as the preferred address, overwriting any prior record.
    ///
    /// Returns `false` (and logs) on any I/O failure.
    pub fn save(&self, ip: &str) -> bool {
        let record = PreferenceRecord {
            preferred_ip: ip.to_string(),
            last_updated: chrono::Utc::now().to_rfc3339(),
        };

        let json = match serde_json::to_string_pretty(&record) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("failed to serialize preference record: {e}");
                return false;
            }
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            tracing::warn!(path = %self.path.display(), "failed to create preference dir: {e}");
            return false;
        }

        match std::fs::write(&self.path, json) {
            Ok(()) => {
                tracing::debug!(%ip, path = %self.path.display(), "preferred address saved");
                true
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "failed to save preference: {e}");
                false
            }
        }
    }

    /// Returns the stored preferred address, or `None` if no record exists or
    /// it cannot be read or parsed. Parse failures are logged, never raised.
    pub fn load(&self) -> Option<String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "failed to read preference: {e}");
                return None;
            }
        };

        match serde_json::from_str::<PreferenceRecord>(&content) {
            Ok(record) => Some(record.preferred_ip),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "corrupt preference record: {e}");
                None
            }
        }
    }
}
