//! File-backed preference store.
//!
//! All keys of a site live in one JSON object at
//! `<data dir>/campus/<site id>/preferences.json`.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::PreferenceError;
use crate::traits::PreferenceStore;

const APP_DIR: &str = "campus";

const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, Error)]
enum FileStoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed preference file: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<FileStoreError> for PreferenceError {
    fn from(err: FileStoreError) -> Self {
        PreferenceError::Io {
            message: err.to_string(),
        }
    }
}

/// Preference store persisted as a JSON map on disk.
///
/// Every write rewrites the whole file; reads go to disk so several stores
/// on the same path observe each other's writes.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FilePreferenceStore {
    /// Store for `site_id` under the user's data directory.
    ///
    /// Returns `None` if the data directory cannot be determined.
    pub fn for_site(site_id: &str) -> Option<Self> {
        let base = dirs::data_dir()?.join(APP_DIR);
        Some(Self::in_dir(base, site_id))
    }

    /// Store for `site_id` under an explicit base directory.
    pub fn in_dir(base: impl AsRef<Path>, site_id: &str) -> Self {
        Self::at_path(base.as_ref().join(site_id).join(PREFERENCES_FILE))
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>, FileStoreError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let file = File::open(&self.path).map_err(|source| FileStoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    fn save(&self, values: &Map<String, Value>) -> Result<(), FileStoreError> {
        let io_err = |source| FileStoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let file = File::create(&self.path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, values)?;
        writer.flush().map_err(io_err)
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, PreferenceError> {
        let _guard = self.lock.lock().await;
        let values = self.load().map_err(|err| PreferenceError::ReadFailed {
            key: key.to_string(),
            message: err.to_string(),
        })?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), PreferenceError> {
        let _guard = self.lock.lock().await;
        let mut values = self.load()?;
        values.insert(key.to_string(), value);
        self.save(&values).map_err(|err| PreferenceError::WriteFailed {
            key: key.to_string(),
            message: err.to_string(),
        })?;
        debug!(key, path = %self.path.display(), "Preference saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_reads_as_absent() {
        let dir = TempDir::new().unwrap();
        let store = FilePreferenceStore::in_dir(dir.path(), "site1");
        assert_eq!(store.get("anything").await.unwrap(), None);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_set_creates_dirs_and_persists() {
        let dir = TempDir::new().unwrap();
        let store = FilePreferenceStore::in_dir(dir.path(), "site1");
        store.set("CoreCourseAllSectionsPreferred-5", json!(1)).await.unwrap();
        store.set("layout", json!("list")).await.unwrap();

        let reopened = FilePreferenceStore::in_dir(dir.path(), "site1");
        assert_eq!(
            reopened.get("CoreCourseAllSectionsPreferred-5").await.unwrap(),
            Some(json!(1))
        );
        assert_eq!(reopened.get("layout").await.unwrap(), Some(json!("list")));
    }

    #[tokio::test]
    async fn test_sites_are_isolated() {
        let dir = TempDir::new().unwrap();
        let a = FilePreferenceStore::in_dir(dir.path(), "a");
        let b = FilePreferenceStore::in_dir(dir.path(), "b");
        a.set("k", json!(true)).await.unwrap();
        assert_eq!(b.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_malformed_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let store = FilePreferenceStore::at_path(dir.path().join("prefs.json"));
        fs::write(store.path(), "not json").unwrap();

        let err = store.get("k").await.unwrap_err();
        assert_eq!(err.error_code(), "E_PREF_READ");
        assert!(store.set("k", json!(1)).await.is_err());
    }
}
