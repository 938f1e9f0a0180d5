//! Local key-value store for MDX Converter
//!
//! A small string-to-string store backed by a single JSON file in the
//! config directory. The editor content is kept here under a fixed key
//! and overwritten wholesale on every autosave.

use crate::config::persistence::{ensure_dir, get_config_dir};
use crate::error::{Error, Result};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key under which the editor source text is persisted.
pub const STORAGE_KEY: &str = "mdx_converter_content";

/// Store file name inside the config directory.
const STORAGE_FILE_NAME: &str = "storage.json";

/// Temporary file used for the atomic write.
const STORAGE_TEMP_NAME: &str = "storage.json.tmp";

// ─────────────────────────────────────────────────────────────────────────────
// LocalStore
// ─────────────────────────────────────────────────────────────────────────────

/// File-backed key-value store.
///
/// All entries are held in memory; every `set_item` rewrites
/// the whole file.
#[derive(Debug, Clone)]
pub struct LocalStore {
    /// Directory holding the store file
    dir: PathBuf,
    /// Current entries
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    /// Open the store in the default config directory.
    ///
    /// A missing or unreadable file yields an empty store; the error is
    /// logged rather than returned so startup never fails on storage.
    pub fn open_default() -> Result<Self> {
        Ok(Self::open_or_empty(get_config_dir()?))
    }

    /// Open the store in `dir`, falling back to an empty store on error.
    pub fn open_or_empty(dir: PathBuf) -> Self {
        match Self::open(&dir) {
            Ok(store) => store,
            Err(e) => {
                warn!("{}. Starting with an empty local store.", e);
                Self {
                    dir,
                    entries: BTreeMap::new(),
                }
            }
        }
    }

    /// Open the store in `dir`.
    ///
    /// # Errors
    ///
    /// Returns `Error::StorageLoad` if the file exists but cannot be read
    /// or is not a JSON object of strings.
    pub fn open(dir: &Path) -> Result<Self> {
        let path = dir.join(STORAGE_FILE_NAME);
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|e| Error::StorageLoad {
                path: path.clone(),
                source: Box::new(e),
            })?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents).map_err(|e| Error::StorageLoad {
                    path: path.clone(),
                    source: Box::new(e),
                })?
            }
        } else {
            BTreeMap::new()
        };

        debug!(
            "Local store opened at {} with {} entries",
            path.display(),
            entries.len()
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            entries,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(STORAGE_FILE_NAME)
    }

    /// Get the value stored under `key`.
    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Store `value` under `key` and flush to disk.
    pub fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    /// Write all entries via a temp file and rename.
    fn flush(&self) -> Result<()> {
        ensure_dir(&self.dir).map_err(|e| Error::StorageSave {
            path: self.dir.clone(),
            source: Box::new(e),
        })?;

        let path = self.path();
        let temp_path = self.dir.join(STORAGE_TEMP_NAME);

        let json = serde_json::to_string(&self.entries).map_err(|e| Error::StorageSave {
            path: path.clone(),
            source: Box::new(e),
        })?;

        fs::write(&temp_path, json).map_err(|e| Error::StorageSave {
            path: temp_path.clone(),
            source: Box::new(e),
        })?;

        fs::rename(&temp_path, &path).map_err(|e| Error::StorageSave {
            path: path.clone(),
            source: Box::new(e),
        })?;

        debug!("Local store flushed to {}", path.display());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_store_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        assert!(store.get_item(STORAGE_KEY).is_none());
    }

    #[test]
    fn test_set_item_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let mut store = LocalStore::open(dir.path()).unwrap();
        store.set_item(STORAGE_KEY, "# Saved\n").unwrap();

        let reopened = LocalStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get_item(STORAGE_KEY), Some("# Saved\n"));
    }

    #[test]
    fn test_set_item_overwrites_wholesale() {
        let dir = TempDir::new().unwrap();
        let mut store = LocalStore::open(dir.path()).unwrap();
        store.set_item(STORAGE_KEY, "first version").unwrap();
        store.set_item(STORAGE_KEY, "").unwrap();

        let reopened = LocalStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get_item(STORAGE_KEY), Some(""));
    }

    #[test]
    fn test_flush_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested").join("store");
        let mut store = LocalStore::open_or_empty(nested.clone());
        store.set_item(STORAGE_KEY, "x").unwrap();
        assert!(nested.join(STORAGE_FILE_NAME).exists());
        assert!(!nested.join(STORAGE_TEMP_NAME).exists());
    }

    #[test]
    fn test_corrupted_store_reports_error_and_falls_back() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(STORAGE_FILE_NAME), "[1, 2, 3]").unwrap();

        assert!(matches!(
            LocalStore::open(dir.path()),
            Err(Error::StorageLoad { .. })
        ));

        let store = LocalStore::open_or_empty(dir.path().to_path_buf());
        assert!(store.get_item(STORAGE_KEY).is_none());
    }

    #[test]
    fn test_unicode_content_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut store = LocalStore::open(dir.path()).unwrap();
        let content = "## Table\n| Markdown | ✅ |\n<h3>💡 JSX</h3>";
        store.set_item(STORAGE_KEY, content).unwrap();

        let reopened = LocalStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get_item(STORAGE_KEY), Some(content));
    }
}
