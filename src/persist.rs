//! Persisted state
//!
//! A small key/value store of JSON documents on disk, used the way a browser
//! uses local storage: auth tokens and UI preferences survive restarts,
//! nothing else does. Each key is one `<key>.json` file in the state directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, StorefrontError};

/// File-backed JSON key/value storage.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.state_dir.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reads and decodes the value under `key`; `None` if nothing is stored.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.path_for(key)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Encodes and writes `value` under `key`, replacing any previous value.
    pub fn set_item<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(value)?;

        // Replace atomically via a sibling temp file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;

        debug!(key, path = %path.display(), "stored item");
        Ok(())
    }

    /// Deletes the value under `key`; a missing key is not an error.
    pub fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Keys are restricted to `[A-Za-z0-9_-]` so they map to plain file names.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorefrontError::InvalidRequest(format!(
                "invalid storage key: {:?}",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        dark: bool,
    }

    fn storage() -> (TempDir, LocalStorage) {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("state"));
        (dir, storage)
    }

    #[test]
    fn test_get_missing_is_none() {
        let (_dir, storage) = storage();
        assert_eq!(storage.get_item::<Prefs>("prefs").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let (_dir, storage) = storage();
        storage.set_item("prefs", &Prefs { dark: true }).unwrap();

        assert_eq!(
            storage.get_item::<Prefs>("prefs").unwrap(),
            Some(Prefs { dark: true })
        );
        assert!(storage.dir().join("prefs.json").exists());
    }

    #[test]
    fn test_set_overwrites() {
        let (_dir, storage) = storage();
        storage.set_item("prefs", &Prefs { dark: true }).unwrap();
        storage.set_item("prefs", &Prefs { dark: false }).unwrap();

        assert_eq!(
            storage.get_item::<Prefs>("prefs").unwrap(),
            Some(Prefs { dark: false })
        );
    }

    #[test]
    fn test_remove_item() {
        let (_dir, storage) = storage();
        storage.set_item("prefs", &Prefs { dark: true }).unwrap();
        storage.remove_item("prefs").unwrap();
        storage.remove_item("prefs").unwrap();

        assert_eq!(storage.get_item::<Prefs>("prefs").unwrap(), None);
    }

    #[test]
    fn test_corrupt_document_is_decode_error() {
        let (_dir, storage) = storage();
        fs::create_dir_all(storage.dir()).unwrap();
        fs::write(storage.dir().join("prefs.json"), "{not json").unwrap();

        let result = storage.get_item::<Prefs>("prefs");
        assert!(matches!(result, Err(StorefrontError::Decode(_))));
    }

    #[test]
    fn test_from_config_uses_state_dir() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            state_dir: dir.path().join("configured"),
            ..Config::default()
        };
        let storage = LocalStorage::from_config(&config);
        storage.set_item("prefs", &Prefs { dark: true }).unwrap();

        assert_eq!(storage.dir(), config.state_dir.as_path());
        assert!(config.state_dir.join("prefs.json").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (_dir, storage) = storage();
        let result = storage.set_item("../escape", &Prefs { dark: true });
        assert!(matches!(result, Err(StorefrontError::InvalidRequest(_))));
    }
}
