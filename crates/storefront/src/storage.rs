//! Simulated browser local storage.
//!
//! A flat string-to-string map persisted as a JSON object file. Every write
//! is flushed immediately; access is synchronous.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors from reading or writing local storage.
#[derive(Debug, Error)]
pub enum LocalStorageError {
    /// The backing file could not be read or written.
    #[error("local storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backing file or a stored value is not valid JSON.
    #[error("local storage JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key/value store backed by a JSON file.
#[derive(Debug, Default)]
pub struct LocalStorage {
    path: Option<PathBuf>,
    items: BTreeMap<String, String>,
}

impl LocalStorage {
    /// Open the store at `path`, starting empty if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LocalStorageError> {
        let path = path.as_ref().to_path_buf();
        let items = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), items = items.len(), "Opened local storage");

        Ok(Self {
            path: Some(path),
            items,
        })
    }

    /// A store that is never written to disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Get a raw value.
    #[must_use]
    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Set a raw value and flush.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be written. The stored
    /// value is left unchanged in that case.
    pub fn set_item(
        &mut self,
        key: &str,
        value: impl Into<String>,
    ) -> Result<(), LocalStorageError> {
        let mut items = self.items.clone();
        items.insert(key.to_string(), value.into());
        self.commit(items)
    }

    /// Remove a value and flush. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be written. The value is
    /// kept in that case.
    pub fn remove_item(&mut self, key: &str) -> Result<(), LocalStorageError> {
        if !self.items.contains_key(key) {
            return Ok(());
        }
        let mut items = self.items.clone();
        items.remove(key);
        self.commit(items)
    }

    /// Get a JSON-encoded value.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value does not decode as `T`.
    pub fn get_json<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, LocalStorageError> {
        self.get_item(key)
            .map(serde_json::from_str)
            .transpose()
            .map_err(Into::into)
    }

    /// Store a value JSON-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn set_json<T: Serialize>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<(), LocalStorageError> {
        let encoded = serde_json::to_string(value)?;
        self.set_item(key, encoded)
    }

    /// Write `items` to disk, then make them the current contents.
    fn commit(&mut self, items: BTreeMap<String, String>) -> Result<(), LocalStorageError> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, serde_json::to_vec_pretty(&items)?)?;
        }
        self.items = items;
        Ok(())
    }
}
