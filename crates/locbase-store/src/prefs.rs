//! Key-value preference storage.
//!
//! Preferences live in a small JSON file holding an object of string keys to
//! string values. Each value is itself JSON text, so a boolean flag is stored
//! as `"true"` or `"false"`.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};

/// Key under which the dark-mode flag is stored.
pub const DARK_MODE_KEY: &str = "darkModeEnabled";

/// File-backed key-value preference area.
#[derive(Debug, Clone)]
pub struct Preferences {
    path: PathBuf,
}

impl Preferences {
    /// Use the preference file at `path`. The file is created on first write.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Use the preference file at the default location.
    pub fn open_default() -> Self {
        Self::open(crate::default_preferences_path())
    }

    /// Path of the preference file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|source| Error::CorruptPreferences {
            path: self.path.clone(),
            source,
        })
    }

    async fn write_all(&self, items: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let content = serde_json::to_string_pretty(items)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }

    /// Read the raw value stored under `key`.
    pub async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all().await?.remove(key))
    }

    /// Store a raw value under `key`, replacing any previous value.
    pub async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.read_all().await?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items).await?;
        debug!(key, value, "Saved preference");
        Ok(())
    }

    /// Remove the value stored under `key`. Missing keys are ignored.
    pub async fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.read_all().await?;
        if items.remove(key).is_some() {
            self.write_all(&items).await?;
        }
        Ok(())
    }

    /// Read and decode a JSON value stored under `key`.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_item(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encode `value` as JSON and store it under `key`.
    pub async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set_item(key, &raw).await
    }

    /// The dark-mode flag; `false` when it was never saved.
    pub async fn dark_mode(&self) -> Result<bool> {
        Ok(self.get_json::<bool>(DARK_MODE_KEY).await?.unwrap_or(false))
    }

    /// Persist the dark-mode flag.
    pub async fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        self.set_json(DARK_MODE_KEY, &enabled).await
    }
}
