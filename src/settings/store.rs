//! Persistent key/value storage for operator settings.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// String-keyed settings storage. Last write wins.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    /// Updates the in-memory value; call [`KvStore::save`] to persist.
    fn set(&mut self, key: &str, value: &str);
    fn save(&mut self) -> Result<()>;
}

/// Settings kept as a flat JSON object on disk.
pub struct FileKvStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl FileKvStore {
    /// Loads the store from `path`; a missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        let entries = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings: {}", path.display()))?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse settings: {}", path.display()))?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
            dirty: false,
        })
    }

    /// Loads the store from the default location in the app home.
    pub fn open_default() -> Result<Self> {
        Self::load(&crate::app_paths::settings_path()?)
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        if self.entries.get(key).map(String::as_str) != Some(value) {
            self.entries.insert(key.to_string(), value.to_string());
            self.dirty = true;
        }
    }

    /// Writes the store to disk if dirty, under an exclusive file lock.
    fn save(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let content =
            serde_json::to_string_pretty(&self.entries).context("Failed to serialize settings")?;

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&self.path)
            .with_context(|| format!("Failed to open settings: {}", self.path.display()))?;
        FileExt::lock_exclusive(&file).context("Failed to lock settings file")?;

        let written = file
            .set_len(0)
            .and_then(|_| file.write_all(content.as_bytes()))
            .and_then(|_| file.sync_all());
        let _ = FileExt::unlock(&file);
        written.with_context(|| format!("Failed to write settings: {}", self.path.display()))?;

        self.dirty = false;
        Ok(())
    }
}

/// Settings kept only in memory.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryKvStore {
    pub entries: BTreeMap<String, String>,
    pub saves: usize,
    pub fail_saves: bool,
}

#[cfg(test)]
impl MemoryKvStore {
    pub fn with(pairs: &[(&str, &str)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            saves: 0,
            fail_saves: false,
        }
    }
}

#[cfg(test)]
impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn save(&mut self) -> Result<()> {
        self.saves += 1;
        if self.fail_saves {
            anyhow::bail!("disk full");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
