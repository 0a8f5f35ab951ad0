//! File-backed key-value store.
//!
//! Each key is stored as `<dir>/<key>.json`. Writes go through a temporary
//! file, fsync and atomic rename while holding an exclusive lock file, so a
//! crash never leaves a half-written value behind.

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use pw_core::error::{PwError, Result};
use pw_core::storage::KeyValueStore;
use tracing::debug;

/// A directory of JSON files addressed by key.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(PwError::storage(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    fn temp_path(path: &Path) -> Result<PathBuf> {
        let parent = path
            .parent()
            .ok_or_else(|| PwError::io("Path has no parent directory"))?;
        let file_name = path
            .file_name()
            .ok_or_else(|| PwError::io("Path has no file name"))?;
        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }

    /// Temp file, fsync, rename. The caller holds the key's lock.
    fn write_atomic(path: &Path, value: &str) -> Result<()> {
        let tmp_path = Self::temp_path(path)?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(value.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(content))
    }

    fn set_string(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let _lock = FileLock::acquire(&path)?;
        Self::write_atomic(&path, value)?;
        debug!(key, bytes = value.len(), "Wrote storage value");
        Ok(())
    }

    fn update(
        &self,
        key: &str,
        apply: &mut dyn FnMut(Option<String>) -> Result<String>,
    ) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let _lock = FileLock::acquire(&path)?;
        let current = if path.exists() {
            Some(fs::read_to_string(&path)?)
        } else {
            None
        };
        let next = apply(current)?;
        Self::write_atomic(&path, &next)?;
        debug!(key, bytes = next.len(), "Updated storage value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(());
        }
        let _lock = FileLock::acquire(&path)?;
        fs::remove_file(&path)?;
        Ok(())
    }
}

/// Exclusive lock on `<key>.lock`, released when the handle closes.
///
/// The lock file itself stays on disk: deleting it would let a waiting
/// process and a newcomer lock two different files.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()
            .map_err(|e| PwError::storage(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
