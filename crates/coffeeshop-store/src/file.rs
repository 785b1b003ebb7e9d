//! Filesystem-backed key-value store.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use tracing::{debug, instrument, warn};

use coffeeshop_core::error::{Error, StorageError};
use coffeeshop_core::{KeyValueStore, Result};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

type Entries = BTreeMap<String, String>;

/// A store persisted as a single JSON object file.
///
/// Every mutation runs under an exclusive lock on a sibling `.lock` file and
/// replaces the data file atomically, so concurrent processes never observe a
/// half-written file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the file at `path`. The file is created on first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the data file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    fn io_err(&self, err: std::io::Error) -> Error {
        Error::Storage(StorageError::Io {
            path: self.path.display().to_string(),
            message: err.to_string(),
        })
    }

    fn lock(&self) -> Result<File> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(|e| self.io_err(e))?;

        lock_file.lock_exclusive().map_err(|e| self.io_err(e))?;
        Ok(lock_file)
    }

    fn read_entries(&self) -> Result<Entries> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(self.io_err(e)),
        };

        if json.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&json).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })
        })
    }

    fn write_entries(&self, entries: &Entries) -> Result<()> {
        let tmp = self.tmp_path();
        let json = serde_json::to_string_pretty(entries).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })
        })?;

        let mut file = File::create(&tmp).map_err(|e| self.io_err(e))?;

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            let mut perms = file.metadata().map_err(|e| self.io_err(e))?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&tmp, perms).map_err(|e| self.io_err(e))?;
        }

        file.write_all(json.as_bytes())
            .map_err(|e| self.io_err(e))?;
        file.sync_data().map_err(|e| self.io_err(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))?;
        Ok(())
    }

    /// Read-modify-write under the lock. Skips the write if `f` reports no change.
    ///
    /// A corrupt file is replaced: it is treated as empty and always rewritten.
    fn update(&self, f: impl FnOnce(&mut Entries) -> bool) -> Result<()> {
        let lock_file = self.lock()?;
        let (mut entries, corrupt) = match self.read_entries() {
            Ok(entries) => (entries, false),
            Err(Error::Storage(StorageError::Corrupt { message, .. })) => {
                warn!(path = %self.path.display(), error = %message, "Discarding corrupt store file");
                (Entries::new(), true)
            }
            Err(e) => return Err(e),
        };
        if f(&mut entries) || corrupt {
            self.write_entries(&entries)?;
        }
        lock_file.unlock().map_err(|e| self.io_err(e))?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.read_entries()?;
        Ok(entries.remove(key))
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        debug!("Writing entry");
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn remove(&self, key: &str) -> Result<()> {
        debug!("Removing entry");
        self.update(|entries| entries.remove(key).is_some())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn remove_all(&self, keys: &[&str]) -> Result<()> {
        debug!("Removing entries");
        self.update(|entries| {
            let mut changed = false;
            for key in keys {
                changed |= entries.remove(*key).is_some();
            }
            changed
        })
    }
}
