//! File Store
//!
//! Durable store backed by a single JSON file.
//!
//! ## Cycle
//! Every operation is a full load → (mutate → save) cycle:
//! 1. Ensure the storage directory exists
//! 2. Create `data.json` holding `{}` if missing
//! 3. Read and decode the whole file
//! 4. Apply the mutation, encode, write a temp file, rename over `data.json`
//!
//! Nothing is cached between calls, so edits made to the file between
//! requests are picked up.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tempfile::NamedTempFile;

use crate::codec;
use crate::config::Config;
use crate::error::{KvError, Result};
use crate::Mapping;

use super::Store;

/// Name of the data file inside the storage directory
pub const DATA_FILENAME: &str = "data.json";

/// Store persisting the whole mapping to `<storage_dir>/data.json`
///
/// ## Concurrency
/// - One `Mutex<()>` serializes every cycle, reads included, so two
///   concurrent writers can never clobber each other's snapshot
/// - Clones share the lock; open one `FileStore` per directory and clone it
/// - The lock is in-process only. Separate processes sharing a directory
///   still race, and the last save wins
#[derive(Clone)]
pub struct FileStore {
    /// Directory holding the data file
    storage_dir: PathBuf,

    /// `storage_dir/data.json`
    data_path: PathBuf,

    /// Serializes load-mutate-save cycles
    lock: Arc<Mutex<()>>,
}

impl FileStore {
    /// Create a store for `config.storage_dir`
    ///
    /// No I/O happens here; the directory and data file are created on
    /// first access.
    pub fn open(config: Config) -> Self {
        let storage_dir = config.storage_dir;
        let data_path = storage_dir.join(DATA_FILENAME);

        Self {
            storage_dir,
            data_path,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Open with a path (convenience method)
    pub fn open_path(path: &Path) -> Self {
        Self::open(Config::builder().storage_dir(path).build())
    }

    /// Read the full mapping from disk, bootstrapping an empty file if needed
    pub fn load(&self) -> Result<Mapping> {
        let _guard = self.lock.lock();
        self.load_unlocked()
    }

    /// Replace the full mapping on disk
    pub fn save(&self, mapping: &Mapping) -> Result<()> {
        let _guard = self.lock.lock();
        self.save_unlocked(mapping)
    }

    /// Get the storage directory path
    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    /// Get the data file path
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    // =========================================================================
    // Private Helpers (called with `lock` held)
    // =========================================================================

    fn load_unlocked(&self) -> Result<Mapping> {
        self.ensure_dir()?;

        if !self.data_path.exists() {
            tracing::debug!("Creating empty data file {}", self.data_path.display());
            self.replace_contents(&codec::encode(&Mapping::new())?)?;
        }

        let content = fs::read(&self.data_path)
            .map_err(|e| KvError::storage("read", &self.data_path, e))?;

        let mapping = codec::decode(&content)?;
        tracing::trace!(
            "Loaded {} entries ({} bytes) from {}",
            mapping.len(),
            content.len(),
            self.data_path.display()
        );

        Ok(mapping)
    }

    fn save_unlocked(&self, mapping: &Mapping) -> Result<()> {
        self.ensure_dir()?;

        let encoded = codec::encode(mapping)?;
        self.replace_contents(&encoded)?;

        tracing::debug!(
            "Saved {} entries ({} bytes) to {}",
            mapping.len(),
            encoded.len(),
            self.data_path.display()
        );

        Ok(())
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.storage_dir)
            .map_err(|e| KvError::storage("create directory", &self.storage_dir, e))
    }

    /// Load, apply `op`, save
    fn mutate<F>(&self, op: F) -> Result<()>
    where
        F: FnOnce(&mut Mapping),
    {
        let _guard = self.lock.lock();

        let mut mapping = self.load_unlocked()?;
        op(&mut mapping);
        self.save_unlocked(&mapping)
    }

    /// Write `bytes` to a temp file next to the data file, then rename it
    /// into place. A failure at any step leaves the old file untouched.
    ///
    /// The new file keeps the mode of the file it replaces (0644 when there
    /// is none yet).
    fn replace_contents(&self, bytes: &[u8]) -> Result<()> {
        let mut tmp = NamedTempFile::new_in(&self.storage_dir)
            .map_err(|e| KvError::storage("create temp file in", &self.storage_dir, e))?;

        if let Some(permissions) = self.data_file_permissions() {
            tmp.as_file()
                .set_permissions(permissions)
                .map_err(|e| KvError::storage("set permissions on", tmp.path().to_path_buf(), e))?;
        }

        tmp.write_all(bytes)
            .map_err(|e| KvError::storage("write", tmp.path().to_path_buf(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| KvError::storage("sync", tmp.path().to_path_buf(), e))?;

        tmp.persist(&self.data_path)
            .map_err(|e| KvError::storage("replace", &self.data_path, e.error))?;

        Ok(())
    }

    fn data_file_permissions(&self) -> Option<fs::Permissions> {
        match fs::metadata(&self.data_path) {
            Ok(meta) => Some(meta.permissions()),
            Err(_) => default_permissions(),
        }
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

impl Store for FileStore {
    fn lookup(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let _guard = self.lock.lock();

        let mut mapping = self.load_unlocked()?;
        Ok(mapping.remove(key))
    }

    fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.mutate(|mapping| {
            mapping.insert(key.to_vec(), value.to_vec());
        })
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.mutate(|mapping| {
            mapping.remove(key);
        })
    }
}
