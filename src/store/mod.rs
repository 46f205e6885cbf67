//! Store Module
//!
//! Get/Set/Delete over a key-value mapping.
//!
//! ## Implementations
//! - [`FileStore`]: durable, one JSON file per storage directory. Every
//!   call reloads the whole mapping; every mutation rewrites the whole file.
//! - [`MemoryStore`]: process-local map, nothing touches disk.
//!
//! ## Missing Keys
//! [`Store::get`] returns an empty value for an absent key, which is what
//! HTTP clients observe. Use [`Store::lookup`] to tell "absent" apart from
//! "present and empty".

mod file;
mod memory;

use std::sync::Arc;

use crate::config::{Backend, Config};
use crate::error::Result;

pub use file::{FileStore, DATA_FILENAME};
pub use memory::MemoryStore;

/// Storage interface served by the HTTP layer and the CLI
pub trait Store: Send + Sync {
    /// Value for `key`, or `None` if absent
    fn lookup(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Insert or overwrite `key`
    fn set(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Remove `key` if present
    fn delete(&self, key: &[u8]) -> Result<()>;

    /// Value for `key`, empty if absent
    fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        Ok(self.lookup(key)?.unwrap_or_default())
    }
}

/// Open the store selected by `config.backend`
pub fn open_store(config: &Config) -> Arc<dyn Store> {
    match config.backend {
        Backend::File => Arc::new(FileStore::open(config.clone())),
        Backend::Memory => Arc::new(MemoryStore::new()),
    }
}
