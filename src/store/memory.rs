//! Memory Store
//!
//! Non-durable store kept entirely in process memory.

use parking_lot::RwLock;

use crate::error::Result;
use crate::Mapping;

use super::Store;

/// In-memory store (many concurrent readers, exclusive writer)
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Mapping>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `mapping`
    pub fn with_mapping(mapping: Mapping) -> Self {
        Self {
            data: RwLock::new(mapping),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Copy of the current mapping
    pub fn snapshot(&self) -> Mapping {
        self.data.read().clone()
    }
}

impl Store for MemoryStore {
    fn lookup(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.data.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.data.write().remove(key);
        Ok(())
    }
}
