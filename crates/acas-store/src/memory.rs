use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use acas_crypto::ContentHasher;
use acas_types::ContentAddress;

use crate::error::{StoreError, StoreResult};
use crate::traits::BlobStore;

/// In-memory, HashMap-based blob store.
///
/// Intended for tests and embedding. Blobs are held behind a `RwLock` and
/// cloned on read.
pub struct InMemoryBlobStore {
    hasher: ContentHasher,
    blobs: RwLock<HashMap<ContentAddress, Vec<u8>>>,
}

impl InMemoryBlobStore {
    /// Create a new empty store using the default content hasher.
    pub fn new() -> Self {
        Self::with_hasher(ContentHasher::CONTENT)
    }

    /// Create a new empty store addressing blobs with `hasher`.
    pub fn with_hasher(hasher: ContentHasher) -> Self {
        Self {
            hasher,
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of blobs currently stored.
    pub fn len(&self) -> usize {
        self.blobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total bytes across all stored blobs.
    pub fn total_bytes(&self) -> u64 {
        self.blobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|blob| blob.len() as u64)
            .sum()
    }

    /// Return a sorted list of all addresses in the store.
    pub fn all_addresses(&self) -> Vec<ContentAddress> {
        let map = self.blobs.read().unwrap_or_else(PoisonError::into_inner);
        let mut addresses: Vec<ContentAddress> = map.keys().cloned().collect();
        addresses.sort();
        addresses
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for InMemoryBlobStore {
    fn write(&self, data: &[u8]) -> StoreResult<ContentAddress> {
        let address = self.hasher.address(data);
        let mut map = self
            .blobs
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        // Same address means same bytes, so an existing entry is kept as is.
        map.entry(address.clone())
            .or_insert_with(|| data.to_vec());
        Ok(address)
    }

    fn read(&self, address: &ContentAddress) -> StoreResult<Option<Vec<u8>>> {
        let map = self
            .blobs
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(map.get(address).cloned())
    }

    fn exists(&self, address: &ContentAddress) -> StoreResult<bool> {
        let map = self
            .blobs
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(map.contains_key(address))
    }
}

impl std::fmt::Debug for InMemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBlobStore")
            .field("domain", &self.hasher.domain())
            .field("blob_count", &self.len())
            .finish()
    }
}
