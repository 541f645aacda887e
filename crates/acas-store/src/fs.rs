//! Filesystem-backed blob store.
//!
//! Layout, one file per blob:
//!
//! ```text
//! <root>/<collection>/<first 2 hex chars>/<remaining 62 hex chars>
//! ```
//!
//! Writes go to a temporary file in the target directory and are moved into
//! place with an atomic rename, so readers never observe a partial blob.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use acas_crypto::ContentHasher;
use acas_types::ContentAddress;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::BlobStore;

/// Length of a canonical (hex BLAKE3) address.
const ADDRESS_LEN: usize = 64;

/// Blob store keeping one file per address under a collection directory.
#[derive(Debug)]
pub struct FsBlobStore {
    dir: PathBuf,
    hasher: ContentHasher,
}

impl FsBlobStore {
    /// Open (or create) the store for `collection` under `root`.
    pub fn open(root: &Path, collection: &str) -> StoreResult<Self> {
        if collection.is_empty() || collection.contains(['/', '\\']) || collection == ".." {
            return Err(StoreError::Unavailable(format!(
                "invalid collection name: {collection:?}"
            )));
        }
        let dir = root.join(collection);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            hasher: ContentHasher::CONTENT,
        })
    }

    /// Directory holding this collection's blobs.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Map an address to its file path.
    ///
    /// Only canonical hex addresses can exist in this store; anything else
    /// (including path-like input) maps to `None` and is simply not found.
    fn path_for(&self, address: &ContentAddress) -> Option<PathBuf> {
        let s = address.as_str();
        let canonical = s.len() == ADDRESS_LEN
            && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if !canonical {
            return None;
        }
        let (fanout, rest) = s.split_at(2);
        Some(self.dir.join(fanout).join(rest))
    }
}

impl BlobStore for FsBlobStore {
    fn write(&self, data: &[u8]) -> StoreResult<ContentAddress> {
        let address = self.hasher.address(data);
        let path = self
            .path_for(&address)
            .ok_or_else(|| StoreError::Unavailable("hasher produced a non-canonical address".into()))?;

        match fs::read(&path) {
            Ok(existing) if self.hasher.address(&existing) == address => {
                debug!(address = %address.short(), "blob already present");
                return Ok(address);
            }
            Ok(_) => warn!(address = %address.short(), "replacing damaged blob"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let parent = path
            .parent()
            .ok_or_else(|| StoreError::Unavailable("blob path has no parent".into()))?;
        fs::create_dir_all(parent)?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_all()?;
        // A concurrent writer of the same bytes may win the rename; the
        // result is identical either way.
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;

        debug!(address = %address.short(), len = data.len(), "blob written");
        Ok(address)
    }

    fn read(&self, address: &ContentAddress) -> StoreResult<Option<Vec<u8>>> {
        let Some(path) = self.path_for(address) else {
            return Ok(None);
        };
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let computed = self.hasher.address(&data);
        if computed != *address {
            return Err(StoreError::HashMismatch {
                address: address.clone(),
                computed,
            });
        }
        Ok(Some(data))
    }

    fn exists(&self, address: &ContentAddress) -> StoreResult<bool> {
        Ok(self.path_for(address).is_some_and(|p| p.is_file()))
    }
}
