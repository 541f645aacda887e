use acas_types::ContentAddress;

use crate::error::StoreResult;

/// Write-once, content-addressed blob store.
///
/// All implementations must satisfy these invariants:
/// - The address is a pure function of the bytes: the same data always
///   produces the same address.
/// - Writing bytes that are already present is a no-op returning the same
///   address, including under concurrent writers.
/// - Concurrent reads are always safe (blobs are immutable).
/// - All I/O errors are propagated, never silently ignored.
pub trait BlobStore: Send + Sync {
    /// Store `data` and return its content address.
    fn write(&self, data: &[u8]) -> StoreResult<ContentAddress>;

    /// Read a blob by address.
    ///
    /// Returns `Ok(None)` if the blob does not exist.
    /// Returns `Err` on I/O failure or data corruption.
    fn read(&self, address: &ContentAddress) -> StoreResult<Option<Vec<u8>>>;

    /// Check whether a blob exists in the store.
    fn exists(&self, address: &ContentAddress) -> StoreResult<bool> {
        Ok(self.read(address)?.is_some())
    }
}
