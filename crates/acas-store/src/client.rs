use std::sync::Arc;

use acas_types::{ContentAddress, TypeError};
use tracing::debug;

use crate::error::StoreError;
use crate::traits::BlobStore;

/// Errors surfaced by [`CasClient`].
#[derive(Debug, thiserror::Error)]
pub enum CasError {
    /// Empty content was handed to `write`.
    #[error("missing content")]
    MissingContent,

    /// Empty address was handed to `read`.
    #[error("missing content address")]
    MissingAddress,

    /// The address argument could not be parsed.
    #[error("invalid content address: {0}")]
    InvalidAddress(#[from] TypeError),

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CasError {
    /// Whether the caller supplied bad input (as opposed to a store fault).
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}

/// Content store adapter used by request handlers.
///
/// Validates caller input before touching the store and never includes
/// content bytes in errors or log lines.
#[derive(Clone)]
pub struct CasClient {
    store: Arc<dyn BlobStore>,
}

impl CasClient {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Store `content` and return its address.
    ///
    /// Repeated or concurrent writes of the same bytes yield the same
    /// address and do not fail.
    pub fn write(&self, content: &[u8]) -> Result<ContentAddress, CasError> {
        if content.is_empty() {
            return Err(CasError::MissingContent);
        }
        let address = self.store.write(content)?;
        debug!(address = %address.short(), len = content.len(), "content written");
        Ok(address)
    }

    /// Read the blob at `address` (raw argument bytes).
    ///
    /// A missing blob is `Ok(None)`; only store faults are errors.
    pub fn read(&self, address: &[u8]) -> Result<Option<Vec<u8>>, CasError> {
        if address.is_empty() {
            return Err(CasError::MissingAddress);
        }
        let address = ContentAddress::from_utf8(address)?;
        let content = self.store.read(&address)?;
        debug!(address = %address.short(), found = content.is_some(), "content read");
        Ok(content)
    }
}

impl std::fmt::Debug for CasClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CasClient").finish_non_exhaustive()
    }
}
