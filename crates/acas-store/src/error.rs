use acas_types::ContentAddress;

/// Errors from blob store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored bytes no longer hash to their address (data corruption).
    #[error("hash mismatch for {address}: computed {computed}")]
    HashMismatch {
        address: ContentAddress,
        computed: ContentAddress,
    },

    /// A writer panicked while holding the store lock.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),

    /// The backend cannot serve requests right now.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
