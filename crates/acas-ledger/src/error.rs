/// Errors produced by ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("ledger key must not be empty")]
    EmptyKey,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("ledger lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("corrupt ledger log at offset {offset}: {reason}")]
    Corrupt { offset: u64, reason: String },

    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
