use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("content address must not be empty")]
    EmptyAddress,

    #[error("content address is not valid UTF-8")]
    InvalidUtf8,

    #[error("transaction id must not be empty")]
    EmptyTxId,
}
