use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("protocol error: {0}")]
    Protocol(#[from] acas_protocol::ProtocolError),

    #[error("store error: {0}")]
    Store(#[from] acas_store::StoreError),

    #[error("ledger error: {0}")]
    Ledger(#[from] acas_ledger::LedgerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;
