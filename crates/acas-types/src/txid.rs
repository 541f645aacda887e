use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Correlation id of the transaction an invocation runs under.
///
/// Supplied by the caller context (the ledger network, an HTTP header, ...)
/// and used only to correlate log lines. It carries no authority.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxId(String);

impl TxId {
    /// Adopt a caller-supplied transaction id.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::EmptyTxId);
        }
        Ok(Self(id))
    }

    /// Generate a fresh, time-ordered id (UUID v7).
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId({})", self.0)
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
