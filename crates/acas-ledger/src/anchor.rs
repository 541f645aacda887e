use std::sync::Arc;

use acas_types::{ContentAddress, TypeError};
use tracing::debug;

use crate::error::LedgerError;
use crate::keys::{anchor_key, parse_anchor_key, ANCHOR_KEY_PREFIX};
use crate::traits::LedgerStore;

/// Errors surfaced by [`AnchorLedger`].
#[derive(Debug, thiserror::Error)]
pub enum AnchorError {
    #[error("missing anchor file address")]
    MissingAddress,

    #[error("invalid anchor file address: {0}")]
    InvalidAddress(#[from] TypeError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl AnchorError {
    /// Whether the caller supplied bad input (as opposed to a ledger fault).
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, Self::Ledger(_))
    }
}

/// Anchor ledger adapter: records content addresses on the ledger.
///
/// Each anchor is a blind put of `ANCHOR_KEY_PREFIX + address -> address`.
/// There is no existence check, so anchoring the same address twice simply
/// rewrites the identical record.
#[derive(Clone)]
pub struct AnchorLedger {
    ledger: Arc<dyn LedgerStore>,
}

impl AnchorLedger {
    pub fn new(ledger: Arc<dyn LedgerStore>) -> Self {
        Self { ledger }
    }

    /// Record an anchor from raw argument bytes.
    pub fn record_anchor(&self, address: &[u8]) -> Result<ContentAddress, AnchorError> {
        if address.is_empty() {
            return Err(AnchorError::MissingAddress);
        }
        let address = ContentAddress::from_utf8(address)?;
        self.record(&address)?;
        Ok(address)
    }

    /// Record an already-parsed address.
    pub fn record(&self, address: &ContentAddress) -> Result<(), AnchorError> {
        self.ledger.put(&anchor_key(address), address.as_bytes())?;
        debug!(address = %address.short(), "anchor recorded");
        Ok(())
    }

    /// Whether `address` has an anchor record.
    pub fn is_anchored(&self, address: &ContentAddress) -> Result<bool, AnchorError> {
        Ok(self.ledger.get(&anchor_key(address))?.is_some())
    }

    /// Every anchored address, in key order.
    pub fn anchors(&self) -> Result<Vec<ContentAddress>, AnchorError> {
        let entries = self.ledger.scan(ANCHOR_KEY_PREFIX)?;
        Ok(entries
            .iter()
            .filter_map(|(key, _)| parse_anchor_key(key))
            .filter_map(|address| ContentAddress::new(address).ok())
            .collect())
    }
}

impl std::fmt::Debug for AnchorLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnchorLedger").finish_non_exhaustive()
    }
}
