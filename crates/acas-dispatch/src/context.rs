use acas_types::TxId;
use tracing::Span;

/// Per-invocation context handed to every handler.
///
/// Carries the caller's transaction id, which is used only to correlate log
/// lines.
#[derive(Clone, Debug)]
pub struct TxContext {
    tx_id: TxId,
}

impl TxContext {
    pub fn new(tx_id: TxId) -> Self {
        Self { tx_id }
    }

    /// Context with a freshly generated transaction id.
    pub fn generate() -> Self {
        Self::new(TxId::generate())
    }

    pub fn tx_id(&self) -> &TxId {
        &self.tx_id
    }

    /// Tracing span scoping everything logged during the invocation.
    pub fn span(&self) -> Span {
        tracing::debug_span!("invoke", tx_id = %self.tx_id)
    }
}
