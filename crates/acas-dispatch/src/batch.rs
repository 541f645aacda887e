//! Batch anchoring: store a batch file and its anchor file, then anchor the
//! anchor file's address.
//!
//! The three steps run in order and stop at the first failure. Nothing is
//! rolled back: each step is idempotent, so a failed batch can be retried
//! as a whole and converges to the same end state.

use acas_ledger::{AnchorError, AnchorLedger};
use acas_store::{CasClient, CasError};
use acas_types::ContentAddress;
use tracing::debug;

/// Failure of one step of [`anchor_batch`].
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("batch and anchor files are required")]
    MissingFiles,

    #[error("failed to write batch content: {0}")]
    WriteBatch(#[source] CasError),

    #[error("failed to write anchor content: {0}")]
    WriteAnchorFile(#[source] CasError),

    #[error("failed to write anchor address: {0}")]
    RecordAnchor(#[source] AnchorError),
}

impl BatchError {
    /// Whether the caller supplied bad input (as opposed to a collaborator
    /// fault).
    pub fn is_caller_error(&self) -> bool {
        match self {
            Self::MissingFiles => true,
            Self::WriteBatch(e) | Self::WriteAnchorFile(e) => e.is_caller_error(),
            Self::RecordAnchor(e) => e.is_caller_error(),
        }
    }
}

/// Store `batch` and `anchor_file`, then anchor the anchor file's address.
///
/// Returns the anchored address. The batch file's address is not anchored
/// directly; the anchor file is expected to reference it.
pub fn anchor_batch(
    cas: &CasClient,
    anchors: &AnchorLedger,
    batch: &[u8],
    anchor_file: &[u8],
) -> Result<ContentAddress, BatchError> {
    if batch.is_empty() || anchor_file.is_empty() {
        return Err(BatchError::MissingFiles);
    }

    let batch_address = cas.write(batch).map_err(BatchError::WriteBatch)?;
    debug!(address = %batch_address.short(), "batch file stored");

    let anchor_address = cas
        .write(anchor_file)
        .map_err(BatchError::WriteAnchorFile)?;
    debug!(address = %anchor_address.short(), "anchor file stored");

    anchors
        .record(&anchor_address)
        .map_err(BatchError::RecordAnchor)?;
    Ok(anchor_address)
}
