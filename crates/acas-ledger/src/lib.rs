//! Ordered, append-only keyed ledger for anchoring content addresses.
//!
//! This crate provides:
//! - The [`LedgerStore`] trait boundary over a linearizable keyed store
//! - [`InMemoryLedger`] for tests and embedding
//! - [`WalLedger`], a single-node ledger persisted to a CRC-framed
//!   write-ahead log and replayed on open
//! - The anchor key namespace ([`keys`])
//! - [`AnchorLedger`], the adapter request handlers use to record anchors

pub mod anchor;
pub mod error;
pub mod keys;
pub mod memory;
pub mod traits;
pub mod wal;

pub use anchor::{AnchorError, AnchorLedger};
pub use error::{LedgerError, LedgerResult};
pub use keys::{anchor_key, parse_anchor_key, ANCHOR_KEY_PREFIX};
pub use memory::InMemoryLedger;
pub use traits::LedgerStore;
pub use wal::{SyncMode, WalConfig, WalLedger};
