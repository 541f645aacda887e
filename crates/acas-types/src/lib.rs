//! Foundation types for the anchored content store (ACAS).
//!
//! Every other ACAS crate depends on `acas-types`.
//!
//! # Key Types
//!
//! - [`ContentAddress`] -- Opaque, deterministic identifier for a stored blob
//! - [`TxId`] -- Correlation id of the transaction an invocation runs under

pub mod address;
pub mod error;
pub mod txid;

pub use address::ContentAddress;
pub use error::TypeError;
pub use txid::TxId;
