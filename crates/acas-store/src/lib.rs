//! Write-once, content-addressed blob storage.
//!
//! The store never interprets blob contents: it maps a [`ContentAddress`]
//! derived from the bytes to the bytes themselves.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlobStore`] trait:
//!
//! - [`InMemoryBlobStore`] -- `HashMap`-based store for tests and embedding
//! - [`FsBlobStore`] -- one file per address under a collection directory
//!
//! # Adapter
//!
//! [`CasClient`] is what request handlers talk to. It validates caller
//! input, keeps "not found" apart from failures, and logs without ever
//! echoing content bytes.
//!
//! # Design Rules
//!
//! 1. Blobs are immutable once written; there is no update or delete.
//! 2. Writes are idempotent: identical bytes yield the identical address.
//! 3. A missing blob is `Ok(None)`, never an error.
//! 4. All I/O errors are propagated, never silently ignored.
//!
//! [`ContentAddress`]: acas_types::ContentAddress

pub mod client;
pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use client::{CasClient, CasError};
pub use error::{StoreError, StoreResult};
pub use fs::FsBlobStore;
pub use memory::InMemoryBlobStore;
pub use traits::BlobStore;
