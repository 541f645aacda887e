//! Content hashing for the anchored content store.
//!
//! Content addresses are domain-separated BLAKE3 digests. The crate wraps
//! an established hash implementation; it contains no custom cryptography.

pub mod hasher;

pub use hasher::ContentHasher;
