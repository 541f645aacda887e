use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifier of a blob in the content store.
///
/// Addresses produced by the reference hasher are 64 lowercase hex
/// characters, but the core treats every address as an opaque non-empty
/// string: a foreign content store is free to use its own scheme. Identical
/// content always maps to the same address.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentAddress(String);

impl ContentAddress {
    /// Wrap an address string. Empty strings are rejected.
    pub fn new(address: impl Into<String>) -> Result<Self, TypeError> {
        let address = address.into();
        if address.is_empty() {
            return Err(TypeError::EmptyAddress);
        }
        Ok(Self(address))
    }

    /// Parse an address from raw argument bytes.
    pub fn from_utf8(bytes: &[u8]) -> Result<Self, TypeError> {
        let s = std::str::from_utf8(bytes).map_err(|_| TypeError::InvalidUtf8)?;
        Self::new(s)
    }

    /// Build the canonical hex address of a 32-byte digest.
    pub fn from_digest(digest: &[u8; 32]) -> Self {
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Short representation (first 8 characters) for log lines.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0.into_bytes()
    }
}

impl fmt::Debug for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentAddress({})", self.short())
    }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContentAddress {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ContentAddress {
    type Error = TypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContentAddress> for String {
    fn from(address: ContentAddress) -> Self {
        address.0
    }
}
