use acas_types::ContentAddress;

/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag that is prepended to every hash
/// computation, so the same bytes hashed under two domains never share an
/// address.
#[derive(Clone, Copy, Debug)]
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for content blobs (batch files, anchor files, ...).
    pub const CONTENT: Self = Self {
        domain: "acas-content-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Raw 32-byte digest of `data` under this domain.
    pub fn digest(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        *hasher.finalize().as_bytes()
    }

    /// Content address of `data`: the hex-encoded domain digest.
    pub fn address(&self, data: &[u8]) -> ContentAddress {
        ContentAddress::from_digest(&self.digest(data))
    }

    /// Verify that data produces the expected address.
    pub fn verify(&self, data: &[u8], expected: &ContentAddress) -> bool {
        self.address(data) == *expected
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::CONTENT
    }
}
