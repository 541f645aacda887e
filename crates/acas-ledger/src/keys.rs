//! Anchor key namespace.
//!
//! Every anchor record lives under [`ANCHOR_KEY_PREFIX`] so that it cannot
//! collide with unrelated state sharing the ledger.

use acas_types::ContentAddress;

/// Literal prefix of every anchor key on the ledger.
pub const ANCHOR_KEY_PREFIX: &str = "sidetreetxn_";

/// Ledger key recording `address` as an anchor.
pub fn anchor_key(address: &ContentAddress) -> String {
    format!("{ANCHOR_KEY_PREFIX}{address}")
}

/// Recover the anchored address from a ledger key.
///
/// Returns `None` for keys outside the anchor namespace or for the bare
/// prefix.
pub fn parse_anchor_key(key: &str) -> Option<&str> {
    key.strip_prefix(ANCHOR_KEY_PREFIX)
        .filter(|address| !address.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_prefix_plus_address() {
        let address = ContentAddress::new("abc123").unwrap();
        assert_eq!(anchor_key(&address), "sidetreetxn_abc123");
    }

    #[test]
    fn parse_roundtrip() {
        let address = ContentAddress::new("abc123").unwrap();
        assert_eq!(parse_anchor_key(&anchor_key(&address)), Some("abc123"));
    }

    #[test]
    fn foreign_keys_are_ignored() {
        assert_eq!(parse_anchor_key("config_abc"), None);
        assert_eq!(parse_anchor_key(ANCHOR_KEY_PREFIX), None);
    }
}
