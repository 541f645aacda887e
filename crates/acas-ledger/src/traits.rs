use crate::error::LedgerResult;

/// Ordered, linearizable keyed store backing the ledger.
///
/// Every `put` is applied in a single global order; `height` counts the
/// puts applied so far. Append-only semantics are a convention of the key
/// space: the store itself does not forbid rewriting a key, but nothing in
/// this workspace ever deletes one.
pub trait LedgerStore: Send + Sync {
    /// Write `value` under `key`.
    fn put(&self, key: &str, value: &[u8]) -> LedgerResult<()>;

    /// Read the current value under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    fn get(&self, key: &str) -> LedgerResult<Option<Vec<u8>>>;

    /// All entries whose key starts with `prefix`, sorted by key.
    fn scan(&self, prefix: &str) -> LedgerResult<Vec<(String, Vec<u8>)>>;

    /// Number of puts applied so far.
    fn height(&self) -> LedgerResult<u64>;
}
