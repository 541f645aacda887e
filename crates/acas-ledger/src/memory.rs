use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::RwLock;

use crate::error::{LedgerError, LedgerResult};
use crate::traits::LedgerStore;

/// Materialized key/value state of a ledger plus its put counter.
///
/// Shared by the in-memory and WAL-backed stores; the WAL ledger rebuilds it
/// by replaying the log.
#[derive(Debug, Default)]
pub(crate) struct LedgerState {
    entries: BTreeMap<String, Vec<u8>>,
    height: u64,
}

impl LedgerState {
    pub(crate) fn apply(&mut self, key: &str, value: &[u8]) {
        self.entries.insert(key.to_string(), value.to_vec());
        self.height += 1;
    }

    pub(crate) fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    pub(crate) fn scan(&self, prefix: &str) -> Vec<(String, Vec<u8>)> {
        self.entries
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub(crate) fn height(&self) -> u64 {
        self.height
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// In-memory ledger for tests, local demos, and embedding.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    inner: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys held.
    pub fn len(&self) -> usize {
        self.inner.read().map(|s| s.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LedgerStore for InMemoryLedger {
    fn put(&self, key: &str, value: &[u8]) -> LedgerResult<()> {
        if key.is_empty() {
            return Err(LedgerError::EmptyKey);
        }
        let mut state = self
            .inner
            .write()
            .map_err(|e| LedgerError::LockPoisoned(e.to_string()))?;
        state.apply(key, value);
        Ok(())
    }

    fn get(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        let state = self
            .inner
            .read()
            .map_err(|e| LedgerError::LockPoisoned(e.to_string()))?;
        Ok(state.get(key))
    }

    fn scan(&self, prefix: &str) -> LedgerResult<Vec<(String, Vec<u8>)>> {
        let state = self
            .inner
            .read()
            .map_err(|e| LedgerError::LockPoisoned(e.to_string()))?;
        Ok(state.scan(prefix))
    }

    fn height(&self) -> LedgerResult<u64> {
        let state = self
            .inner
            .read()
            .map_err(|e| LedgerError::LockPoisoned(e.to_string()))?;
        Ok(state.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_and_get() {
        let ledger = InMemoryLedger::new();
        ledger.put("k1", b"v1").unwrap();
        assert_eq!(ledger.get("k1").unwrap(), Some(b"v1".to_vec()));
        assert_eq!(ledger.get("k2").unwrap(), None);
    }

    #[test]
    fn empty_key_rejected() {
        let ledger = InMemoryLedger::new();
        assert!(matches!(ledger.put("", b"v"), Err(LedgerError::EmptyKey)));
        assert_eq!(ledger.height().unwrap(), 0);
    }

    #[test]
    fn height_counts_every_put() {
        let ledger = InMemoryLedger::new();
        ledger.put("a", b"1").unwrap();
        ledger.put("a", b"1").unwrap();
        ledger.put("b", b"2").unwrap();
        assert_eq!(ledger.height().unwrap(), 3);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn scan_filters_by_prefix_in_key_order() {
        let ledger = InMemoryLedger::new();
        ledger.put("anchor_b", b"b").unwrap();
        ledger.put("other_x", b"x").unwrap();
        ledger.put("anchor_a", b"a").unwrap();
        ledger.put("anchor", b"bare").unwrap();

        let entries = ledger.scan("anchor_").unwrap();
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["anchor_a", "anchor_b"]);
    }

    #[test]
    fn scan_with_empty_prefix_returns_everything() {
        let ledger = InMemoryLedger::new();
        ledger.put("x", b"1").unwrap();
        ledger.put("y", b"2").unwrap();
        assert_eq!(ledger.scan("").unwrap().len(), 2);
    }
}
